//! `rail-output` — simulation output for the rail train simulation.
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`csv`]       | `CsvWriter`: `train_snapshots.csv`, `train_events.csv`    |
//! | [`observer`]  | `SimOutputObserver`, the `SimObserver` driving a writer   |
//! | [`session`]   | JSON save/load of the train list at a given time          |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `rail_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rail_output::{CsvWriter, SimOutputObserver, save_session};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! save_session(Path::new("./output/session.json"), sim.now(), &sim.records())?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod session;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{TrainEventRow, TrainSnapshotRow};
pub use session::{Session, load_session, read_session, save_session, write_session};
pub use writer::OutputWriter;
