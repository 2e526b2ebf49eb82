//! `rail-train` — the train kinematics and signalling engine.
//!
//! # Per-tick pipeline
//!
//! ```text
//! Train::advance(dt, ctx):
//!   ① signal actions — read the next visible signal, progress the action list
//!   ② speed          — min of signal / station / speed-limit / train-ahead
//!                      braking-curve targets → one clamped acceleration
//!   ③ move head      — head += speed × dt
//!   ④ status         — RUNNING / STOPPED / WAITING / END_OF_SERVICE
//!   ⑤ draw           — register covered items, unregister vacated ones
//!   ⑥ actions        — head-enters / tail-leaves side effects, non-stop
//!                      places, network exit → OUT
//! ```
//!
//! | Module             | Contents                                             |
//! |--------------------|------------------------------------------------------|
//! | [`status`]         | `TrainStatus`                                        |
//! | [`signal_actions`] | `SignalActionTracker`, `SignalSighting`              |
//! | [`speed`]          | `SpeedController`, `Constraint`                      |
//! | [`lookahead`]      | Forward scans: next signal, stop, limit, train       |
//! | [`train`]          | `Train` aggregate: advance, activate, status, reverse|
//! | [`advance`]        | Drawing the train and crossing side effects          |
//! | [`progression`]    | Itinerary progression and service assignment        |
//! | [`split`]          | `plan_split`, `Train::split`                         |
//! | [`record`]         | `TrainRecord` — persisted form of a train            |
//! | [`context`]        | `TrainContext` — collaborators passed into each call |
//! | [`event`]          | `TrainEvent`                                         |
//! | [`error`]          | `TrainError`, `TrainResult`                          |

pub mod advance;
pub mod context;
pub mod error;
pub mod event;
pub mod lookahead;
pub mod progression;
pub mod record;
pub mod signal_actions;
pub mod speed;
pub mod split;
pub mod status;
pub mod train;


pub use context::TrainContext;
pub use error::{TrainError, TrainResult};
pub use event::TrainEvent;
pub use record::TrainRecord;
pub use signal_actions::{SignalActionTracker, SignalSighting};
pub use speed::{Constraint, SpeedController};
pub use split::{SplitPlan, plan_split};
pub use status::TrainStatus;
pub use train::Train;
