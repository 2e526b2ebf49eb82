//! `rail-core` — foundational types for the rail train simulation.
//!
//! Every other `rail-*` crate depends on this one.  It has no `rail-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `TrainId`, `TrackItemId`                                   |
//! | [`time`]   | `Tick`, `SimTime`, `SimClock`                              |
//! | [`config`] | `SimConfig`, `SimOptions`                                  |
//! | [`proba`]  | `DurationProba` (sampled stop times and entry delays)      |
//! | [`rng`]    | `TrainRng` (per-train, seeded from the run seed)           |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |

pub mod config;
pub mod error;
pub mod ids;
pub mod proba;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, SimOptions};
pub use error::{CoreError, CoreResult};
pub use ids::{TrackItemId, TrainId};
pub use proba::DurationProba;
pub use rng::TrainRng;
pub use time::{SimClock, SimTime, Tick};
