//! `rail-sim` — tick loop orchestrator for the rail train simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   now = time at the end of the tick
//!   ① Activation — inactive trains whose appearance time has passed enter
//!   ② Advance    — every active train advances by Δt, in ascending TrainId
//!   ③ Deliver    — train and track events are handed to the observer
//! ```
//!
//! Operator commands (split, reassign, reverse, reset) run between ticks
//! through [`Sim`] methods; their events are delivered with the next tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rail_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, network, services, types)
//!     .trains(records)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
