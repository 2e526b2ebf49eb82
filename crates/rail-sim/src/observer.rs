//! Simulation observer trait for progress reporting and data collection.

use rail_core::{SimTime, Tick};
use rail_track::TrackEvent;
use rail_train::{Train, TrainEvent};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — arrival printer
///
/// ```rust,ignore
/// struct Arrivals;
///
/// impl SimObserver for Arrivals {
///     fn on_train_event(&mut self, _tick: Tick, time: SimTime, event: &TrainEvent) {
///         if let TrainEvent::StoppedAtStation { train, place_code } = event {
///             println!("{time} {train} arrived at {place_code}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every event a train emitted during the tick, in emission
    /// order.  `time` is the simulation time at the end of the tick.
    fn on_train_event(&mut self, _tick: Tick, _time: SimTime, _event: &TrainEvent) {}

    /// Called for every track event (berths, crossings) of the tick.
    fn on_track_event(&mut self, _tick: Tick, _event: &TrackEvent) {}

    /// Called at the end of each tick.
    ///
    /// `active` is the number of trains that advanced this tick.
    fn on_tick_end(&mut self, _tick: Tick, _active: usize) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks)
    /// with read-only access to every train.
    fn on_snapshot(&mut self, _tick: Tick, _time: SimTime, _trains: &[Train]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
