//! Collaborators handed to every train operation.

use rail_core::{SimOptions, SimTime};
use rail_schedule::ServiceRegistry;
use rail_stock::TrainTypeRegistry;
use rail_track::TrackNetwork;

use crate::TrainEvent;

/// Everything a train reads or mutates outside itself during one call.
///
/// The network is borrowed mutably for occupation and berth updates; the
/// registries are read-only.  Events are appended to `events` and drained by
/// the driver.
pub struct TrainContext<'a> {
    pub network:    &'a mut TrackNetwork,
    pub services:   &'a ServiceRegistry,
    pub types:      &'a TrainTypeRegistry,
    pub options:    &'a SimOptions,
    /// Start of the simulated session; bounds the activation window.
    pub start_time: SimTime,
    /// Current simulation time.
    pub now:        SimTime,
    /// Global seed for per-train RNG streams.
    pub seed:       u64,
    pub events:     &'a mut Vec<TrainEvent>,
}

impl TrainContext<'_> {
    #[inline]
    pub fn emit(&mut self, event: TrainEvent) {
        self.events.push(event);
    }
}
