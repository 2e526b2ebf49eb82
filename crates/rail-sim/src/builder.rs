//! Fluent builder for constructing a [`Sim`].

use log::info;

use rail_core::{SimConfig, TrainId};
use rail_schedule::ServiceRegistry;
use rail_stock::TrainTypeRegistry;
use rail_track::TrackNetwork;
use rail_train::{TrainContext, TrainRecord};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — start time, Δt, total ticks, seed, options
/// - [`TrackNetwork`] — from [`rail_track::TrackNetworkBuilder`]
/// - [`ServiceRegistry`] — e.g. from [`rail_schedule::load_services_csv`]
/// - [`TrainTypeRegistry`] — from [`rail_stock::TrainTypeRegistryBuilder`]
///
/// # Optional inputs
///
/// | Method        | Default   |
/// |---------------|-----------|
/// | `.trains(v)`  | No trains |
///
/// Train ids are assigned in record order.
pub struct SimBuilder {
    config:   SimConfig,
    network:  TrackNetwork,
    services: ServiceRegistry,
    types:    TrainTypeRegistry,
    trains:   Vec<TrainRecord>,
}

impl SimBuilder {
    pub fn new(
        config:   SimConfig,
        network:  TrackNetwork,
        services: ServiceRegistry,
        types:    TrainTypeRegistry,
    ) -> Self {
        Self { config, network, services, types, trains: Vec::new() }
    }

    /// Supply the trains, e.g. from a saved session.
    pub fn trains(mut self, trains: Vec<TrainRecord>) -> Self {
        self.trains = trains;
        self
    }

    /// Validate inputs, build every train, and re-register trains that are
    /// already on the network.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        self.services.validate()?;

        let mut network = self.network;
        let mut events = Vec::new();
        let mut trains = Vec::with_capacity(self.trains.len());
        {
            let mut ctx = TrainContext {
                network:    &mut network,
                services:   &self.services,
                types:      &self.types,
                options:    &self.config.options,
                start_time: self.config.start_time,
                now:        self.config.start_time,
                seed:       self.config.seed,
                events:     &mut events,
            };
            for (index, record) in self.trains.into_iter().enumerate() {
                let train = record
                    .into_train(TrainId(index as u32), &ctx)
                    .map_err(|source| SimError::InvalidTrain { index, source })?;
                train.restore(&mut ctx);
                trains.push(train);
            }
        }
        info!(
            "simulation ready: {} trains, {} services, {} track items",
            trains.len(),
            self.services.len(),
            network.len()
        );

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            network,
            services: self.services,
            types:    self.types,
            trains,
            events,
        })
    }
}
