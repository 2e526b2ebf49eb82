//! The `Sim` struct and its tick loop.

use log::{debug, warn};

use rail_core::{SimClock, SimConfig, SimTime, Tick, TrainId};
use rail_schedule::ServiceRegistry;
use rail_stock::TrainTypeRegistry;
use rail_track::TrackNetwork;
use rail_train::{Train, TrainContext, TrainEvent, TrainRecord, TrainResult};

use crate::{SimError, SimObserver, SimResult};

/// The main simulation runner.
///
/// `Sim` owns the network, the timetable, the rolling-stock table, and all
/// trains, and drives the three-phase tick loop:
///
/// 1. **Activation**: inactive trains whose activation window has opened
///    enter the area.
/// 2. **Advance**: every active train runs one kinematic step, in ascending
///    `TrainId` order so that occupation seen by later trains is
///    deterministic.
/// 3. **Deliver**: train and track events are passed to the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (start time, Δt, seed, options, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and maps it to a time of day.
    pub clock: SimClock,

    /// Track graph, signal state, and occupation.
    pub network: TrackNetwork,

    pub services: ServiceRegistry,

    pub types: TrainTypeRegistry,

    /// Trains indexed by `TrainId`.
    pub(crate) trains: Vec<Train>,

    /// Events emitted since the last delivery.
    pub(crate) events: Vec<TrainEvent>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let tick = self.clock.current_tick;
        observer.on_tick_start(tick);
        let active = self.process_tick(tick, observer);
        observer.on_tick_end(tick, active);
        if self.config.output_interval_ticks > 0
            && tick.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(tick, self.clock.end_of_tick(), &self.trains);
        }
        self.clock.advance();
    }

    /// Time of day at the start of the current tick.
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn train(&self, id: TrainId) -> Option<&Train> {
        self.trains.get(id.index())
    }

    /// Persisted form of every train, in id order.
    pub fn records(&self) -> Vec<TrainRecord> {
        let now = self.now();
        self.trains.iter().map(|t| t.to_record(now)).collect()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Process one tick and return the number of trains that advanced.
    pub fn process_tick<O: SimObserver>(&mut self, tick: Tick, observer: &mut O) -> usize {
        let now = self.clock.end_of_tick();
        let dt = self.config.tick_secs;
        let mut ctx = TrainContext {
            network:    &mut self.network,
            services:   &self.services,
            types:      &self.types,
            options:    &self.config.options,
            start_time: self.config.start_time,
            now,
            seed:       self.config.seed,
            events:     &mut self.events,
        };

        // ── Phase 1: activation ───────────────────────────────────────────
        for train in self.trains.iter_mut() {
            train.activate(&mut ctx);
        }

        // ── Phase 2: advance ──────────────────────────────────────────────
        let mut active = 0;
        for train in self.trains.iter_mut().filter(|t| t.is_active()) {
            train.advance(dt, &mut ctx);
            active += 1;
        }

        // ── Phase 3: deliver events ───────────────────────────────────────
        for event in self.events.drain(..) {
            observer.on_train_event(tick, now, &event);
        }
        for event in self.network.drain_events() {
            observer.on_track_event(tick, &event);
        }
        active
    }

    // ── Operator commands ─────────────────────────────────────────────────

    /// Split train `id` after element `index`.  Returns the id of the new
    /// rear train, which waits for [`reassign_service`](Self::reassign_service).
    pub fn split_train(&mut self, id: TrainId, index: usize) -> SimResult<TrainId> {
        let new_id = TrainId(self.trains.len() as u32);
        let rear = self.with_train(id, |train, ctx| train.split(index, new_id, ctx))?;
        self.trains.push(rear);
        Ok(new_id)
    }

    /// Check that train `id` can be split and emit a split request.
    pub fn request_split(&mut self, id: TrainId) -> SimResult<()> {
        self.with_train(id, |train, ctx| train.request_split(ctx))
    }

    /// Give train `id` service `code`, restarting its itinerary.
    pub fn reassign_service(&mut self, id: TrainId, code: &str) -> SimResult<()> {
        self.with_train(id, |train, ctx| train.assign_service(code, ctx))
    }

    /// Turn train `id` around.  It must be stopped.
    pub fn reverse_train(&mut self, id: TrainId) -> SimResult<()> {
        self.with_train(id, |train, ctx| train.reverse(ctx))
    }

    /// Restart train `id`'s itinerary from its first place.
    pub fn reset_service(&mut self, id: TrainId) -> SimResult<()> {
        self.with_train(id, |train, ctx| {
            train.reset_service(ctx.services);
            Ok(())
        })
    }

    pub fn set_shunting(&mut self, id: TrainId, shunting: bool) -> SimResult<()> {
        let train = self.trains.get_mut(id.index()).ok_or(SimError::UnknownTrain(id))?;
        train.set_shunting(shunting);
        Ok(())
    }

    fn with_train<T>(
        &mut self,
        id: TrainId,
        f:  impl FnOnce(&mut Train, &mut TrainContext<'_>) -> TrainResult<T>,
    ) -> SimResult<T> {
        let now = self.clock.now();
        let train = self.trains.get_mut(id.index()).ok_or(SimError::UnknownTrain(id))?;
        let mut ctx = TrainContext {
            network:    &mut self.network,
            services:   &self.services,
            types:      &self.types,
            options:    &self.config.options,
            start_time: self.config.start_time,
            now,
            seed:       self.config.seed,
            events:     &mut self.events,
        };
        let result = f(train, &mut ctx);
        match &result {
            Ok(_) => debug!("{id}: command applied at {now}"),
            Err(e) => warn!("{id}: command refused: {e}"),
        }
        Ok(result?)
    }
}
