//! The `Train` aggregate.
//!
//! # Activation window
//!
//! An inactive train enters the area once its effective appearance time
//! (`appear_time + initial_delay`) has passed, provided that time is no more
//! than an hour before the session start.  Older trains are considered
//! obsolete and never appear.

use log::{debug, info, trace};

use rail_core::{DurationProba, SimOptions, SimTime, TrainId, TrainRng};
use rail_schedule::{Service, ServiceLine, ServiceRegistry};
use rail_stock::TrainType;
use rail_track::{Position, Target, TrackNetwork};

use crate::lookahead::{distance_to_next_stop, distance_to_next_train, find_next_signal, next_speed_limit};
use crate::signal_actions::SignalSighting;
use crate::status::RUNNING_THRESHOLD;
use crate::{
    Constraint, SignalActionTracker, SpeedController, TrainContext, TrainError, TrainEvent,
    TrainResult, TrainStatus,
};

/// Seconds before the session start beyond which trains never appear.
const OBSOLETE_BEFORE_START_SECS: f64 = 3600.0;

/// Minimum look-ahead distance (m) for station, limit, and train scans.
const MIN_HORIZON: f64 = 50.0;

/// Gap (m) kept behind another train unless shunting.
const TRAIN_SAFETY_DISTANCE: f64 = 100.0;

#[derive(Clone, Debug)]
pub struct Train {
    pub(crate) id:                  TrainId,
    pub(crate) train_type:          TrainType,
    pub(crate) service_code:        Option<String>,
    pub(crate) status:              TrainStatus,
    pub(crate) speed:               f64,
    pub(crate) acceleration:        f64,
    pub(crate) initial_speed:       f64,
    pub(crate) head:                Position,
    pub(crate) appear_time:         SimTime,
    pub(crate) initial_delay_proba: DurationProba,
    /// Seconds added to `appear_time`, sampled once when the train is built.
    pub(crate) initial_delay:       f64,
    pub(crate) next_place_index:    Option<usize>,
    pub(crate) stopped_time:        f64,
    pub(crate) minimum_stop_time:   f64,
    pub(crate) signals:             SignalActionTracker,
    pub(crate) shunting:            bool,
    /// Set on trains created by a split until a service is assigned.
    pub(crate) held:                bool,
    pub(crate) rng:                 TrainRng,
}

impl Train {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> TrainId {
        self.id
    }

    pub fn train_type(&self) -> &TrainType {
        &self.train_type
    }

    pub fn service_code(&self) -> Option<&str> {
        self.service_code.as_deref()
    }

    #[inline]
    pub fn status(&self) -> TrainStatus {
        self.status
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Acceleration applied during the last speed update.
    #[inline]
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn initial_speed(&self) -> f64 {
        self.initial_speed
    }

    pub fn head(&self) -> Position {
        self.head
    }

    /// Position of the rear of the train.
    pub fn tail(&self, net: &TrackNetwork) -> Position {
        self.head.retreated(net, self.train_type.length)
    }

    pub fn appear_time(&self) -> SimTime {
        self.appear_time
    }

    pub fn initial_delay(&self) -> f64 {
        self.initial_delay
    }

    pub fn next_place_index(&self) -> Option<usize> {
        self.next_place_index
    }

    /// Seconds spent at the current scheduled stop.
    pub fn stopped_time(&self) -> f64 {
        self.stopped_time
    }

    pub fn minimum_stop_time(&self) -> f64 {
        self.minimum_stop_time
    }

    pub fn signal_actions(&self) -> &SignalActionTracker {
        &self.signals
    }

    pub fn is_shunting(&self) -> bool {
        self.shunting
    }

    /// Shunting trains may close up to other trains.
    pub fn set_shunting(&mut self, shunting: bool) {
        self.shunting = shunting;
    }

    /// `true` for a split-off train waiting for a service assignment.
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn current_service<'s>(&self, services: &'s ServiceRegistry) -> Option<&'s Service> {
        services.get(self.service_code.as_deref()?)
    }

    /// The itinerary line the train is heading for.
    pub fn next_line<'s>(&self, services: &'s ServiceRegistry) -> Option<&'s ServiceLine> {
        self.current_service(services)?.line(self.next_place_index?)
    }

    /// The first line from the next place on where the train must stop.
    pub fn next_stop_line<'s>(&self, services: &'s ServiceRegistry) -> Option<&'s ServiceLine> {
        let service = self.current_service(services)?;
        service.lines.get(self.next_place_index?..)?.iter().find(|l| l.must_stop)
    }

    /// Lower of the type's maximum speed and the current item's limit.
    pub fn maximum_speed(&self, net: &TrackNetwork) -> f64 {
        self.train_type.max_speed.min(net.item(self.head.item).max_speed)
    }

    // ── Per-tick update ───────────────────────────────────────────────────

    /// Advance the train by one tick of `dt` seconds.  Does nothing unless
    /// the train is active.
    pub fn advance(&mut self, dt: f64, ctx: &mut TrainContext<'_>) {
        if !self.is_active() {
            return;
        }
        self.update_signal_actions(ctx);
        self.set_speed(dt, ctx);
        let advance_length = self.speed * dt;
        self.head = self.head.advanced(ctx.network, advance_length);
        self.update_status(dt, ctx);
        self.draw_train(advance_length, ctx);
        self.execute_actions(advance_length, ctx);
        trace!(
            "{} at {} +{:.1}m  v={:.2} a={:.2} {:?}",
            self.id, self.head.item, self.head.offset, self.speed, self.acceleration, self.status
        );
    }

    /// Read the next facing signal and progress its action list.
    pub fn update_signal_actions(&mut self, ctx: &TrainContext<'_>) {
        let net = &*ctx.network;
        let sighting = match find_next_signal(net, &self.head) {
            None => SignalSighting::NoneAhead,
            Some(pos) => {
                let distance = self.head.distance_to(net, &pos).unwrap_or(f64::INFINITY);
                match net.signal(pos.item) {
                    Ok(state) if distance < ctx.options.default_signal_visibility => {
                        SignalSighting::InSight { signal: pos.item, actions: &state.aspect.actions }
                    }
                    _ => SignalSighting::OutOfSight,
                }
            }
        };
        self.signals.update(sighting, self.speed, ctx.now);
    }

    /// Apply one acceleration towards the lowest target speed ahead.
    pub fn set_speed(&mut self, dt: f64, ctx: &TrainContext<'_>) {
        if !self.is_active() || self.status == TrainStatus::Stopped {
            self.speed = 0.0;
            self.acceleration = 0.0;
            return;
        }
        let net = &*ctx.network;
        let ty = &self.train_type;
        let ctl = SpeedController {
            max_speed:   self.maximum_speed(net),
            std_braking: ty.std_braking,
            speed:       self.speed,
            dt,
        };

        let signal = self.signal_constraint(net, &ctl);

        let horizon = (self.speed * self.speed / ty.std_braking).max(MIN_HORIZON);
        let station = Constraint::approach(
            self.next_stop_line(ctx.services)
                .and_then(|line| distance_to_next_stop(net, &self.head, &line.place_code, horizon)),
            0.0,
        );
        let limit = match next_speed_limit(net, &self.head, ctl.max_speed, ty.std_braking, horizon) {
            Some((speed, distance)) => Constraint::Approach { distance, speed },
            None => Constraint::Unconstrained,
        };
        let safety = if self.shunting { 0.0 } else { TRAIN_SAFETY_DISTANCE };
        let train_ahead = Constraint::approach(
            distance_to_next_train(net, &self.head, self.id, horizon).map(|d| d - safety),
            0.0,
        );

        let target = [signal, station, limit, train_ahead]
            .into_iter()
            .map(|c| ctl.target_speed(c))
            .fold(f64::INFINITY, f64::min);
        self.acceleration = ctl.acceleration(target, ty.std_accel, ty.emerg_braking);
        self.speed = (self.speed + self.acceleration * dt).max(0.0);
    }

    /// The signal channel's constraint under the action in force.
    pub(crate) fn signal_constraint(&self, net: &TrackNetwork, ctl: &SpeedController) -> Constraint {
        let action = self.signals.applicable();
        let next_signal = find_next_signal(net, &self.head);
        let is_last = next_signal.is_some_and(|p| Some(p.item) == self.signals.last_signal());
        let distance = next_signal.and_then(|p| self.head.distance_to(net, &p));
        match action.target {
            Target::Asap => Constraint::Approach {
                distance: ctl.asap_distance(action.speed),
                speed:    action.speed,
            },
            Target::BeforeThisSignal if !is_last => Constraint::Hold { speed: action.speed },
            Target::BeforeThisSignal => Constraint::approach(distance, action.speed),
            Target::BeforeNextSignal => {
                let following = next_signal.filter(|_| is_last).and_then(|this| {
                    find_next_signal(net, &this).and_then(|next| this.distance_to(net, &next))
                });
                Constraint::approach(distance.map(|d| d + following.unwrap_or(0.0)), action.speed)
            }
        }
    }

    /// Derive the status from speed and position.
    pub fn update_status(&mut self, dt: f64, ctx: &mut TrainContext<'_>) {
        if !self.is_active() {
            return;
        }
        if self.speed > RUNNING_THRESHOLD {
            self.set_status(TrainStatus::Running, ctx);
            return;
        }
        let services = ctx.services;
        let Some(line) = self.next_line(services) else {
            self.set_status(TrainStatus::Waiting, ctx);
            return;
        };
        let here = ctx.network.item(self.head.item).place_code();
        if !line.must_stop || here != Some(line.place_code.as_str()) {
            self.set_status(TrainStatus::Waiting, ctx);
            return;
        }
        let place_code = line.place_code.clone();
        match self.status {
            TrainStatus::Running | TrainStatus::Waiting => {
                self.set_status(TrainStatus::Stopped, ctx);
                self.stopped_time = 0.0;
                info!("{} stopped at {place_code}", self.id);
                ctx.emit(TrainEvent::StoppedAtStation { train: self.id, place_code });
            }
            TrainStatus::Stopped => {
                let held = line.scheduled_departure.is_none_or(|dep| dep > ctx.now)
                    || self.stopped_time < self.minimum_stop_time;
                if held {
                    self.stopped_time += dt;
                } else {
                    self.depart(place_code, ctx);
                }
            }
            _ => {}
        }
    }

    fn depart(&mut self, place_code: String, ctx: &mut TrainContext<'_>) {
        let old_service = self.service_code.clone();
        self.jump_to_next_place(ctx);
        if self.service_code != old_service {
            let here = ctx.network.item(self.head.item).place_code();
            let first = self.next_line(ctx.services).map(|l| l.place_code.as_str());
            if here.is_some() && here == first {
                self.set_status(TrainStatus::Stopped, ctx);
                return;
            }
        } else if self.next_place_index.is_none() {
            self.set_status(TrainStatus::EndOfService, ctx);
            info!("{} reached the end of its service", self.id);
            return;
        }
        self.set_status(TrainStatus::Running, ctx);
        info!("{} departed from {place_code}", self.id);
        ctx.emit(TrainEvent::DepartedFromStation { train: self.id, place_code });
    }

    /// Change status, enforcing the lifecycle rules.
    ///
    /// An inactive train may only become RUNNING or STOPPED, after which its
    /// status is immediately re-derived.  OUT zeroes the speed.  Returns
    /// `false` if the change was not allowed.
    pub fn set_status(&mut self, status: TrainStatus, ctx: &mut TrainContext<'_>) -> bool {
        if self.status == TrainStatus::Inactive {
            if !matches!(status, TrainStatus::Running | TrainStatus::Stopped) {
                return false;
            }
            self.change_status(status, ctx);
            self.update_status(0.0, ctx);
            return true;
        }
        if status == TrainStatus::Out {
            self.speed = 0.0;
            self.acceleration = 0.0;
        }
        self.change_status(status, ctx);
        true
    }

    fn change_status(&mut self, status: TrainStatus, ctx: &mut TrainContext<'_>) {
        if status == self.status {
            return;
        }
        debug!("{} {:?} -> {:?}", self.id, self.status, status);
        ctx.emit(TrainEvent::StatusChanged { train: self.id, from: self.status, to: status });
        self.status = status;
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Enter the area if the activation window is open.
    pub fn activate(&mut self, ctx: &mut TrainContext<'_>) {
        if self.status != TrainStatus::Inactive || self.held {
            return;
        }
        let effective = self.appear_time.add_secs(self.initial_delay);
        let earliest = ctx.start_time.add_secs(-OBSOLETE_BEFORE_START_SECS);
        if !(earliest <= effective && effective < ctx.now) {
            return;
        }
        self.speed = self.initial_speed;
        self.set_berth_ahead(ctx);

        let has_lines = self.current_service(ctx.services).is_some_and(|s| !s.lines.is_empty());
        self.next_place_index = has_lines.then_some(0);
        let status = if self.stopped_time != 0.0 || self.service_code.is_none() {
            TrainStatus::Stopped
        } else {
            TrainStatus::Running
        };
        self.set_status(status, ctx);
        self.draw_train(0.0, ctx);
        self.execute_actions(0.0, ctx);

        let service = self.service_code.as_deref().unwrap_or("-");
        if self.initial_delay.abs() < 60.0 {
            info!("{} ({service}) entered the area on time", self.id);
        } else {
            let minutes = (self.initial_delay / 60.0).floor().abs();
            let late = if self.initial_delay > 0.0 { "late" } else { "early" };
            info!("{} ({service}) entered the area {minutes} minutes {late}", self.id);
        }
    }

    /// Turn the train around in place.  The train must be stopped.
    pub fn reverse(&mut self, ctx: &mut TrainContext<'_>) -> TrainResult<()> {
        if self.speed != 0.0 {
            return Err(TrainError::NotStopped(self.id));
        }
        if let Some(signal) = find_next_signal(ctx.network, &self.head) {
            ctx.network.reset_signal_train(signal.item)?;
        }
        let tail = self.tail(ctx.network);
        self.head = tail.reversed(ctx.network);
        self.speed = 0.0;
        self.acceleration = 0.0;
        self.set_berth_ahead(ctx);
        debug!("{} reversed, head now at {}", self.id, self.head.item);
        Ok(())
    }

    /// Restart the itinerary from its first place.
    pub fn reset_service(&mut self, services: &ServiceRegistry) {
        let has_lines = self.current_service(services).is_some_and(|s| !s.lines.is_empty());
        self.next_place_index = has_lines.then_some(0);
    }

    /// Validate that the train may be split and ask the operator where.
    pub fn request_split(&self, ctx: &mut TrainContext<'_>) -> TrainResult<()> {
        self.check_splittable()?;
        ctx.emit(TrainEvent::SplitRequested { train: self.id });
        Ok(())
    }

    /// Put this train in the berth of the next facing signal.
    pub(crate) fn set_berth_ahead(&self, ctx: &mut TrainContext<'_>) {
        if let Some(signal) = find_next_signal(ctx.network, &self.head) {
            // `find_next_signal` only yields signal items.
            let _ = ctx.network.set_signal_train(signal.item, self.id);
        }
    }

    pub(crate) fn resample_minimum_stop_time(&mut self, options: &SimOptions) {
        self.minimum_stop_time = options.default_minimum_stop_time.sample(self.rng.inner());
    }
}
