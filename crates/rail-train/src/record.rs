//! Persisted form of a train.
//!
//! ```json
//! { "type": "Train", "serviceCode": "S1", "trainTypeCode": "EMU",
//!   "status": "STOPPED", "speed": 0.0, "initialSpeed": 0.0,
//!   "trainHead": { "item": 3, "previous": 2, "offset": 120.0 },
//!   "appearTime": "06:00:00", "initialDelay": [[0, 0, 100]],
//!   "nextPlaceIndex": 1, "stoppedTime": 12.5 }
//! ```

use serde::{Deserialize, Serialize};

use rail_core::{DurationProba, SimTime, TrainId, TrainRng};
use rail_track::Position;

use crate::{SignalActionTracker, Train, TrainContext, TrainError, TrainResult, TrainStatus};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Train", rename_all = "camelCase")]
pub struct TrainRecord {
    #[serde(default)]
    pub service_code:     Option<String>,
    pub train_type_code:  String,
    #[serde(default)]
    pub status:           TrainStatus,
    #[serde(default)]
    pub speed:            f64,
    #[serde(default)]
    pub initial_speed:    f64,
    pub train_head:       Position,
    pub appear_time:      SimTime,
    /// Null falls back to the default entry delay option.
    #[serde(default)]
    pub initial_delay:    DurationProba,
    #[serde(default)]
    pub next_place_index: Option<usize>,
    #[serde(default)]
    pub stopped_time:     f64,
}

impl TrainRecord {
    /// Build the live train with id `id`.
    ///
    /// The entry delay and first minimum stop time are sampled here from
    /// the train's own RNG stream.  `next_place_index` is kept only if it
    /// names a line of the assigned service.
    pub fn into_train(self, id: TrainId, ctx: &TrainContext<'_>) -> TrainResult<Train> {
        let train_type = ctx
            .types
            .get(&self.train_type_code)
            .cloned()
            .ok_or(TrainError::UnknownTrainType(self.train_type_code))?;
        let service = match &self.service_code {
            Some(code) => Some(
                ctx.services.get(code).ok_or_else(|| TrainError::UnknownService(code.clone()))?,
            ),
            None => None,
        };
        ctx.network.check_position(&self.train_head)?;

        let mut rng = TrainRng::new(ctx.seed, id);
        let initial_delay = if self.initial_delay.is_null() {
            ctx.options.default_delay_at_entry.sample(rng.inner())
        } else {
            self.initial_delay.sample(rng.inner())
        };
        let minimum_stop_time = ctx.options.default_minimum_stop_time.sample(rng.inner());
        let next_place_index = service
            .and_then(|s| self.next_place_index.filter(|&i| i < s.lines.len()));
        let speed = if self.status == TrainStatus::Out { 0.0 } else { self.speed };

        Ok(Train {
            id,
            train_type,
            service_code: self.service_code,
            status: self.status,
            speed,
            acceleration: 0.0,
            initial_speed: self.initial_speed,
            head: self.train_head,
            appear_time: self.appear_time,
            initial_delay_proba: self.initial_delay,
            initial_delay,
            next_place_index,
            stopped_time: self.stopped_time,
            minimum_stop_time,
            signals: SignalActionTracker::default(),
            shunting: false,
            held: false,
            rng,
        })
    }
}

impl Train {
    /// The record this train would be saved as at time `now`.
    ///
    /// Trains that have not entered keep their configured appearance; trains
    /// on the network are saved as appearing now, without delay; trains that
    /// have left are saved stopped at midnight.
    pub fn to_record(&self, now: SimTime) -> TrainRecord {
        let (speed, appear_time, initial_delay) = match self.status {
            TrainStatus::Inactive => {
                (self.initial_speed, self.appear_time, self.initial_delay_proba.clone())
            }
            TrainStatus::Out => (0.0, SimTime::MIDNIGHT, DurationProba::fixed(0.0)),
            _ => (self.speed, now, DurationProba::fixed(0.0)),
        };
        TrainRecord {
            service_code:     self.service_code.clone(),
            train_type_code:  self.train_type.code.clone(),
            status:           self.status,
            speed,
            initial_speed:    self.initial_speed,
            train_head:       self.head,
            appear_time,
            initial_delay,
            next_place_index: self.next_place_index,
            stopped_time:     self.stopped_time,
        }
    }
}
