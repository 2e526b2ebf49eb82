//! Flat row types written by every backend.

use rail_core::{SimTime, Tick};
use rail_train::{Train, TrainEvent};

/// One train at one snapshot tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainSnapshotRow {
    pub tick:             u64,
    pub time:             SimTime,
    pub train_id:         u32,
    /// Empty when the train has no service.
    pub service_code:     String,
    pub train_type:       String,
    pub status:           String,
    pub speed:            f64,
    pub acceleration:     f64,
    pub head_item:        u32,
    pub head_offset:      f64,
    pub next_place_index: Option<usize>,
}

impl TrainSnapshotRow {
    pub fn from_train(tick: Tick, time: SimTime, train: &Train) -> Self {
        let head = train.head();
        Self {
            tick:             tick.0,
            time,
            train_id:         train.id().0,
            service_code:     train.service_code().unwrap_or_default().to_owned(),
            train_type:       train.train_type().code.clone(),
            status:           format!("{:?}", train.status()),
            speed:            train.speed(),
            acceleration:     train.acceleration(),
            head_item:        head.item.0,
            head_offset:      head.offset,
            next_place_index: train.next_place_index(),
        }
    }
}

/// One train event.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainEventRow {
    pub tick:     u64,
    pub time:     SimTime,
    pub train_id: u32,
    /// Event kind, e.g. `stopped_at_station`.
    pub event:    String,
    pub detail:   String,
}

impl TrainEventRow {
    pub fn from_event(tick: Tick, time: SimTime, event: &TrainEvent) -> Self {
        Self {
            tick:     tick.0,
            time,
            train_id: event.train().0,
            event:    event.kind().to_owned(),
            detail:   event.detail(),
        }
    }
}
