//! Which trains cover which stretch of each item.
//!
//! Intervals are stored in item-forward coordinates (`0` at `ends[0]`,
//! `real_length` at `ends[1]`) so that trains running in either direction
//! can be compared.

use rail_core::{TrackItemId, TrainId};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Occupation {
    pub train: TrainId,
    pub from:  f64,
    pub to:    f64,
}

/// Per-item occupation lists, indexed by `TrackItemId`.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    by_item: Vec<Vec<Occupation>>,
}

impl Occupancy {
    pub fn new(item_count: usize) -> Self {
        Self { by_item: vec![Vec::new(); item_count] }
    }

    /// Record that `train` covers `[from, to]` of `item`, replacing any
    /// earlier interval for the same train.
    pub fn register(&mut self, item: TrackItemId, train: TrainId, from: f64, to: f64) {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let list = &mut self.by_item[item.index()];
        match list.iter_mut().find(|o| o.train == train) {
            Some(o) => {
                o.from = from;
                o.to = to;
            }
            None => list.push(Occupation { train, from, to }),
        }
    }

    /// Returns `true` if `train` was registered on `item`.
    pub fn unregister(&mut self, item: TrackItemId, train: TrainId) -> bool {
        let list = &mut self.by_item[item.index()];
        let before = list.len();
        list.retain(|o| o.train != train);
        list.len() != before
    }

    /// Remove `train` from every item.
    pub fn release(&mut self, train: TrainId) {
        for list in &mut self.by_item {
            list.retain(|o| o.train != train);
        }
    }

    pub fn on_item(&self, item: TrackItemId) -> &[Occupation] {
        &self.by_item[item.index()]
    }

    /// Items currently covered by `train`.
    pub fn items_of(&self, train: TrainId) -> Vec<TrackItemId> {
        self.by_item
            .iter()
            .enumerate()
            .filter(|(_, list)| list.iter().any(|o| o.train == train))
            .map(|(i, _)| TrackItemId(i as u32))
            .collect()
    }
}
