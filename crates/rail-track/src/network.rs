//! Track network representation and builder.
//!
//! # Data layout
//!
//! Items live in a `Vec` indexed by `TrackItemId`.  Links are stored on the
//! items themselves (`ends`), so walking the network is a sequence of
//! indexed lookups.  Occupation is a parallel per-item table.
//!
//! # Side effects
//!
//! Trains report crossings through [`TrackNetwork::train_head_enters`] and
//! [`TrackNetwork::train_tail_leaves`].  These update signal berths and
//! queue [`TrackEvent`]s, which the simulation driver drains once per tick.

use log::trace;

use rail_core::{TrackItemId, TrainId};

use crate::{
    Occupancy, Occupation, Position, SignalAspect, SignalState, TrackError, TrackItem,
    TrackItemKind, TrackResult,
};

/// Default speed limit (m/s) for items built without one.
pub const DEFAULT_MAX_SPEED: f64 = 18.0;

// ── TrackEvent ────────────────────────────────────────────────────────────────

/// Something that happened on the network while trains advanced.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackEvent {
    HeadEntered { item: TrackItemId, train: TrainId },
    TailLeft    { item: TrackItemId, train: TrainId },
    BerthSet    { signal: TrackItemId, train: TrainId },
    BerthCleared { signal: TrackItemId, train: TrainId },
}

// ── TrackNetwork ──────────────────────────────────────────────────────────────

/// The track graph, signal state, and occupation table.
///
/// Do not construct directly; use [`TrackNetworkBuilder`].
#[derive(Clone, Debug)]
pub struct TrackNetwork {
    items:     Vec<TrackItem>,
    occupancy: Occupancy,
    events:    Vec<TrackEvent>,
}

impl TrackNetwork {
    // ── Items ─────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// # Panics
    /// Panics if `id` is not an item of this network.  Ids handed out by the
    /// builder and positions checked with [`check_position`](Self::check_position)
    /// are always valid.
    #[inline]
    pub fn item(&self, id: TrackItemId) -> &TrackItem {
        &self.items[id.index()]
    }

    pub fn get(&self, id: TrackItemId) -> Option<&TrackItem> {
        self.items.get(id.index())
    }

    pub fn items(&self) -> impl Iterator<Item = &TrackItem> {
        self.items.iter()
    }

    /// Verify that `pos` names an existing item entered from one of its
    /// neighbours.
    pub fn check_position(&self, pos: &Position) -> TrackResult<()> {
        let item = self.get(pos.item).ok_or(TrackError::ItemNotFound(pos.item))?;
        if let Some(prev) = pos.previous {
            self.get(prev).ok_or(TrackError::ItemNotFound(prev))?;
        }
        if !item.links(pos.previous) {
            return Err(TrackError::InvalidPosition(pos.item));
        }
        Ok(())
    }

    // ── Signals ───────────────────────────────────────────────────────────

    pub fn signal(&self, id: TrackItemId) -> TrackResult<&SignalState> {
        self.get(id)
            .ok_or(TrackError::ItemNotFound(id))?
            .signal()
            .ok_or(TrackError::NotASignal(id))
    }

    fn signal_mut(&mut self, id: TrackItemId) -> TrackResult<&mut SignalState> {
        self.items
            .get_mut(id.index())
            .ok_or(TrackError::ItemNotFound(id))?
            .signal_mut()
            .ok_or(TrackError::NotASignal(id))
    }

    /// Entry point for the external signalling layer.
    pub fn set_signal_aspect(&mut self, id: TrackItemId, aspect: SignalAspect) -> TrackResult<()> {
        self.signal_mut(id)?.aspect = aspect;
        Ok(())
    }

    /// Put `train` in the berth of signal `id`.
    pub fn set_signal_train(&mut self, id: TrackItemId, train: TrainId) -> TrackResult<()> {
        self.signal_mut(id)?.train_id = Some(train);
        self.events.push(TrackEvent::BerthSet { signal: id, train });
        Ok(())
    }

    /// Empty the berth of signal `id`.
    pub fn reset_signal_train(&mut self, id: TrackItemId) -> TrackResult<()> {
        let previous = self.signal_mut(id)?.train_id.take();
        if let Some(train) = previous {
            self.events.push(TrackEvent::BerthCleared { signal: id, train });
        }
        Ok(())
    }

    /// `true` if `pos` is on a signal that faces its direction of travel.
    pub fn is_signal_facing(&self, pos: &Position) -> bool {
        self.signal_facing(pos).is_some()
    }

    /// The signal at `pos`, if it faces the direction of travel.
    pub fn signal_facing(&self, pos: &Position) -> Option<&SignalState> {
        let item = self.item(pos.item);
        let state = item.signal()?;
        ((pos.previous == item.ends[0]) ^ state.reverse).then_some(state)
    }

    /// `true` if `pos` is on a facing signal showing a red aspect.
    pub fn is_red_signal(&self, pos: &Position) -> bool {
        self.signal_facing(pos).is_some_and(|s| !s.aspect.means_proceed())
    }

    // ── Occupation ────────────────────────────────────────────────────────

    /// Record the stretch of `item` covered by `train`.  Network ends are
    /// never registered.
    pub fn register_train(&mut self, item: TrackItemId, train: TrainId, from: f64, to: f64) {
        if self.item(item).is_end() {
            return;
        }
        self.occupancy.register(item, train, from, to);
    }

    pub fn unregister_train(&mut self, item: TrackItemId, train: TrainId) {
        self.occupancy.unregister(item, train);
    }

    /// Remove `train` from every item.
    pub fn release_train(&mut self, train: TrainId) {
        self.occupancy.release(train);
    }

    pub fn occupations(&self, item: TrackItemId) -> &[Occupation] {
        self.occupancy.on_item(item)
    }

    pub fn items_occupied_by(&self, train: TrainId) -> Vec<TrackItemId> {
        self.occupancy.items_of(train)
    }

    /// Distance from `pos` to the nearest end of another train ahead on the
    /// same item.  `None` if no other train is ahead on this item.
    pub fn distance_to_train_end(&self, pos: &Position, exclude: TrainId) -> Option<f64> {
        let item = self.item(pos.item);
        if item.is_end() {
            return None;
        }
        let forward = pos.is_forward(self);
        let len = item.real_length;
        self.occupancy
            .on_item(pos.item)
            .iter()
            .filter(|o| o.train != exclude)
            .filter_map(|o| {
                let (near, far) = if forward { (o.from, o.to) } else { (len - o.to, len - o.from) };
                (far >= pos.offset).then(|| (near - pos.offset).max(0.0))
            })
            .min_by(f64::total_cmp)
    }

    // ── Crossing side effects ─────────────────────────────────────────────

    /// A train's head has entered `item`.  Passing a signal releases the
    /// berth the train held on it.
    pub fn train_head_enters(&mut self, item: TrackItemId, train: TrainId) {
        trace!("{train} head enters {item}");
        if let Some(state) = self.items[item.index()].signal_mut() {
            if state.train_id == Some(train) {
                state.train_id = None;
                self.events.push(TrackEvent::BerthCleared { signal: item, train });
            }
        }
        self.events.push(TrackEvent::HeadEntered { item, train });
    }

    /// A train's tail has left `item`.
    pub fn train_tail_leaves(&mut self, item: TrackItemId, train: TrainId) {
        trace!("{train} tail leaves {item}");
        self.events.push(TrackEvent::TailLeft { item, train });
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<TrackEvent> {
        std::mem::take(&mut self.events)
    }
}

// ── TrackNetworkBuilder ───────────────────────────────────────────────────────

/// Construct a [`TrackNetwork`] incrementally, then call [`build`](Self::build).
///
/// `connect(a, b)` fills the first free end of `a` and of `b`, so items
/// should be connected in the order they are laid out.  A signal applies to
/// trains running from its first-connected neighbour to its second unless
/// it was added with `reverse = true`.
///
/// # Example
///
/// ```
/// use rail_track::TrackNetworkBuilder;
///
/// let mut b = TrackNetworkBuilder::new();
/// let west  = b.add_end();
/// let line  = b.add_line(500.0);
/// let sig   = b.add_signal(false);
/// let plat  = b.add_platform(200.0, "STN", "1");
/// let east  = b.add_end();
/// for (x, y) in [(west, line), (line, sig), (sig, plat), (plat, east)] {
///     b.connect(x, y).unwrap();
/// }
/// let net = b.build().unwrap();
/// assert_eq!(net.len(), 5);
/// ```
pub struct TrackNetworkBuilder {
    items:             Vec<RawItem>,
    default_max_speed: f64,
}

struct RawItem {
    kind:       TrackItemKind,
    ends:       [Option<TrackItemId>; 2],
    length:     f64,
    max_speed:  Option<f64>,
    place_code: Option<String>,
    track_code: Option<String>,
}

impl Default for TrackNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackNetworkBuilder {
    pub fn new() -> Self {
        Self { items: Vec::new(), default_max_speed: DEFAULT_MAX_SPEED }
    }

    /// Speed limit for network ends and for items without their own.
    pub fn default_max_speed(mut self, speed: f64) -> Self {
        self.default_max_speed = speed;
        self
    }

    fn push(&mut self, kind: TrackItemKind, length: f64) -> TrackItemId {
        let id = TrackItemId(self.items.len() as u32);
        self.items.push(RawItem {
            kind,
            ends: [None, None],
            length,
            max_speed: None,
            place_code: None,
            track_code: None,
        });
        id
    }

    pub fn add_line(&mut self, length: f64) -> TrackItemId {
        self.push(TrackItemKind::Line, length)
    }

    /// A line item belonging to a station platform.
    pub fn add_platform(&mut self, length: f64, place_code: &str, track_code: &str) -> TrackItemId {
        let id = self.push(TrackItemKind::Line, length);
        let raw = &mut self.items[id.index()];
        raw.place_code = Some(place_code.to_owned());
        raw.track_code = Some(track_code.to_owned());
        id
    }

    /// A zero-length signal item showing the stop aspect.
    pub fn add_signal(&mut self, reverse: bool) -> TrackItemId {
        self.push(TrackItemKind::Signal(SignalState::new(reverse)), 0.0)
    }

    pub fn add_end(&mut self) -> TrackItemId {
        self.push(TrackItemKind::End, 0.0)
    }

    pub fn set_max_speed(&mut self, item: TrackItemId, speed: f64) -> TrackResult<()> {
        let raw = self.items.get_mut(item.index()).ok_or(TrackError::ItemNotFound(item))?;
        raw.max_speed = Some(speed);
        Ok(())
    }

    pub fn set_place(&mut self, item: TrackItemId, place_code: &str) -> TrackResult<()> {
        let raw = self.items.get_mut(item.index()).ok_or(TrackError::ItemNotFound(item))?;
        raw.place_code = Some(place_code.to_owned());
        Ok(())
    }

    /// Link `a` and `b` through their first free ends.
    pub fn connect(&mut self, a: TrackItemId, b: TrackItemId) -> TrackResult<()> {
        let slot_a = self.free_slot(a)?;
        let slot_b = self.free_slot(b)?;
        self.items[a.index()].ends[slot_a] = Some(b);
        self.items[b.index()].ends[slot_b] = Some(a);
        Ok(())
    }

    fn free_slot(&self, id: TrackItemId) -> TrackResult<usize> {
        let raw = self.items.get(id.index()).ok_or(TrackError::ItemNotFound(id))?;
        let slots = if matches!(raw.kind, TrackItemKind::End) { 1 } else { 2 };
        raw.ends[..slots]
            .iter()
            .position(Option::is_none)
            .ok_or(TrackError::TooManyLinks(id))
    }

    /// Validate links and values and return the finished network.
    pub fn build(self) -> TrackResult<TrackNetwork> {
        let default_max_speed = self.default_max_speed;
        let count = self.items.len();
        let mut items = Vec::with_capacity(count);

        for (i, raw) in self.items.into_iter().enumerate() {
            let id = TrackItemId(i as u32);
            let slots = if matches!(raw.kind, TrackItemKind::End) { 1 } else { 2 };
            let missing = raw.ends[..slots].iter().filter(|e| e.is_none()).count();
            if missing > 0 {
                return Err(TrackError::Unconnected { item: id, missing });
            }
            if !(raw.length.is_finite() && raw.length >= 0.0) {
                return Err(TrackError::InvalidValue { item: id, what: "length", value: raw.length });
            }
            let max_speed = raw.max_speed.unwrap_or(default_max_speed);
            if !(max_speed.is_finite() && max_speed > 0.0) {
                return Err(TrackError::InvalidValue { item: id, what: "max speed", value: max_speed });
            }
            items.push(TrackItem {
                id,
                kind:        raw.kind,
                ends:        raw.ends,
                real_length: raw.length,
                max_speed,
                place_code:  raw.place_code,
                track_code:  raw.track_code,
            });
        }

        Ok(TrackNetwork { items, occupancy: Occupancy::new(count), events: Vec::new() })
    }
}
