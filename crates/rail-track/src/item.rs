//! Track items: the nodes of the track network.
//!
//! Every item has two ends.  A line or signal is linked to a neighbour at
//! each end; a network end has a neighbour at `ends[0]` only, and `ends[1]`
//! is the edge of the simulated area.

use rail_core::TrackItemId;

use crate::signal::SignalState;

/// Closed set of item kinds.  Scanning code matches on capabilities
/// (`is_end`, `is_signal`, `place_code`) rather than on the variant.
#[derive(Clone, PartialEq, Debug)]
pub enum TrackItemKind {
    Line,
    Signal(SignalState),
    End,
}

#[derive(Clone, PartialEq, Debug)]
pub struct TrackItem {
    pub id:          TrackItemId,
    pub kind:        TrackItemKind,
    /// Neighbours at the start (`0`) and finish (`1`) of the item.
    pub ends:        [Option<TrackItemId>; 2],
    /// Length in metres.  Always 0 for network ends.
    pub real_length: f64,
    /// Speed limit in m/s.
    pub max_speed:   f64,
    pub place_code:  Option<String>,
    pub track_code:  Option<String>,
}

impl TrackItem {
    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self.kind, TrackItemKind::End)
    }

    #[inline]
    pub fn is_signal(&self) -> bool {
        matches!(self.kind, TrackItemKind::Signal(_))
    }

    pub fn signal(&self) -> Option<&SignalState> {
        match &self.kind {
            TrackItemKind::Signal(state) => Some(state),
            _ => None,
        }
    }

    pub fn signal_mut(&mut self) -> Option<&mut SignalState> {
        match &mut self.kind {
            TrackItemKind::Signal(state) => Some(state),
            _ => None,
        }
    }

    pub fn place_code(&self) -> Option<&str> {
        self.place_code.as_deref().filter(|p| !p.is_empty())
    }

    /// The neighbour reached when travelling through this item after
    /// arriving from `from`.  `None` past the edge of the network.
    pub fn other_end(&self, from: Option<TrackItemId>) -> Option<TrackItemId> {
        if from == self.ends[0] {
            self.ends[1]
        } else if from == self.ends[1] {
            self.ends[0]
        } else {
            None
        }
    }

    /// `true` if `from` is one of this item's neighbours (or the outer edge
    /// of a network end).
    pub fn links(&self, from: Option<TrackItemId>) -> bool {
        from == self.ends[0] || from == self.ends[1]
    }
}
