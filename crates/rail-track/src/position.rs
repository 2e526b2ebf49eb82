//! Positions on the track network.
//!
//! A `Position` names an item, the neighbour it was entered from
//! (`previous`), and the distance travelled into it (`offset`).  The
//! direction of travel is therefore "away from `previous`".
//!
//! Offsets normally lie in `[0, real_length]`.  Two exceptions model trains
//! that are partly outside the simulated area:
//!
//! - on a network end entered from the network (`previous` is `Some`), the
//!   offset keeps growing as a train drives out;
//! - on a network end entered from outside (`previous` is `None`), the
//!   offset is negative while a train is still entering.
//!
//! Walks are bounded by the item count, so a malformed or circular network
//! cannot make a scan run forever.

use serde::{Deserialize, Serialize};

use rail_core::TrackItemId;

use crate::TrackNetwork;

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub item:     TrackItemId,
    pub previous: Option<TrackItemId>,
    pub offset:   f64,
}

impl Position {
    pub fn new(item: TrackItemId, previous: Option<TrackItemId>, offset: f64) -> Self {
        Self { item, previous, offset }
    }

    /// `true` if this position lies on a network end.
    #[inline]
    pub fn is_out(&self, net: &TrackNetwork) -> bool {
        net.item(self.item).is_end()
    }

    /// `true` if this position lies on a network end entered from the
    /// network, i.e. heading out of the simulated area.
    #[inline]
    pub fn is_exiting(&self, net: &TrackNetwork) -> bool {
        self.previous.is_some() && self.is_out(net)
    }

    /// `true` if travel runs from the item's `ends[0]` towards `ends[1]`.
    #[inline]
    pub fn is_forward(&self, net: &TrackNetwork) -> bool {
        self.previous == net.item(self.item).ends[0]
    }

    /// Distance left before leaving the current item.
    #[inline]
    pub fn remaining(&self, net: &TrackNetwork) -> f64 {
        net.item(self.item).real_length - self.offset
    }

    /// The start of the next item in the direction of travel, or `None` when
    /// this position is heading out of the network.
    pub fn next(&self, net: &TrackNetwork) -> Option<Position> {
        let next = net.item(self.item).other_end(self.previous)?;
        Some(Position { item: next, previous: Some(self.item), offset: 0.0 })
    }

    /// The end of the previous item, still facing the direction of travel.
    pub fn step_back(&self, net: &TrackNetwork) -> Option<Position> {
        let prev = self.previous?;
        let prev_item = net.item(prev);
        Some(Position {
            item:     prev,
            previous: prev_item.other_end(Some(self.item)),
            offset:   prev_item.real_length,
        })
    }

    /// Same point, opposite direction.
    pub fn reversed(&self, net: &TrackNetwork) -> Position {
        let item = net.item(self.item);
        Position {
            item:     self.item,
            previous: item.other_end(self.previous),
            offset:   item.real_length - self.offset,
        }
    }

    /// Move `length` metres forward, crossing items as needed.
    pub fn advanced(&self, net: &TrackNetwork, length: f64) -> Position {
        let mut pos = *self;
        pos.offset += length;
        for _ in 0..=net.len() {
            let item_len = net.item(pos.item).real_length;
            if pos.offset <= item_len {
                break;
            }
            match pos.next(net) {
                Some(mut next) => {
                    next.offset = pos.offset - item_len;
                    pos = next;
                }
                None => break,
            }
        }
        pos
    }

    /// Move `length` metres backward, keeping the direction of travel.
    pub fn retreated(&self, net: &TrackNetwork, length: f64) -> Position {
        let mut pos = *self;
        pos.offset -= length;
        for _ in 0..=net.len() {
            if pos.offset >= 0.0 {
                break;
            }
            match pos.step_back(net) {
                Some(mut back) => {
                    back.offset += pos.offset;
                    pos = back;
                }
                None => break,
            }
        }
        pos
    }

    /// Distance travelled from `self` to `other`, following the direction of
    /// travel.  `None` if `other` is not ahead.
    pub fn distance_to(&self, net: &TrackNetwork, other: &Position) -> Option<f64> {
        if self.item == other.item && self.previous == other.previous && other.offset >= self.offset {
            return Some(other.offset - self.offset);
        }
        let mut distance = self.remaining(net);
        let mut cur = *self;
        for _ in 0..net.len() {
            let next = cur.next(net)?;
            if next.item == other.item && next.previous == other.previous {
                return Some(distance + other.offset);
            }
            distance += net.item(next.item).real_length;
            cur = next;
        }
        None
    }

    /// The positions at which each item from `self` up to `other.item` is
    /// entered.  The first entry is `self`.  If `other` is never reached the
    /// walk stops at the edge of the network.
    pub fn positions_to(&self, net: &TrackNetwork, other: &Position) -> Vec<Position> {
        let mut out = vec![*self];
        if self.item == other.item {
            return out;
        }
        let mut cur = *self;
        for _ in 0..net.len() {
            let Some(next) = cur.next(net) else { break };
            out.push(next);
            if next.item == other.item {
                break;
            }
            cur = next;
        }
        out
    }

    /// The items from `self.item` up to and including `other.item`.
    pub fn items_to(&self, net: &TrackNetwork, other: &Position) -> Vec<TrackItemId> {
        self.positions_to(net, other).into_iter().map(|p| p.item).collect()
    }
}
