//! Forward scans along the direction of travel.
//!
//! All scans start from a train's head, which may still be entering from a
//! network end, and stop at the far edge of the network or once the horizon `max_distance` is reached.  Red signals block the
//! station and train-ahead scans: whatever lies beyond them is handled by
//! the signal's own actions.

use rail_core::TrainId;
use rail_track::{Position, TrackNetwork};

/// Position of the next signal facing the direction of travel, strictly
/// beyond `from`'s item.
pub fn find_next_signal(net: &TrackNetwork, from: &Position) -> Option<Position> {
    if from.is_exiting(net) {
        return None;
    }
    let mut cur = from.next(net)?;
    for _ in 0..net.len() {
        if net.item(cur.item).is_end() {
            return None;
        }
        if net.is_signal_facing(&cur) {
            return Some(cur);
        }
        cur = cur.next(net)?;
    }
    None
}

/// Distance from `head` to the far end of the first item carrying
/// `place_code`, counting the head's own item.
pub fn distance_to_next_stop(
    net:          &TrackNetwork,
    head:         &Position,
    place_code:   &str,
    max_distance: f64,
) -> Option<f64> {
    let mut pos = *head;
    let mut distance = head.remaining(net);
    for _ in 0..=net.len() {
        let item = net.item(pos.item);
        if pos.is_exiting(net) || distance >= max_distance {
            break;
        }
        if net.is_red_signal(&pos) {
            return None;
        }
        if item.place_code() == Some(place_code) {
            return Some(distance);
        }
        pos = pos.next(net)?;
        distance += net.item(pos.item).real_length;
    }
    None
}

/// Distance from `head` to the nearest end of another train ahead.
pub fn distance_to_next_train(
    net:          &TrackNetwork,
    head:         &Position,
    train:        TrainId,
    max_distance: f64,
) -> Option<f64> {
    let mut pos = *head;
    let mut distance = 0.0;
    for step in 0..=net.len() {
        let item = net.item(pos.item);
        if pos.is_exiting(net) || distance >= max_distance {
            break;
        }
        if net.is_red_signal(&pos) {
            return None;
        }
        if let Some(d) = net.distance_to_train_end(&pos, train) {
            return Some(distance + d);
        }
        distance += if step == 0 { item.real_length - head.offset } else { item.real_length };
        pos = pos.next(net)?;
    }
    None
}

/// The first item ahead whose limit is below `current_max - braking`,
/// with the distance to its start.
pub fn next_speed_limit(
    net:          &TrackNetwork,
    head:         &Position,
    current_max:  f64,
    braking:      f64,
    max_distance: f64,
) -> Option<(f64, f64)> {
    let mut pos = *head;
    let mut distance = head.remaining(net);
    for _ in 0..=net.len() {
        if pos.is_exiting(net) || distance >= max_distance {
            break;
        }
        pos = pos.next(net)?;
        let item = net.item(pos.item);
        if item.max_speed < current_max - braking {
            return Some((item.max_speed, distance));
        }
        distance += item.real_length;
    }
    None
}
