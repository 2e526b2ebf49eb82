//! Unit tests for rail-track.

use rail_core::{TrackItemId, TrainId};

use crate::{Position, SignalAspect, TrackNetwork, TrackNetworkBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// West end — 100 m line — signal — 200 m platform "STN" — 300 m line — east end.
///
/// Ids: 0 west end, 1 line, 2 signal, 3 platform, 4 line, 5 east end.
fn straight_line() -> TrackNetwork {
    let mut b = TrackNetworkBuilder::new();
    let west = b.add_end();
    let l1 = b.add_line(100.0);
    let sig = b.add_signal(false);
    let plat = b.add_platform(200.0, "STN", "1");
    let l2 = b.add_line(300.0);
    let east = b.add_end();
    for (x, y) in [(west, l1), (l1, sig), (sig, plat), (plat, l2), (l2, east)] {
        b.connect(x, y).unwrap();
    }
    b.build().unwrap()
}

fn eastbound(item: u32, previous: u32, offset: f64) -> Position {
    Position::new(TrackItemId(item), Some(TrackItemId(previous)), offset)
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::TrackError;

    #[test]
    fn builds_with_default_speed() {
        let net = straight_line();
        assert_eq!(net.len(), 6);
        assert_eq!(net.item(TrackItemId(1)).max_speed, 18.0);
        assert!(net.item(TrackItemId(0)).is_end());
        assert!(net.item(TrackItemId(2)).is_signal());
        assert_eq!(net.item(TrackItemId(3)).place_code(), Some("STN"));
    }

    #[test]
    fn dangling_line_is_rejected() {
        let mut b = TrackNetworkBuilder::new();
        let end = b.add_end();
        let line = b.add_line(10.0);
        b.connect(end, line).unwrap();
        assert!(matches!(b.build(), Err(TrackError::Unconnected { missing: 1, .. })));
    }

    #[test]
    fn end_accepts_a_single_link() {
        let mut b = TrackNetworkBuilder::new();
        let end = b.add_end();
        let l1 = b.add_line(10.0);
        let l2 = b.add_line(10.0);
        b.connect(end, l1).unwrap();
        assert!(matches!(b.connect(end, l2), Err(TrackError::TooManyLinks(_))));
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut b = TrackNetworkBuilder::new();
        let a = b.add_end();
        let l = b.add_line(-1.0);
        let c = b.add_end();
        b.connect(a, l).unwrap();
        b.connect(l, c).unwrap();
        assert!(matches!(b.build(), Err(TrackError::InvalidValue { what: "length", .. })));
    }
}

// ── Position ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn advance_within_item() {
        let net = straight_line();
        let p = eastbound(3, 2, 10.0).advanced(&net, 50.0);
        assert_eq!(p, eastbound(3, 2, 60.0));
    }

    #[test]
    fn advance_crosses_zero_length_signal() {
        let net = straight_line();
        let p = eastbound(1, 0, 90.0).advanced(&net, 30.0);
        assert_eq!(p.item, TrackItemId(3));
        assert_eq!(p.previous, Some(TrackItemId(2)));
        assert!((p.offset - 20.0).abs() < 1e-9);
    }

    #[test]
    fn advance_past_edge_keeps_growing_on_end() {
        let net = straight_line();
        let p = eastbound(4, 3, 290.0).advanced(&net, 40.0);
        assert_eq!(p.item, TrackItemId(5));
        assert!(p.is_out(&net));
        assert!(p.is_exiting(&net));
        assert!((p.offset - 30.0).abs() < 1e-9);
    }

    #[test]
    fn retreat_crosses_back_and_stops_outside() {
        let net = straight_line();
        let tail = eastbound(3, 2, 20.0).retreated(&net, 50.0);
        assert_eq!(tail, eastbound(1, 0, 70.0));

        let entering = eastbound(1, 0, 40.0).retreated(&net, 100.0);
        assert_eq!(entering.item, TrackItemId(0));
        assert_eq!(entering.previous, None);
        assert!((entering.offset + 60.0).abs() < 1e-9);
        assert!(entering.is_out(&net));
        assert!(!entering.is_exiting(&net));
    }

    #[test]
    fn entering_position_advances_into_network() {
        let net = straight_line();
        let p = Position::new(TrackItemId(0), None, -10.0).advanced(&net, 25.0);
        assert_eq!(p, eastbound(1, 0, 15.0));
    }

    #[test]
    fn reversed_flips_direction_and_offset() {
        let net = straight_line();
        let r = eastbound(3, 2, 50.0).reversed(&net);
        assert_eq!(r, Position::new(TrackItemId(3), Some(TrackItemId(4)), 150.0));
        assert_eq!(r.reversed(&net), eastbound(3, 2, 50.0));
    }

    #[test]
    fn distance_between_positions() {
        let net = straight_line();
        let a = eastbound(1, 0, 60.0);
        let b = eastbound(3, 2, 20.0);
        assert_eq!(a.distance_to(&net, &b), Some(60.0));
        assert_eq!(b.distance_to(&net, &a), None);
        assert_eq!(a.distance_to(&net, &eastbound(1, 0, 70.0)), Some(10.0));
    }

    #[test]
    fn items_to_lists_crossed_items() {
        let net = straight_line();
        let ids = eastbound(1, 0, 60.0).items_to(&net, &eastbound(4, 3, 5.0));
        assert_eq!(ids, vec![TrackItemId(1), TrackItemId(2), TrackItemId(3), TrackItemId(4)]);
        assert_eq!(eastbound(3, 2, 1.0).items_to(&net, &eastbound(3, 2, 9.0)), vec![TrackItemId(3)]);
    }

    #[test]
    fn check_position_rejects_unlinked_previous() {
        let net = straight_line();
        assert!(net.check_position(&eastbound(3, 2, 0.0)).is_ok());
        assert!(net.check_position(&eastbound(3, 1, 0.0)).is_err());
        assert!(net.check_position(&eastbound(99, 2, 0.0)).is_err());
    }
}

// ── Signals ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod signal_tests {
    use super::*;
    use crate::{SignalAction, Target, TrackEvent};

    #[test]
    fn stop_aspect_does_not_mean_proceed() {
        assert!(!SignalAspect::stop().means_proceed());
        assert!(SignalAspect::clear().means_proceed());
        assert!(SignalAspect::caution(8.0).means_proceed());
    }

    #[test]
    fn signal_faces_one_direction() {
        let net = straight_line();
        let east = eastbound(2, 1, 0.0);
        let west = Position::new(TrackItemId(2), Some(TrackItemId(3)), 0.0);
        assert!(net.is_signal_facing(&east));
        assert!(!net.is_signal_facing(&west));
        assert!(net.is_red_signal(&east));
    }

    #[test]
    fn aspect_can_be_changed() {
        let mut net = straight_line();
        let aspect = SignalAspect::new("SLOW", vec![SignalAction::new(Target::Asap, 5.0)]);
        net.set_signal_aspect(TrackItemId(2), aspect.clone()).unwrap();
        assert_eq!(net.signal(TrackItemId(2)).unwrap().aspect, aspect);
        assert!(net.set_signal_aspect(TrackItemId(1), aspect).is_err());
    }

    #[test]
    fn head_entering_releases_berth() {
        let mut net = straight_line();
        net.set_signal_train(TrackItemId(2), TrainId(4)).unwrap();
        net.train_head_enters(TrackItemId(2), TrainId(4));
        assert_eq!(net.signal(TrackItemId(2)).unwrap().train_id, None);
        let events = net.drain_events();
        assert!(events.contains(&TrackEvent::BerthCleared { signal: TrackItemId(2), train: TrainId(4) }));
        assert!(net.drain_events().is_empty());
    }
}

// ── Occupation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy_tests {
    use super::*;

    #[test]
    fn register_replaces_previous_interval() {
        let mut net = straight_line();
        net.register_train(TrackItemId(3), TrainId(0), 0.0, 50.0);
        net.register_train(TrackItemId(3), TrainId(0), 10.0, 60.0);
        let occ = net.occupations(TrackItemId(3));
        assert_eq!(occ.len(), 1);
        assert_eq!((occ[0].from, occ[0].to), (10.0, 60.0));
    }

    #[test]
    fn ends_are_never_registered() {
        let mut net = straight_line();
        net.register_train(TrackItemId(5), TrainId(0), 0.0, 5.0);
        assert!(net.occupations(TrackItemId(5)).is_empty());
    }

    #[test]
    fn distance_to_train_ahead_on_item() {
        let mut net = straight_line();
        net.register_train(TrackItemId(3), TrainId(1), 120.0, 180.0);
        let pos = eastbound(3, 2, 20.0);
        assert_eq!(net.distance_to_train_end(&pos, TrainId(0)), Some(100.0));
        assert_eq!(net.distance_to_train_end(&pos, TrainId(1)), None);
        // Behind us.
        assert_eq!(net.distance_to_train_end(&eastbound(3, 2, 190.0), TrainId(0)), None);
    }

    #[test]
    fn distance_to_train_in_reverse_direction() {
        let mut net = straight_line();
        net.register_train(TrackItemId(3), TrainId(1), 20.0, 80.0);
        let westbound = Position::new(TrackItemId(3), Some(TrackItemId(4)), 50.0);
        // Train spans 120..180 in westbound coordinates.
        assert_eq!(net.distance_to_train_end(&westbound, TrainId(0)), Some(70.0));
    }

    #[test]
    fn release_clears_every_item() {
        let mut net = straight_line();
        net.register_train(TrackItemId(1), TrainId(2), 0.0, 100.0);
        net.register_train(TrackItemId(3), TrainId(2), 0.0, 10.0);
        assert_eq!(net.items_occupied_by(TrainId(2)), vec![TrackItemId(1), TrackItemId(3)]);
        net.release_train(TrainId(2));
        assert!(net.items_occupied_by(TrainId(2)).is_empty());
    }
}
