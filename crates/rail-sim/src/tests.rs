//! Integration tests for rail-sim.

use rail_core::{DurationProba, SimConfig, SimOptions, SimTime, Tick, TrackItemId, TrainId};
use rail_schedule::{Service, ServiceLine, ServiceRegistry};
use rail_stock::{TrainType, TrainTypeRegistry, TrainTypeRegistryBuilder};
use rail_track::{Position, SignalAspect, TrackEvent, TrackNetwork, TrackNetworkBuilder};
use rail_train::{Train, TrainEvent, TrainRecord, TrainStatus};

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SIGNAL: TrackItemId = TrackItemId(2);

fn start() -> SimTime {
    SimTime::from_hms(6, 0, 0)
}

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        start_time:            start(),
        tick_secs:             1.0,
        total_ticks,
        seed:                  42,
        output_interval_ticks: 10,
        options:               SimOptions {
            default_minimum_stop_time: DurationProba::fixed(5.0),
            ..SimOptions::default()
        },
    }
}

/// West end — 400 m line — signal — 200 m platform "STN" — 300 m line — east end.
fn network() -> TrackNetwork {
    let mut b = TrackNetworkBuilder::new();
    let west = b.add_end();
    let l1 = b.add_line(400.0);
    let sig = b.add_signal(false);
    let plat = b.add_platform(200.0, "STN", "1");
    let l2 = b.add_line(300.0);
    let east = b.add_end();
    for (x, y) in [(west, l1), (l1, sig), (sig, plat), (plat, l2), (l2, east)] {
        b.connect(x, y).unwrap();
    }
    let mut net = b.build().unwrap();
    net.set_signal_aspect(SIGNAL, SignalAspect::clear()).unwrap();
    net
}

fn services() -> ServiceRegistry {
    [Service::new("S1", vec![ServiceLine::stop("STN", None, Some(SimTime::from_hms(6, 1, 0)))])]
        .into_iter()
        .collect()
}

fn types() -> TrainTypeRegistry {
    TrainTypeRegistryBuilder::new()
        .add(TrainType::new("EMU", 50.0, 30.0, 0.5, 0.5, 1.5))
        .add_composite("TWIN", "", &["EMU", "EMU"])
        .build()
        .unwrap()
}

fn record(type_code: &str, service: Option<&str>, item: u32, offset: f64) -> TrainRecord {
    TrainRecord {
        service_code:     service.map(str::to_owned),
        train_type_code:  type_code.to_owned(),
        status:           TrainStatus::Inactive,
        speed:            0.0,
        initial_speed:    0.0,
        train_head:       Position::new(TrackItemId(item), Some(TrackItemId(item - 1)), offset),
        appear_time:      start(),
        initial_delay:    DurationProba::fixed(0.0),
        next_place_index: None,
        stopped_time:     0.0,
    }
}

fn sim_with(total_ticks: u64, trains: Vec<TrainRecord>) -> Sim {
    SimBuilder::new(test_config(total_ticks), network(), services(), types())
        .trains(trains)
        .build()
        .unwrap()
}

#[derive(Default)]
struct Recorder {
    train_events: Vec<(Tick, TrainEvent)>,
    track_events: Vec<TrackEvent>,
    snapshots:    Vec<Tick>,
    ended:        Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_train_event(&mut self, tick: Tick, _time: SimTime, event: &TrainEvent) {
        self.train_events.push((tick, event.clone()));
    }

    fn on_track_event(&mut self, _tick: Tick, event: &TrackEvent) {
        self.track_events.push(event.clone());
    }

    fn on_snapshot(&mut self, tick: Tick, _time: SimTime, _trains: &[Train]) {
        self.snapshots.push(tick);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_trains_in_record_order() {
        let sim = sim_with(10, vec![record("EMU", Some("S1"), 1, 200.0), record("TWIN", None, 4, 250.0)]);
        assert_eq!(sim.trains().len(), 2);
        assert_eq!(sim.train(TrainId(1)).unwrap().train_type().code, "TWIN");
        assert!(sim.train(TrainId(2)).is_none());
    }

    #[test]
    fn invalid_tick_length_is_rejected() {
        let mut config = test_config(10);
        config.tick_secs = 0.0;
        let result = SimBuilder::new(config, network(), services(), types()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn bad_record_reports_its_index() {
        let result = SimBuilder::new(test_config(10), network(), services(), types())
            .trains(vec![record("EMU", None, 1, 200.0), record("NOPE", None, 1, 100.0)])
            .build();
        assert!(matches!(result, Err(SimError::InvalidTrain { index: 1, .. })));
    }

    #[test]
    fn running_train_is_restored_on_the_network() {
        let mut rec = record("EMU", Some("S1"), 1, 200.0);
        rec.status = TrainStatus::Running;
        rec.speed = 10.0;
        rec.next_place_index = Some(0);
        let sim = sim_with(10, vec![rec]);
        assert_eq!(sim.network.items_occupied_by(TrainId(0)), vec![TrackItemId(1)]);
        assert_eq!(sim.network.signal(SIGNAL).unwrap().train_id, Some(TrainId(0)));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_reaches_end_tick_and_snapshots() {
        let mut sim = sim_with(25, vec![]);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(25));
        assert_eq!(rec.snapshots, vec![Tick(0), Tick(10), Tick(20)]);
        assert_eq!(rec.ended, Some(Tick(25)));
    }

    #[test]
    fn train_runs_to_station_and_ends_service() {
        let mut sim = sim_with(400, vec![record("EMU", Some("S1"), 1, 200.0)]);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let train = sim.train(TrainId(0)).unwrap();
        assert_eq!(train.status(), TrainStatus::EndOfService);
        assert_eq!(train.head().item, TrackItemId(3));

        let stopped = rec
            .train_events
            .iter()
            .find(|(_, e)| matches!(e, TrainEvent::StoppedAtStation { .. }))
            .map(|(t, _)| *t)
            .unwrap();
        let ended = rec
            .train_events
            .iter()
            .find(|(_, e)| matches!(e, TrainEvent::StatusChanged { to: TrainStatus::EndOfService, .. }))
            .map(|(t, _)| *t)
            .unwrap();
        assert!(ended > stopped);
        // Not before the scheduled departure at 06:01:00.
        assert!(ended.0 >= 59);
        assert!(rec.track_events.contains(&TrackEvent::BerthCleared { signal: SIGNAL, train: TrainId(0) }));
    }

    #[test]
    fn same_seed_same_outcome() {
        let trains = || {
            let mut late = record("EMU", None, 4, 100.0);
            late.initial_delay = DurationProba::parse("[[0, 30, 100]]").unwrap();
            vec![record("EMU", Some("S1"), 1, 200.0), late]
        };
        let mut a = sim_with(120, trains());
        let mut b = sim_with(120, trains());
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_eq!(a.records(), b.records());
    }

    #[test]
    fn following_train_keeps_its_distance() {
        // The leader dwells at STN until 06:01:00; the follower has no
        // service and runs up behind it.
        let leader = record("EMU", Some("S1"), 3, 180.0);
        let follower = record("EMU", None, 1, 100.0);
        let mut sim = sim_with(55, vec![leader, follower]);
        sim.run(&mut NoopObserver).unwrap();

        let leader = sim.train(TrainId(0)).unwrap();
        let follower = sim.train(TrainId(1)).unwrap();
        assert_eq!(leader.status(), TrainStatus::Stopped);
        let gap = follower
            .head()
            .distance_to(&sim.network, &leader.tail(&sim.network))
            .unwrap();
        assert!(gap >= 90.0, "gap {gap}");
    }
}

// ── Operator commands ─────────────────────────────────────────────────────────

#[cfg(test)]
mod command_tests {
    use super::*;

    #[test]
    fn split_then_reassign() {
        let mut sim = sim_with(100, vec![record("TWIN", Some("S1"), 3, 180.0)]);
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        assert_eq!(sim.train(TrainId(0)).unwrap().speed(), 0.0);

        let rear = sim.split_train(TrainId(0), 1).unwrap();
        assert_eq!(rear, TrainId(1));
        assert_eq!(sim.trains().len(), 2);
        assert!(sim.train(rear).unwrap().is_held());

        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();
        assert!(rec
            .train_events
            .iter()
            .any(|(_, e)| *e == TrainEvent::ReassignServiceRequested { train: rear }));
        assert_eq!(sim.train(rear).unwrap().status(), TrainStatus::Inactive);

        sim.reassign_service(rear, "S1").unwrap();
        assert_eq!(sim.train(rear).unwrap().service_code(), Some("S1"));
        assert!(sim.train(rear).unwrap().status().is_on_scenery());
    }

    #[test]
    fn commands_on_unknown_train_fail() {
        let mut sim = sim_with(10, vec![]);
        assert!(matches!(sim.reverse_train(TrainId(3)), Err(SimError::UnknownTrain(_))));
        assert!(matches!(sim.split_train(TrainId(3), 1), Err(SimError::UnknownTrain(_))));
    }

    #[test]
    fn refused_command_surfaces_train_error() {
        let mut sim = sim_with(10, vec![record("EMU", None, 4, 100.0)]);
        assert!(matches!(sim.request_split(TrainId(0)), Err(SimError::Train(_))));
        assert!(matches!(sim.reassign_service(TrainId(0), "NOPE"), Err(SimError::Train(_))));
    }

    #[test]
    fn reset_restarts_itinerary() {
        let mut sim = sim_with(400, vec![record("EMU", Some("S1"), 1, 200.0)]);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.train(TrainId(0)).unwrap().next_place_index(), None);
        sim.reset_service(TrainId(0)).unwrap();
        assert_eq!(sim.train(TrainId(0)).unwrap().next_place_index(), Some(0));
    }

    #[test]
    fn saved_records_rebuild_the_same_state() {
        let mut sim = sim_with(40, vec![record("EMU", Some("S1"), 1, 200.0)]);
        sim.run(&mut NoopObserver).unwrap();
        let json = serde_json::to_string(&sim.records()).unwrap();
        let records: Vec<TrainRecord> = serde_json::from_str(&json).unwrap();
        let restored = sim_with(40, records);
        let (a, b) = (sim.train(TrainId(0)).unwrap(), restored.train(TrainId(0)).unwrap());
        assert_eq!(a.status(), b.status());
        assert_eq!(a.head().item, b.head().item);
        assert!((a.head().offset - b.head().offset).abs() < 1e-9);
        assert!((a.speed() - b.speed()).abs() < 1e-9);
        assert_eq!(restored.network.items_occupied_by(TrainId(0)), sim.network.items_occupied_by(TrainId(0)));
    }
}
