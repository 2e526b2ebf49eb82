//! `shuttle` — two trains between WST and EST on a single line.
//!
//! The starter signal at WST is held at stop for the first three minutes,
//! so the first train waits past its departure time and the second one
//! closes up behind it.  Snapshots and train events are written to
//! `output/shuttle/`, and the final train state to `session.json`.
//!
//! Run with:
//!   RUST_LOG=debug cargo run -p shuttle

mod network;

use std::path::Path;

use anyhow::Result;
use log::info;

use rail_core::{DurationProba, SimConfig, SimTime, TrackItemId};
use rail_output::{CsvWriter, SimOutputObserver, load_session, save_session};
use rail_schedule::load_services_reader;
use rail_sim::SimBuilder;
use rail_stock::TrainTypeRegistry;
use rail_track::{Position, SignalAspect};
use rail_train::{TrainRecord, TrainStatus};

use network::{STARTER_SIGNAL, WEST_APPROACH, WEST_PLATFORM, build_network};

// ── Inputs ────────────────────────────────────────────────────────────────────

const CONFIG: &str = r#"{
    "startTime": "06:00:00",
    "tickSecs": 1.0,
    "totalTicks": 900,
    "seed": 42,
    "outputIntervalTicks": 15,
    "options": {
        "defaultMinimumStopTime": [[20, 40, 90], [40, 60, 10]],
        "defaultSignalVisibility": 150
    }
}"#;

const TRAIN_TYPES: &str = r#"[
    { "code": "DMU", "description": "Two-car diesel unit", "length": 50,
      "maxSpeed": 30, "stdAccel": 0.6, "stdBraking": 0.5, "emergBraking": 1.4 }
]"#;

const SERVICES: &str = "\
service_code,description,place_code,track_code,arrival,departure,must_stop,next_service,auto_reverse
D1,First shuttle,WST,1,,06:01:00,1,,0
D1,First shuttle,EST,1,06:04:00,06:05:00,1,,0
D1,First shuttle,EXE,,,,0,,0
D2,Second shuttle,WST,1,06:03:00,06:04:00,1,,0
D2,Second shuttle,EST,1,06:07:00,06:08:00,1,,0
D2,Second shuttle,EXE,,,,0,,0
";

/// Tick at which the WST starter signal clears.
const CLEAR_AT_TICK: u64 = 180;

fn eastbound(item: TrackItemId, offset: f64) -> Position {
    Position::new(item, Some(TrackItemId(item.0 - 1)), offset)
}

fn trains() -> Vec<TrainRecord> {
    let base = TrainRecord {
        service_code:     Some("D1".into()),
        train_type_code:  "DMU".into(),
        status:           TrainStatus::Inactive,
        speed:            0.0,
        initial_speed:    0.0,
        train_head:       eastbound(WEST_PLATFORM, 120.0),
        appear_time:      SimTime::from_hms(6, 0, 0),
        initial_delay:    DurationProba::fixed(0.0),
        next_place_index: None,
        stopped_time:     0.0,
    };
    let follower = TrainRecord {
        service_code:  Some("D2".into()),
        initial_speed: 10.0,
        train_head:    eastbound(WEST_APPROACH, 80.0),
        appear_time:   SimTime::from_hms(6, 2, 0),
        // Null: falls back to the entry delay option.
        initial_delay: DurationProba::default(),
        ..base.clone()
    };
    vec![base, follower]
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimConfig::from_json_str(CONFIG)?;
    let types = TrainTypeRegistry::from_json_reader(TRAIN_TYPES.as_bytes())?;
    let services = load_services_reader(SERVICES.as_bytes())?;
    let network = build_network()?;
    info!(
        "network: {} items, {} services, {} train types",
        network.len(),
        services.len(),
        types.len()
    );

    let mut sim = SimBuilder::new(config, network, services, types).trains(trains()).build()?;

    let out_dir = Path::new("output/shuttle");
    std::fs::create_dir_all(out_dir)?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(out_dir)?);

    // Starter held at stop, then cleared by the signalman.
    sim.run_ticks(CLEAR_AT_TICK, &mut obs)?;
    sim.network.set_signal_aspect(STARTER_SIGNAL, SignalAspect::clear())?;
    info!("{}: starter signal at WST cleared", sim.now());
    sim.run(&mut obs)?;

    if let Some(e) = obs.take_error() {
        return Err(e.into());
    }
    info!("{} train events written to {}", obs.events_written(), out_dir.display());

    let session_path = out_dir.join("session.json");
    save_session(&session_path, sim.now(), &sim.records())?;
    let session = load_session(&session_path)?;
    for (i, record) in session.trains.iter().enumerate() {
        println!(
            "train {i}: {:<6} {:?}  head item {} at {:.1} m",
            record.service_code.as_deref().unwrap_or("-"),
            record.status,
            record.train_head.item.0,
            record.train_head.offset,
        );
    }
    println!("session saved at {} to {}", session.time, session_path.display());
    Ok(())
}
