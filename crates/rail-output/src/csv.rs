//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `train_snapshots.csv`
//! - `train_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TrainEventRow, TrainSnapshotRow};

pub const SNAPSHOT_FILE: &str = "train_snapshots.csv";
pub const EVENT_FILE: &str = "train_events.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    events:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join(SNAPSHOT_FILE))?;
        snapshots.write_record([
            "tick",
            "time",
            "train_id",
            "service_code",
            "train_type",
            "status",
            "speed",
            "acceleration",
            "head_item",
            "head_offset",
            "next_place_index",
        ])?;

        let mut events = Writer::from_path(dir.join(EVENT_FILE))?;
        events.write_record(["tick", "time", "train_id", "event", "detail"])?;

        Ok(Self { snapshots, events, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[TrainSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.time.to_string(),
                row.train_id.to_string(),
                row.service_code.clone(),
                row.train_type.clone(),
                row.status.clone(),
                format!("{:.3}", row.speed),
                format!("{:.3}", row.acceleration),
                row.head_item.to_string(),
                format!("{:.3}", row.head_offset),
                row.next_place_index.map(|i| i.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_event(&mut self, row: &TrainEventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.time.to_string(),
            row.train_id.to_string(),
            row.event.clone(),
            row.detail.clone(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
