//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use rail_core::{SimTime, Tick};
use rail_sim::SimObserver;
use rail_train::{Train, TrainEvent};

use crate::row::{TrainEventRow, TrainSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes train snapshots and train events to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    events:     u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, events: 0, last_error: None }
    }

    /// Number of train events written so far.
    pub fn events_written(&self) -> u64 {
        self.events
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_train_event(&mut self, tick: Tick, time: SimTime, event: &TrainEvent) {
        let result = self.writer.write_event(&TrainEventRow::from_event(tick, time, event));
        if result.is_ok() {
            self.events += 1;
        }
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, time: SimTime, trains: &[Train]) {
        let rows: Vec<TrainSnapshotRow> = trains
            .iter()
            .filter(|t| t.status().is_on_scenery())
            .map(|t| TrainSnapshotRow::from_train(tick, time, t))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
