//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, TrainEventRow, TrainSnapshotRow};

/// Sink for simulation output rows.
///
/// Errors are stored by [`SimOutputObserver`](crate::SimOutputObserver) and
/// retrieved with [`take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write a batch of train snapshots.
    fn write_snapshots(&mut self, rows: &[TrainSnapshotRow]) -> OutputResult<()>;

    /// Write one train event row.
    fn write_event(&mut self, row: &TrainEventRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
