//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CourierSnapshotRow, OrderSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface to the observer, which stores the first one for
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_courier_snapshots(&mut self, rows: &[CourierSnapshotRow]) -> OutputResult<()>;

    fn write_order_snapshots(&mut self, rows: &[OrderSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
