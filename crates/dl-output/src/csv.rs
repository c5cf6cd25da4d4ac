//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `courier_snapshots.csv`
//! - `order_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CourierSnapshotRow, OrderSnapshotRow, OutputResult, TickSummaryRow};

pub const COURIER_HEADERS: [&str; 7] = ["tick", "courier_id", "name", "transport", "x", "y", "status"];
pub const ORDER_HEADERS: [&str; 6] = ["tick", "order_id", "courier_id", "target_x", "target_y", "status"];
pub const SUMMARY_HEADERS: [&str; 8] = [
    "tick",
    "unix_time_secs",
    "assigned",
    "dispatch_skipped",
    "moved",
    "completed",
    "move_skipped",
    "move_failed",
];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    couriers:  Writer<File>,
    orders:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut couriers = Writer::from_path(dir.join("courier_snapshots.csv"))?;
        couriers.write_record(COURIER_HEADERS)?;

        let mut orders = Writer::from_path(dir.join("order_snapshots.csv"))?;
        orders.write_record(ORDER_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self { couriers, orders, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_courier_snapshots(&mut self, rows: &[CourierSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.couriers.write_record(&[
                row.tick.to_string(),
                row.courier_id.clone(),
                row.name.clone(),
                row.transport.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.status.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_order_snapshots(&mut self, rows: &[OrderSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.orders.write_record(&[
                row.tick.to_string(),
                row.order_id.clone(),
                row.courier_id.clone().unwrap_or_default(),
                row.target_x.to_string(),
                row.target_y.to_string(),
                row.status.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.assigned.to_string(),
            row.dispatch_skipped.to_string(),
            row.moved.to_string(),
            row.completed.to_string(),
            row.move_skipped.to_string(),
            row.move_failed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.couriers.flush()?;
        self.orders.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
