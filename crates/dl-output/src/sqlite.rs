//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `courier_snapshots`, `order_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::{params, Connection};

use crate::writer::OutputWriter;
use crate::{CourierSnapshotRow, OrderSnapshotRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS courier_snapshots (
                 tick       INTEGER NOT NULL,
                 courier_id TEXT    NOT NULL,
                 name       TEXT    NOT NULL,
                 transport  TEXT    NOT NULL,
                 x          INTEGER NOT NULL,
                 y          INTEGER NOT NULL,
                 status     TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS order_snapshots (
                 tick       INTEGER NOT NULL,
                 order_id   TEXT    NOT NULL,
                 courier_id TEXT,
                 target_x   INTEGER NOT NULL,
                 target_y   INTEGER NOT NULL,
                 status     TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick             INTEGER PRIMARY KEY,
                 unix_time_secs   INTEGER NOT NULL,
                 assigned         INTEGER NOT NULL,
                 dispatch_skipped INTEGER NOT NULL,
                 moved            INTEGER NOT NULL,
                 completed        INTEGER NOT NULL,
                 move_skipped     INTEGER NOT NULL,
                 move_failed      INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_courier_snapshots(&mut self, rows: &[CourierSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO courier_snapshots \
                 (tick, courier_id, name, transport, x, y, status) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.tick as i64,
                    row.courier_id,
                    row.name,
                    row.transport,
                    row.x,
                    row.y,
                    row.status,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_order_snapshots(&mut self, rows: &[OrderSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO order_snapshots \
                 (tick, order_id, courier_id, target_x, target_y, status) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.tick as i64,
                    row.order_id,
                    row.courier_id,
                    row.target_x,
                    row.target_y,
                    row.status,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, unix_time_secs, assigned, dispatch_skipped, moved, completed, move_skipped, move_failed) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                row.tick as i64,
                row.unix_time_secs,
                row.assigned as i64,
                row.dispatch_skipped as i64,
                row.moved as i64,
                row.completed as i64,
                row.move_skipped as i64,
                row.move_failed as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
