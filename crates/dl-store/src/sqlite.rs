//! SQLite-backed store (feature `sqlite`).
//!
//! Schema: `couriers` and `orders` plus three lookup tables
//! (`transports`, `courier_statuses`, `order_statuses`) keyed by the numeric
//! ids the domain enums expose.  Ids are stored as hyphenated UUID text.  An
//! `AUTOINCREMENT` `seq` column keeps reads in insertion order.
//!
//! Writes are staged in memory and replayed inside one transaction per
//! [`UnitOfWork::commit`]; any failing statement rolls the whole batch back.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use dl_core::{CourierId, Location, OrderId, Transport, Uuid};
use dl_courier::{Courier, CourierStatus};
use dl_order::{Order, OrderStatus};

use crate::{CourierRepository, OrderRepository, StoreError, StoreResult, UnitOfWork};

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS transports (
        id    INTEGER PRIMARY KEY,
        name  TEXT    NOT NULL UNIQUE,
        speed INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS courier_statuses (
        id   INTEGER PRIMARY KEY,
        name TEXT    NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS order_statuses (
        id   INTEGER PRIMARY KEY,
        name TEXT    NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS couriers (
        seq          INTEGER PRIMARY KEY AUTOINCREMENT,
        id           TEXT    NOT NULL UNIQUE,
        name         TEXT    NOT NULL,
        transport_id INTEGER NOT NULL REFERENCES transports(id),
        location_x   INTEGER NOT NULL,
        location_y   INTEGER NOT NULL,
        status_id    INTEGER NOT NULL REFERENCES courier_statuses(id)
    );
    CREATE TABLE IF NOT EXISTS orders (
        seq        INTEGER PRIMARY KEY AUTOINCREMENT,
        id         TEXT    NOT NULL UNIQUE,
        courier_id TEXT,
        location_x INTEGER NOT NULL,
        location_y INTEGER NOT NULL,
        status_id  INTEGER NOT NULL REFERENCES order_statuses(id)
    );";

const COURIER_COLUMNS: &str = "id, name, transport_id, location_x, location_y, status_id";
const ORDER_COLUMNS: &str = "id, courier_id, location_x, location_y, status_id";

#[derive(Debug, Clone)]
enum Change {
    AddCourier(Courier),
    UpdateCourier(Courier),
    AddOrder(Order),
    UpdateOrder(Order),
}

/// Courier and order repositories over one SQLite connection.
pub struct SqliteStore {
    conn:   Connection,
    staged: Vec<Change>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        {
            let mut stmt = conn.prepare(
                "INSERT OR IGNORE INTO transports (id, name, speed) VALUES (?1, ?2, ?3)",
            )?;
            for t in Transport::ALL {
                stmt.execute(params![t.id(), t.as_str(), t.speed()])?;
            }
            let mut stmt = conn.prepare(
                "INSERT OR IGNORE INTO courier_statuses (id, name) VALUES (?1, ?2)",
            )?;
            for s in [CourierStatus::Free, CourierStatus::Busy] {
                stmt.execute(params![s.id(), s.as_str()])?;
            }
            let mut stmt = conn.prepare(
                "INSERT OR IGNORE INTO order_statuses (id, name) VALUES (?1, ?2)",
            )?;
            for s in [OrderStatus::Created, OrderStatus::Assigned, OrderStatus::Completed] {
                stmt.execute(params![s.id(), s.as_str()])?;
            }
        }
        Ok(Self { conn, staged: Vec::new() })
    }

    /// Number of writes waiting for the next commit.
    pub fn pending(&self) -> usize {
        self.staged.len()
    }

    fn couriers_with_status(&self, status: CourierStatus) -> StoreResult<Vec<Courier>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {COURIER_COLUMNS} FROM couriers WHERE status_id = ?1 ORDER BY seq"
        ))?;
        let rows = stmt.query_map([status.id()], CourierRow::read)?;
        rows.map(|row| row?.into_courier()).collect()
    }

    fn orders_with_status(&self, status: OrderStatus) -> StoreResult<Vec<Order>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE status_id = ?1 ORDER BY seq"
        ))?;
        let rows = stmt.query_map([status.id()], OrderRow::read)?;
        rows.map(|row| row?.into_order()).collect()
    }
}

// ── Row mapping ───────────────────────────────────────────────────────────────

struct CourierRow {
    id:           String,
    name:         String,
    transport_id: u8,
    x:            i32,
    y:            i32,
    status_id:    u8,
}

impl CourierRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id:           row.get(0)?,
            name:         row.get(1)?,
            transport_id: row.get(2)?,
            x:            row.get(3)?,
            y:            row.get(4)?,
            status_id:    row.get(5)?,
        })
    }

    fn into_courier(self) -> StoreResult<Courier> {
        let status = CourierStatus::from_id(self.status_id)
            .ok_or_else(|| StoreError::Corrupt(format!("courier status id {}", self.status_id)))?;
        Ok(Courier::restore(
            CourierId::from(parse_uuid(&self.id)?),
            self.name,
            Transport::from_id(self.transport_id)?,
            Location::new(self.x, self.y)?,
            status,
        )?)
    }
}

struct OrderRow {
    id:         String,
    courier_id: Option<String>,
    x:          i32,
    y:          i32,
    status_id:  u8,
}

impl OrderRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id:         row.get(0)?,
            courier_id: row.get(1)?,
            x:          row.get(2)?,
            y:          row.get(3)?,
            status_id:  row.get(4)?,
        })
    }

    fn into_order(self) -> StoreResult<Order> {
        let status = OrderStatus::from_id(self.status_id)
            .ok_or_else(|| StoreError::Corrupt(format!("order status id {}", self.status_id)))?;
        let courier_id = self
            .courier_id
            .as_deref()
            .map(parse_uuid)
            .transpose()?
            .map(CourierId::from);
        Ok(Order::restore(
            OrderId::from(parse_uuid(&self.id)?),
            Location::new(self.x, self.y)?,
            status,
            courier_id,
        )?)
    }
}

fn parse_uuid(s: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(s).map_err(|e| StoreError::Corrupt(format!("id {s:?}: {e}")))
}

fn courier_key(id: CourierId) -> String {
    id.as_uuid().to_string()
}

fn order_key(id: OrderId) -> String {
    id.as_uuid().to_string()
}

// ── Ports ─────────────────────────────────────────────────────────────────────

impl OrderRepository for SqliteStore {
    fn add_order(&mut self, order: &Order) -> StoreResult<()> {
        self.staged.push(Change::AddOrder(order.clone()));
        Ok(())
    }

    fn update_order(&mut self, order: &Order) -> StoreResult<()> {
        self.staged.push(Change::UpdateOrder(order.clone()));
        Ok(())
    }

    fn find_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"))?;
        stmt.query_row([order_key(id)], OrderRow::read)
            .optional()?
            .map(OrderRow::into_order)
            .transpose()
    }

    fn find_created(&self) -> StoreResult<Vec<Order>> {
        self.orders_with_status(OrderStatus::Created)
    }

    fn find_assigned(&self) -> StoreResult<Vec<Order>> {
        self.orders_with_status(OrderStatus::Assigned)
    }
}

impl CourierRepository for SqliteStore {
    fn add_courier(&mut self, courier: &Courier) -> StoreResult<()> {
        self.staged.push(Change::AddCourier(courier.clone()));
        Ok(())
    }

    fn update_courier(&mut self, courier: &Courier) -> StoreResult<()> {
        self.staged.push(Change::UpdateCourier(courier.clone()));
        Ok(())
    }

    fn find_courier(&self, id: CourierId) -> StoreResult<Option<Courier>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {COURIER_COLUMNS} FROM couriers WHERE id = ?1"))?;
        stmt.query_row([courier_key(id)], CourierRow::read)
            .optional()?
            .map(CourierRow::into_courier)
            .transpose()
    }

    fn find_free(&self) -> StoreResult<Vec<Courier>> {
        self.couriers_with_status(CourierStatus::Free)
    }

    fn find_busy(&self) -> StoreResult<Vec<Courier>> {
        self.couriers_with_status(CourierStatus::Busy)
    }
}

impl UnitOfWork for SqliteStore {
    fn commit(&mut self) -> StoreResult<()> {
        let staged = std::mem::take(&mut self.staged);
        if staged.is_empty() {
            return Ok(());
        }

        // Dropping `tx` on an early return rolls the batch back.
        let tx = self.conn.transaction()?;
        for change in &staged {
            match change {
                Change::AddCourier(c) => {
                    let key = courier_key(c.id());
                    let exists: bool = tx.query_row(
                        "SELECT EXISTS(SELECT 1 FROM couriers WHERE id = ?1)",
                        [&key],
                        |r| r.get(0),
                    )?;
                    if exists {
                        return Err(StoreError::DuplicateCourier(c.id()));
                    }
                    tx.prepare_cached(
                        "INSERT INTO couriers \
                         (id, name, transport_id, location_x, location_y, status_id) \
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    )?
                    .execute(params![
                        key,
                        c.name(),
                        c.transport().id(),
                        c.location().x(),
                        c.location().y(),
                        c.status().id(),
                    ])?;
                }
                Change::UpdateCourier(c) => {
                    let n = tx
                        .prepare_cached(
                            "UPDATE couriers SET name = ?2, transport_id = ?3, \
                             location_x = ?4, location_y = ?5, status_id = ?6 WHERE id = ?1",
                        )?
                        .execute(params![
                            courier_key(c.id()),
                            c.name(),
                            c.transport().id(),
                            c.location().x(),
                            c.location().y(),
                            c.status().id(),
                        ])?;
                    if n == 0 {
                        return Err(StoreError::CourierNotFound(c.id()));
                    }
                }
                Change::AddOrder(o) => {
                    let key = order_key(o.id());
                    let exists: bool = tx.query_row(
                        "SELECT EXISTS(SELECT 1 FROM orders WHERE id = ?1)",
                        [&key],
                        |r| r.get(0),
                    )?;
                    if exists {
                        return Err(StoreError::DuplicateOrder(o.id()));
                    }
                    tx.prepare_cached(
                        "INSERT INTO orders \
                         (id, courier_id, location_x, location_y, status_id) \
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                    )?
                    .execute(params![
                        key,
                        o.courier_id().map(courier_key),
                        o.target().x(),
                        o.target().y(),
                        o.status().id(),
                    ])?;
                }
                Change::UpdateOrder(o) => {
                    let n = tx
                        .prepare_cached(
                            "UPDATE orders SET courier_id = ?2, location_x = ?3, \
                             location_y = ?4, status_id = ?5 WHERE id = ?1",
                        )?
                        .execute(params![
                            order_key(o.id()),
                            o.courier_id().map(courier_key),
                            o.target().x(),
                            o.target().y(),
                            o.status().id(),
                        ])?;
                    if n == 0 {
                        return Err(StoreError::OrderNotFound(o.id()));
                    }
                }
            }
        }
        tx.commit()?;
        debug!(applied = staged.len(), "sqlite commit");
        Ok(())
    }

    fn rollback(&mut self) {
        if !self.staged.is_empty() {
            debug!(discarded = self.staged.len(), "sqlite rollback");
            self.staged.clear();
        }
    }
}
