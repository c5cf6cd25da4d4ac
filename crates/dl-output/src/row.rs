//! Plain data row types written by output backends.

use dl_core::Tick;
use dl_courier::Courier;
use dl_order::Order;
use dl_sim::TickSummary;

/// One courier's state at a given tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourierSnapshotRow {
    pub tick:       u64,
    /// Hyphenated UUID.
    pub courier_id: String,
    pub name:       String,
    pub transport:  &'static str,
    pub x:          i32,
    pub y:          i32,
    pub status:     &'static str,
}

impl CourierSnapshotRow {
    pub fn new(tick: Tick, courier: &Courier) -> Self {
        Self {
            tick:       tick.0,
            courier_id: courier.id().as_uuid().to_string(),
            name:       courier.name().to_owned(),
            transport:  courier.transport().as_str(),
            x:          courier.location().x(),
            y:          courier.location().y(),
            status:     courier.status().as_str(),
        }
    }
}

/// One open order's state at a given tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSnapshotRow {
    pub tick:       u64,
    pub order_id:   String,
    /// Empty until the order is assigned.
    pub courier_id: Option<String>,
    pub target_x:   i32,
    pub target_y:   i32,
    pub status:     &'static str,
}

impl OrderSnapshotRow {
    pub fn new(tick: Tick, order: &Order) -> Self {
        Self {
            tick:       tick.0,
            order_id:   order.id().as_uuid().to_string(),
            courier_id: order.courier_id().map(|id| id.as_uuid().to_string()),
            target_x:   order.target().x(),
            target_y:   order.target().y(),
            status:     order.status().as_str(),
        }
    }
}

/// Loop counters for one simulation tick.  Loops that did not run count 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub unix_time_secs:   i64,
    pub assigned:         u64,
    pub dispatch_skipped: u64,
    pub moved:            u64,
    pub completed:        u64,
    pub move_skipped:     u64,
    pub move_failed:      u64,
}

impl TickSummaryRow {
    pub fn new(summary: &TickSummary, unix_time_secs: i64) -> Self {
        let assign = summary.assign.unwrap_or_default();
        let movement = summary.movement.unwrap_or_default();
        Self {
            tick:             summary.tick.0,
            unix_time_secs,
            assigned:         assign.assigned as u64,
            dispatch_skipped: assign.skipped as u64,
            moved:            movement.moved as u64,
            completed:        movement.completed as u64,
            move_skipped:     movement.skipped as u64,
            move_failed:      movement.failed as u64,
        }
    }
}
