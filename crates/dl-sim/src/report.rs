//! Per-loop outcome counters.

use dl_core::Tick;

/// Outcome of one [`assign_orders`][crate::assign_orders] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignReport {
    /// Orders that were dispatched and committed.
    pub assigned: usize,
    /// Orders left `Created` because dispatch failed.
    pub skipped:  usize,
}

/// Outcome of one [`move_couriers`][crate::move_couriers] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// Couriers that took a step.
    pub moved:     usize,
    /// Orders delivered (courier freed).
    pub completed: usize,
    /// Busy couriers with no assigned order.
    pub skipped:   usize,
    /// Couriers whose move or delivery was refused by a guard.
    pub failed:    usize,
}

/// What happened on one tick.  A loop that was not due leaves its field `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:     Tick,
    pub assign:   Option<AssignReport>,
    pub movement: Option<MoveReport>,
}

impl TickSummary {
    pub fn assigned(&self) -> usize {
        self.assign.map_or(0, |r| r.assigned)
    }

    pub fn completed(&self) -> usize {
        self.movement.map_or(0, |r| r.completed)
    }
}
