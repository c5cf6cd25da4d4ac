//! Dispatcher trait and the default fastest-courier implementation.
//!
//! # Pluggability
//!
//! `dl-sim` calls dispatch via the [`Dispatcher`] trait, so applications can
//! swap in other matching policies (load balancing, zone ownership) without
//! touching the loops.  [`FastestCourierDispatcher`] is the default.
//!
//! # Ranking
//!
//! Candidates are ranked by [`Courier::steps_to`], the Manhattan distance over
//! speed.  The lowest score wins; on a tie the courier that appears first in
//! the candidate slice wins, so repositories that return rows in a stable
//! order give reproducible assignments.

use dl_courier::Courier;
use dl_order::Order;

use crate::{DispatchError, DispatchResult};

// ── Dispatcher trait ──────────────────────────────────────────────────────────

/// Pluggable order-to-courier matching.
pub trait Dispatcher: Send + Sync {
    /// Match `order` to one of `couriers`.
    ///
    /// On success the returned courier has been made `Busy` and `order` is
    /// `Assigned` to it.  On failure neither the order nor any courier has
    /// been changed.
    fn dispatch<'c>(
        &self,
        order:    &mut Order,
        couriers: &'c mut [Courier],
    ) -> DispatchResult<&'c Courier>;
}

// ── FastestCourierDispatcher ──────────────────────────────────────────────────

/// Picks the free courier with the smallest ticks-to-target estimate.
///
/// Preconditions are checked in order and the first failure is returned:
///
/// 1. order not `Created`  → [`DispatchError::InvalidOrderStatus`]
/// 2. no candidates        → [`DispatchError::NoAnyCouriers`]
/// 3. no `Free` candidate  → [`DispatchError::NoFreeCouriers`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FastestCourierDispatcher;

impl Dispatcher for FastestCourierDispatcher {
    fn dispatch<'c>(
        &self,
        order:    &mut Order,
        couriers: &'c mut [Courier],
    ) -> DispatchResult<&'c Courier> {
        if !order.can_assign() {
            return Err(DispatchError::InvalidOrderStatus(order.status()));
        }
        if couriers.is_empty() {
            return Err(DispatchError::NoAnyCouriers);
        }

        let winner = fastest_free(order, couriers).ok_or(DispatchError::NoFreeCouriers)?;
        let courier = &mut couriers[winner];

        // Both guards were checked above: the order is assignable and the
        // winner is Free.
        courier.make_busy()?;
        order.assign(courier)?;

        Ok(&couriers[winner])
    }
}

/// Index of the first free courier with the strictly smallest score.
fn fastest_free(order: &Order, couriers: &[Courier]) -> Option<usize> {
    let target = order.target();
    let mut best: Option<(usize, f64)> = None;

    for (i, courier) in couriers.iter().enumerate() {
        if !courier.is_free() {
            continue;
        }
        let steps = courier.steps_to(target);
        if !steps.is_finite() {
            continue;
        }
        match best {
            Some((_, best_steps)) if steps >= best_steps => {}
            _ => best = Some((i, steps)),
        }
    }

    best.map(|(i, _)| i)
}
