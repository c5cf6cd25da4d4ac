//! The `Order` aggregate.

use dl_core::{CoreError, CourierId, Location, OrderId, Uuid};
use dl_courier::Courier;

use crate::{OrderError, OrderResult, OrderStatus};

/// A delivery order.
///
/// Invariant: `courier_id.is_some()` exactly when `status == Assigned`.
/// Only [`assign`](Self::assign) and [`complete`](Self::complete) change the
/// status, and both keep the reference in step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Order {
    id:         OrderId,
    target:     Location,
    status:     OrderStatus,
    courier_id: Option<CourierId>,
}

impl Order {
    /// Create a `Created` order for the basket `basket_id`, delivering to
    /// `target`.  The basket id becomes the order id; the nil id is rejected.
    pub fn new(basket_id: impl Into<Uuid>, target: Location) -> OrderResult<Self> {
        let id = OrderId::from(basket_id.into());
        if id.is_nil() {
            return Err(CoreError::ValueInvalid("basket_id").into());
        }
        Ok(Self { id, target, status: OrderStatus::Created, courier_id: None })
    }

    /// Rebuild an order from stored state, re-checking the courier invariant.
    pub fn restore(
        id:         OrderId,
        target:     Location,
        status:     OrderStatus,
        courier_id: Option<CourierId>,
    ) -> OrderResult<Self> {
        let consistent = match status {
            OrderStatus::Assigned => courier_id.is_some(),
            OrderStatus::Created | OrderStatus::Completed => courier_id.is_none(),
        };
        if !consistent {
            return Err(OrderError::Inconsistent { id, status });
        }
        Ok(Self { id, target, status, courier_id })
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn target(&self) -> Location {
        self.target
    }

    #[inline]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    #[inline]
    pub fn courier_id(&self) -> Option<CourierId> {
        self.courier_id
    }

    /// `true` if [`assign`](Self::assign) would succeed.
    #[inline]
    pub fn can_assign(&self) -> bool {
        self.status == OrderStatus::Created
    }

    // ── State machine ─────────────────────────────────────────────────────

    /// `Created → Assigned`, binding `courier`.
    pub fn assign(&mut self, courier: &Courier) -> OrderResult<()> {
        match self.status {
            OrderStatus::Assigned  => return Err(OrderError::AlreadyAssigned(self.id)),
            OrderStatus::Completed => return Err(OrderError::AlreadyCompleted(self.id)),
            OrderStatus::Created   => {}
        }
        self.courier_id = Some(courier.id());
        self.status = OrderStatus::Assigned;
        Ok(())
    }

    /// `Assigned → Completed`, clearing the courier reference.
    pub fn complete(&mut self) -> OrderResult<()> {
        if self.status != OrderStatus::Assigned {
            return Err(OrderError::ImpossibleToComplete { id: self.id, status: self.status });
        }
        self.courier_id = None;
        self.status = OrderStatus::Completed;
        Ok(())
    }
}
