//! The narrow contracts the orchestration loops depend on.
//!
//! Writes (`add_*`, `update_*`) are *staged*: nothing becomes visible to the
//! `find_*` reads until [`UnitOfWork::commit`] succeeds.  A failed commit
//! discards everything staged since the previous commit and leaves the
//! committed state untouched.  A caller that gives up before committing
//! calls [`UnitOfWork::rollback`], so no half-staged batch leaks into the
//! next commit.
//!
//! Method names are prefixed per aggregate so a single adapter type can
//! implement both repositories without ambiguous calls.

use dl_core::{CourierId, Location, OrderId};
use dl_courier::Courier;
use dl_order::Order;

use crate::StoreResult;

/// Lookup and persistence of [`Order`] aggregates.
pub trait OrderRepository {
    fn add_order(&mut self, order: &Order) -> StoreResult<()>;

    fn update_order(&mut self, order: &Order) -> StoreResult<()>;

    fn find_order(&self, id: OrderId) -> StoreResult<Option<Order>>;

    /// Orders waiting for a courier, in insertion order.
    fn find_created(&self) -> StoreResult<Vec<Order>>;

    /// Orders bound to a courier, in insertion order.
    fn find_assigned(&self) -> StoreResult<Vec<Order>>;
}

/// Lookup and persistence of [`Courier`] aggregates.
pub trait CourierRepository {
    fn add_courier(&mut self, courier: &Courier) -> StoreResult<()>;

    fn update_courier(&mut self, courier: &Courier) -> StoreResult<()>;

    fn find_courier(&self, id: CourierId) -> StoreResult<Option<Courier>>;

    /// Free couriers, in insertion order.  Dispatch ties go to the first.
    fn find_free(&self) -> StoreResult<Vec<Courier>>;

    /// Busy couriers, in insertion order.
    fn find_busy(&self) -> StoreResult<Vec<Courier>>;
}

/// Atomically applies every staged write.
pub trait UnitOfWork {
    fn commit(&mut self) -> StoreResult<()>;

    /// Drop every staged write without applying it.
    fn rollback(&mut self);
}

/// Everything the tick loops need from storage, as one bound.
pub trait DeliveryStore: OrderRepository + CourierRepository + UnitOfWork {}

impl<T: OrderRepository + CourierRepository + UnitOfWork> DeliveryStore for T {}

/// Resolves a street address to a grid cell.
pub trait GeoClient {
    fn resolve(&mut self, street: &str) -> StoreResult<Location>;
}
