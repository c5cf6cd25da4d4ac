//! `InMemoryStore`: both repositories plus a unit of work over plain `Vec`s.
//!
//! Rows live in insertion order with a `HashMap` id → row-index side table,
//! the same dense-vector layout the rest of the workspace uses for agents.
//! Writes are queued in `staged` and only applied by [`UnitOfWork::commit`].

use std::collections::{HashMap, HashSet};

use tracing::debug;

use dl_core::{CourierId, OrderId};
use dl_courier::{Courier, CourierStatus};
use dl_order::{Order, OrderStatus};

use crate::{CourierRepository, OrderRepository, StoreError, StoreResult, UnitOfWork};

#[derive(Debug, Clone)]
enum Change {
    AddCourier(Courier),
    UpdateCourier(Courier),
    AddOrder(Order),
    UpdateOrder(Order),
}

/// Process-local store used by tests and the demo.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    couriers:      Vec<Courier>,
    courier_index: HashMap<CourierId, usize>,
    orders:        Vec<Order>,
    order_index:   HashMap<OrderId, usize>,
    staged:        Vec<Change>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes waiting for the next commit.
    pub fn pending(&self) -> usize {
        self.staged.len()
    }

    /// Every committed courier, in insertion order.
    pub fn couriers(&self) -> &[Courier] {
        &self.couriers
    }

    /// Every committed order, in insertion order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Reject the batch before touching any row, so a failure applies nothing.
    fn check(&self, staged: &[Change]) -> StoreResult<()> {
        let mut new_couriers = HashSet::new();
        let mut new_orders = HashSet::new();

        for change in staged {
            match change {
                Change::AddCourier(c) => {
                    if self.courier_index.contains_key(&c.id()) || !new_couriers.insert(c.id()) {
                        return Err(StoreError::DuplicateCourier(c.id()));
                    }
                }
                Change::UpdateCourier(c) => {
                    if !self.courier_index.contains_key(&c.id()) && !new_couriers.contains(&c.id()) {
                        return Err(StoreError::CourierNotFound(c.id()));
                    }
                }
                Change::AddOrder(o) => {
                    if self.order_index.contains_key(&o.id()) || !new_orders.insert(o.id()) {
                        return Err(StoreError::DuplicateOrder(o.id()));
                    }
                }
                Change::UpdateOrder(o) => {
                    if !self.order_index.contains_key(&o.id()) && !new_orders.contains(&o.id()) {
                        return Err(StoreError::OrderNotFound(o.id()));
                    }
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, change: Change) {
        match change {
            Change::AddCourier(c) => {
                self.courier_index.insert(c.id(), self.couriers.len());
                self.couriers.push(c);
            }
            Change::UpdateCourier(c) => {
                if let Some(&i) = self.courier_index.get(&c.id()) {
                    self.couriers[i] = c;
                }
            }
            Change::AddOrder(o) => {
                self.order_index.insert(o.id(), self.orders.len());
                self.orders.push(o);
            }
            Change::UpdateOrder(o) => {
                if let Some(&i) = self.order_index.get(&o.id()) {
                    self.orders[i] = o;
                }
            }
        }
    }
}

impl OrderRepository for InMemoryStore {
    fn add_order(&mut self, order: &Order) -> StoreResult<()> {
        self.staged.push(Change::AddOrder(order.clone()));
        Ok(())
    }

    fn update_order(&mut self, order: &Order) -> StoreResult<()> {
        self.staged.push(Change::UpdateOrder(order.clone()));
        Ok(())
    }

    fn find_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        Ok(self.order_index.get(&id).map(|&i| self.orders[i].clone()))
    }

    fn find_created(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.iter().filter(|o| o.status() == OrderStatus::Created).cloned().collect())
    }

    fn find_assigned(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.iter().filter(|o| o.status() == OrderStatus::Assigned).cloned().collect())
    }
}

impl CourierRepository for InMemoryStore {
    fn add_courier(&mut self, courier: &Courier) -> StoreResult<()> {
        self.staged.push(Change::AddCourier(courier.clone()));
        Ok(())
    }

    fn update_courier(&mut self, courier: &Courier) -> StoreResult<()> {
        self.staged.push(Change::UpdateCourier(courier.clone()));
        Ok(())
    }

    fn find_courier(&self, id: CourierId) -> StoreResult<Option<Courier>> {
        Ok(self.courier_index.get(&id).map(|&i| self.couriers[i].clone()))
    }

    fn find_free(&self) -> StoreResult<Vec<Courier>> {
        Ok(self.couriers.iter().filter(|c| c.status() == CourierStatus::Free).cloned().collect())
    }

    fn find_busy(&self) -> StoreResult<Vec<Courier>> {
        Ok(self.couriers.iter().filter(|c| c.status() == CourierStatus::Busy).cloned().collect())
    }
}

impl UnitOfWork for InMemoryStore {
    fn commit(&mut self) -> StoreResult<()> {
        let staged = std::mem::take(&mut self.staged);
        if let Err(e) = self.check(&staged) {
            debug!(error = %e, discarded = staged.len(), "in-memory commit rejected");
            return Err(e);
        }
        let applied = staged.len();
        for change in staged {
            self.apply(change);
        }
        debug!(applied, "in-memory commit");
        Ok(())
    }

    fn rollback(&mut self) {
        if !self.staged.is_empty() {
            debug!(discarded = self.staged.len(), "in-memory rollback");
            self.staged.clear();
        }
    }
}
