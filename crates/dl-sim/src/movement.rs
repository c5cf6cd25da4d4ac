//! The movement loop: advance busy couriers and close delivered orders.

use std::collections::HashMap;

use tracing::{info, warn};

use dl_core::CourierId;
use dl_courier::Courier;
use dl_order::Order;
use dl_store::DeliveryStore;

use crate::unit::in_unit_of_work;
use crate::{MoveReport, SimResult};

/// Advance every busy courier one tick towards its order's target.
///
/// A courier already at the target (or arriving with this step) completes
/// the order and becomes free.  Couriers without an assigned order and
/// guard failures are logged and skipped.  Everything staged is committed
/// once at the end; a store error rolls the whole batch back.
pub fn move_couriers<S>(store: &mut S) -> SimResult<MoveReport>
where
    S: DeliveryStore + ?Sized,
{
    let mut orders: HashMap<CourierId, Order> = HashMap::new();
    for order in store.find_assigned()? {
        if let Some(courier_id) = order.courier_id() {
            orders.entry(courier_id).or_insert(order);
        }
    }
    let busy = store.find_busy()?;

    in_unit_of_work(store, |store| {
        let mut report = MoveReport::default();
        for courier in busy {
            let Some(order) = orders.remove(&courier.id()) else {
                warn!(courier_id = %courier.id(), "busy courier has no assigned order");
                report.skipped += 1;
                continue;
            };
            step(store, courier, order, &mut report)?;
        }
        Ok(report)
    })
}

/// Move one courier, deliver on arrival, and stage whatever changed.
fn step<S>(store: &mut S, mut courier: Courier, mut order: Order, report: &mut MoveReport) -> SimResult<()>
where
    S: DeliveryStore + ?Sized,
{
    let target = order.target();

    let mut dirty = false;
    if courier.location() != target {
        if let Err(e) = courier.move_towards(target) {
            warn!(courier_id = %courier.id(), order_id = %order.id(), error = %e, "move refused");
            report.failed += 1;
            return Ok(());
        }
        report.moved += 1;
        dirty = true;
    }

    if courier.location() == target {
        match deliver(&mut order, &mut courier) {
            Ok(()) => {
                store.update_order(&order)?;
                dirty = true;
                report.completed += 1;
                info!(courier_id = %courier.id(), order_id = %order.id(), "order delivered");
            }
            Err(e) => {
                warn!(courier_id = %courier.id(), order_id = %order.id(), error = %e, "delivery refused");
                report.failed += 1;
            }
        }
    }

    if dirty {
        store.update_courier(&courier)?;
    }
    Ok(())
}

fn deliver(order: &mut Order, courier: &mut Courier) -> SimResult<()> {
    order.complete()?;
    courier.make_free()?;
    Ok(())
}
