//! Create-order use case.

use tracing::info;

use dl_core::{CoreError, Uuid};
use dl_order::Order;
use dl_store::{GeoClient, OrderRepository, UnitOfWork};

use crate::SimResult;
use crate::unit::in_unit_of_work;

/// Turn basket `basket_id` into a `Created` order delivering to `street`.
///
/// The street is resolved through `geo`; the order is added and committed.
pub fn create_order<S, G>(store: &mut S, geo: &mut G, basket_id: Uuid, street: &str) -> SimResult<Order>
where
    S: OrderRepository + UnitOfWork + ?Sized,
    G: GeoClient + ?Sized,
{
    if street.trim().is_empty() {
        return Err(CoreError::ValueRequired("street").into());
    }

    let target = geo.resolve(street)?;
    let order = Order::new(basket_id, target)?;
    in_unit_of_work(store, |store| Ok(store.add_order(&order)?))?;

    info!(order_id = %order.id(), street, %target, "order created");
    Ok(order)
}
