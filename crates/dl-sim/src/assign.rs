//! The assignment loop: match every pending order to a free courier.

use tracing::{debug, info, warn};

use dl_dispatch::Dispatcher;
use dl_store::DeliveryStore;

use crate::unit::in_unit_of_work;
use crate::{AssignReport, SimResult};

/// Try to dispatch every `Created` order once.
///
/// Free couriers are re-read for each order and each successful pair is
/// committed before moving on, so a courier taken by one order is never
/// offered to the next.  Dispatch failures are logged and the order is left
/// for a later tick; store errors roll back the pair in progress and abort
/// the pass.
pub fn assign_orders<S, D>(store: &mut S, dispatcher: &D) -> SimResult<AssignReport>
where
    S: DeliveryStore + ?Sized,
    D: Dispatcher + ?Sized,
{
    let mut report = AssignReport::default();

    for mut order in store.find_created()? {
        let mut couriers = store.find_free()?;

        let courier = match dispatcher.dispatch(&mut order, &mut couriers) {
            Ok(courier) => courier.clone(),
            Err(e) if e.is_no_candidate() => {
                debug!(order_id = %order.id(), error = %e, "order not dispatched");
                report.skipped += 1;
                continue;
            }
            Err(e) => {
                warn!(order_id = %order.id(), error = %e, "order not dispatched");
                report.skipped += 1;
                continue;
            }
        };

        in_unit_of_work(store, |store| {
            store.update_courier(&courier)?;
            store.update_order(&order)?;
            Ok(())
        })?;

        info!(order_id = %order.id(), courier_id = %courier.id(), "order assigned");
        report.assigned += 1;
    }

    Ok(report)
}
