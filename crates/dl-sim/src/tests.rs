//! Integration tests for dl-sim.

use dl_core::{CoreError, CourierId, Location, OrderId, SimConfig, SimRng, Tick, Transport, Uuid};
use dl_courier::{Courier, CourierStatus};
use dl_dispatch::{DispatchError, DispatchResult, Dispatcher};
use dl_order::{Order, OrderStatus};
use dl_store::{
    CourierRepository, GeoClient, InMemoryStore, OrderRepository, RandomGeoClient, RetryPolicy,
    RetryingGeoClient, StoreError, StoreResult, UnitOfWork,
};

use crate::{
    AssignReport, MoveReport, NoopObserver, SimBuilder, SimError, SimObserver, TickSummary,
    assign_orders, create_order, move_couriers,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        start_unix_secs:       0,
        tick_duration_secs:    1,
        total_ticks,
        seed:                  42,
        assign_interval_ticks: 1,
        move_interval_ticks:   1,
        output_interval_ticks: total_ticks,
    }
}

fn loc(x: i32, y: i32) -> Location {
    Location::new(x, y).unwrap()
}

fn courier(name: &str, transport: Transport, x: i32, y: i32) -> Courier {
    Courier::new(name, transport, loc(x, y)).unwrap()
}

fn order_to(x: i32, y: i32) -> Order {
    Order::new(Uuid::new_v4(), loc(x, y)).unwrap()
}

/// A committed store holding `couriers` and `orders`.
fn seeded(couriers: &[Courier], orders: &[Order]) -> InMemoryStore {
    let mut store = InMemoryStore::new();
    for c in couriers {
        store.add_courier(c).unwrap();
    }
    for o in orders {
        store.add_order(o).unwrap();
    }
    store.commit().unwrap();
    store
}

fn stored_order(store: &InMemoryStore, id: OrderId) -> Order {
    store.find_order(id).unwrap().unwrap()
}

fn stored_courier(store: &InMemoryStore, id: CourierId) -> Courier {
    store.find_courier(id).unwrap().unwrap()
}

/// Wraps an [`InMemoryStore`] whose commits and order updates can be made
/// to fail.
#[derive(Default)]
struct FlakyStore {
    inner:              InMemoryStore,
    fail_commits:       bool,
    fail_order_updates: usize,
    commits:            usize,
}

impl OrderRepository for FlakyStore {
    fn add_order(&mut self, order: &Order) -> StoreResult<()> {
        self.inner.add_order(order)
    }
    fn update_order(&mut self, order: &Order) -> StoreResult<()> {
        if self.fail_order_updates > 0 {
            self.fail_order_updates -= 1;
            return Err(StoreError::Unavailable("orders table locked".into()));
        }
        self.inner.update_order(order)
    }
    fn find_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        self.inner.find_order(id)
    }
    fn find_created(&self) -> StoreResult<Vec<Order>> {
        self.inner.find_created()
    }
    fn find_assigned(&self) -> StoreResult<Vec<Order>> {
        self.inner.find_assigned()
    }
}

impl CourierRepository for FlakyStore {
    fn add_courier(&mut self, courier: &Courier) -> StoreResult<()> {
        self.inner.add_courier(courier)
    }
    fn update_courier(&mut self, courier: &Courier) -> StoreResult<()> {
        self.inner.update_courier(courier)
    }
    fn find_courier(&self, id: CourierId) -> StoreResult<Option<Courier>> {
        self.inner.find_courier(id)
    }
    fn find_free(&self) -> StoreResult<Vec<Courier>> {
        self.inner.find_free()
    }
    fn find_busy(&self) -> StoreResult<Vec<Courier>> {
        self.inner.find_busy()
    }
}

impl UnitOfWork for FlakyStore {
    fn commit(&mut self) -> StoreResult<()> {
        if self.fail_commits {
            self.inner.rollback();
            return Err(StoreError::Unavailable("database offline".into()));
        }
        self.commits += 1;
        self.inner.commit()
    }
    fn rollback(&mut self) {
        self.inner.rollback()
    }
}

/// Always unavailable.
struct DownGeo;

impl GeoClient for DownGeo {
    fn resolve(&mut self, _street: &str) -> StoreResult<Location> {
        Err(StoreError::Unavailable("geocoder timeout".into()))
    }
}

// ── Assignment loop ───────────────────────────────────────────────────────────

#[cfg(test)]
mod assign_tests {
    use super::*;

    use dl_dispatch::FastestCourierDispatcher;

    #[test]
    fn assigns_fastest_courier() {
        let car = courier("A", Transport::Car, 2, 1);
        let walker = courier("B", Transport::Pedestrian, 10, 4);
        let order = order_to(6, 3);
        let mut store = seeded(&[walker.clone(), car.clone()], &[order.clone()]);

        let report = assign_orders(&mut store, &FastestCourierDispatcher).unwrap();
        assert_eq!(report, AssignReport { assigned: 1, skipped: 0 });

        let stored = stored_order(&store, order.id());
        assert_eq!(stored.status(), OrderStatus::Assigned);
        assert_eq!(stored.courier_id(), Some(car.id()));
        assert_eq!(stored_courier(&store, car.id()).status(), CourierStatus::Busy);
        assert_eq!(stored_courier(&store, walker.id()).status(), CourierStatus::Free);
    }

    #[test]
    fn one_courier_two_orders() {
        let c = courier("solo", Transport::Bicycle, 1, 1);
        let first = order_to(9, 9);
        let second = order_to(1, 2);
        let mut store = seeded(&[c.clone()], &[first.clone(), second.clone()]);

        let report = assign_orders(&mut store, &FastestCourierDispatcher).unwrap();
        assert_eq!(report, AssignReport { assigned: 1, skipped: 1 });
        assert_eq!(stored_order(&store, first.id()).courier_id(), Some(c.id()));
        assert_eq!(stored_order(&store, second.id()).status(), OrderStatus::Created);
    }

    #[test]
    fn no_couriers_leaves_orders_pending() {
        let orders = [order_to(1, 1), order_to(2, 2)];
        let mut store = seeded(&[], &orders);

        let report = assign_orders(&mut store, &FastestCourierDispatcher).unwrap();
        assert_eq!(report, AssignReport { assigned: 0, skipped: 2 });
        assert_eq!(store.find_created().unwrap().len(), 2);
    }

    #[test]
    fn pending_order_picked_up_once_courier_frees() {
        let mut c = courier("c", Transport::Car, 1, 1);
        c.make_busy().unwrap();
        let order = order_to(3, 3);
        let mut store = seeded(&[c.clone()], &[order.clone()]);

        assert_eq!(assign_orders(&mut store, &FastestCourierDispatcher).unwrap().skipped, 1);

        c.make_free().unwrap();
        store.update_courier(&c).unwrap();
        store.commit().unwrap();

        assert_eq!(assign_orders(&mut store, &FastestCourierDispatcher).unwrap().assigned, 1);
        assert_eq!(stored_order(&store, order.id()).courier_id(), Some(c.id()));
    }

    #[test]
    fn commit_failure_aborts_and_persists_nothing() {
        let c = courier("c", Transport::Car, 1, 1);
        let order = order_to(3, 3);
        let mut store = FlakyStore { inner: seeded(&[c.clone()], &[order.clone()]), ..FlakyStore::default() };
        store.fail_commits = true;

        let err = assign_orders(&mut store, &FastestCourierDispatcher).unwrap_err();
        assert!(matches!(err, SimError::Store(StoreError::Unavailable(_))));
        assert_eq!(stored_order(&store.inner, order.id()).status(), OrderStatus::Created);
        assert_eq!(stored_courier(&store.inner, c.id()).status(), CourierStatus::Free);
    }

    #[test]
    fn failed_order_update_does_not_leave_courier_staged() {
        let c = courier("c", Transport::Car, 1, 1);
        let order = order_to(3, 3);
        let mut store = FlakyStore { inner: seeded(&[c.clone()], &[order.clone()]), ..FlakyStore::default() };
        store.fail_order_updates = 1;

        let err = assign_orders(&mut store, &FastestCourierDispatcher).unwrap_err();
        assert!(matches!(err, SimError::Store(StoreError::Unavailable(_))));
        assert_eq!(store.inner.pending(), 0);

        // A later commit from another loop must not persist a Busy courier
        // whose order is still Created.
        assert_eq!(move_couriers(&mut store).unwrap(), MoveReport::default());
        assert_eq!(stored_courier(&store.inner, c.id()).status(), CourierStatus::Free);
        assert_eq!(stored_order(&store.inner, order.id()).status(), OrderStatus::Created);

        let report = assign_orders(&mut store, &FastestCourierDispatcher).unwrap();
        assert_eq!(report.assigned, 1);
        assert_eq!(stored_courier(&store.inner, c.id()).status(), CourierStatus::Busy);
        assert_eq!(stored_order(&store.inner, order.id()).courier_id(), Some(c.id()));
    }

    #[test]
    fn commits_once_per_assigned_pair() {
        let couriers = [courier("a", Transport::Car, 1, 1), courier("b", Transport::Car, 9, 9)];
        let orders = [order_to(2, 2), order_to(8, 8), order_to(5, 5)];
        let mut store = FlakyStore { inner: seeded(&couriers, &orders), ..FlakyStore::default() };

        let report = assign_orders(&mut store, &FastestCourierDispatcher).unwrap();
        assert_eq!(report, AssignReport { assigned: 2, skipped: 1 });
        assert_eq!(store.commits, 2);
    }
}

// ── Movement loop ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement_tests {
    use super::*;

    use dl_dispatch::FastestCourierDispatcher;

    #[test]
    fn courier_already_at_target_delivers_without_moving() {
        let c = courier("c", Transport::Pedestrian, 4, 4);
        let order = order_to(4, 4);
        let mut store = seeded(&[c.clone()], &[order.clone()]);
        assign_orders(&mut store, &FastestCourierDispatcher).unwrap();

        let report = move_couriers(&mut store).unwrap();
        assert_eq!(report, MoveReport { moved: 0, completed: 1, skipped: 0, failed: 0 });

        let done = stored_order(&store, order.id());
        assert_eq!(done.status(), OrderStatus::Completed);
        assert_eq!(done.courier_id(), None);
        let freed = stored_courier(&store, c.id());
        assert!(freed.is_free());
        assert_eq!(freed.location(), loc(4, 4));
    }

    #[test]
    fn walks_one_cell_per_pass_then_delivers() {
        let c = courier("walker", Transport::Pedestrian, 1, 1);
        let order = order_to(1, 4);
        let mut store = seeded(&[c.clone()], &[order.clone()]);
        assign_orders(&mut store, &FastestCourierDispatcher).unwrap();

        for y in 2..4 {
            let report = move_couriers(&mut store).unwrap();
            assert_eq!(report, MoveReport { moved: 1, ..MoveReport::default() });
            let moving = stored_courier(&store, c.id());
            assert_eq!(moving.location(), loc(1, y));
            assert_eq!(moving.status(), CourierStatus::Busy);
        }

        let report = move_couriers(&mut store).unwrap();
        assert_eq!(report, MoveReport { moved: 1, completed: 1, ..MoveReport::default() });
        assert_eq!(stored_courier(&store, c.id()).location(), loc(1, 4));
        assert_eq!(stored_order(&store, order.id()).status(), OrderStatus::Completed);
        assert!(store.find_busy().unwrap().is_empty());
    }

    #[test]
    fn mixed_batch() {
        let bike = courier("bike", Transport::Bicycle, 1, 1);
        let walker = courier("walker", Transport::Pedestrian, 9, 9);
        let near = order_to(1, 2);
        let far = order_to(5, 5);
        let mut store = seeded(&[bike.clone(), walker.clone()], &[near.clone(), far.clone()]);
        assert_eq!(assign_orders(&mut store, &FastestCourierDispatcher).unwrap().assigned, 2);

        let report = move_couriers(&mut store).unwrap();
        assert_eq!(report, MoveReport { moved: 2, completed: 1, skipped: 0, failed: 0 });
        assert_eq!(stored_order(&store, near.id()).status(), OrderStatus::Completed);
        assert_eq!(stored_order(&store, far.id()).status(), OrderStatus::Assigned);
        assert_eq!(stored_courier(&store, walker.id()).location(), loc(8, 9));
    }

    #[test]
    fn busy_courier_without_order_is_skipped() {
        let mut orphan = courier("orphan", Transport::Car, 3, 3);
        orphan.make_busy().unwrap();
        let mut store = seeded(&[orphan.clone()], &[]);

        let report = move_couriers(&mut store).unwrap();
        assert_eq!(report, MoveReport { skipped: 1, ..MoveReport::default() });
        assert_eq!(stored_courier(&store, orphan.id()), orphan);
    }

    #[test]
    fn commit_failure_discards_the_batch() {
        let c = courier("c", Transport::Car, 1, 1);
        let order = order_to(9, 1);
        let mut store = FlakyStore { inner: seeded(&[c.clone()], &[order.clone()]), ..FlakyStore::default() };
        assign_orders(&mut store, &FastestCourierDispatcher).unwrap();

        store.fail_commits = true;
        let err = move_couriers(&mut store).unwrap_err();
        assert!(matches!(err, SimError::Store(_)));
        assert_eq!(stored_courier(&store.inner, c.id()).location(), loc(1, 1));

        store.fail_commits = false;
        move_couriers(&mut store).unwrap();
        assert_eq!(stored_courier(&store.inner, c.id()).location(), loc(4, 1));
    }

    #[test]
    fn failed_order_update_rolls_back_earlier_moves() {
        let car = courier("car", Transport::Car, 1, 1);
        let walker = courier("walker", Transport::Pedestrian, 4, 4);
        let far = order_to(9, 1);
        let here = order_to(4, 4);
        let mut store = FlakyStore {
            inner: seeded(&[car.clone(), walker.clone()], &[far.clone(), here.clone()]),
            ..FlakyStore::default()
        };
        assert_eq!(assign_orders(&mut store, &FastestCourierDispatcher).unwrap().assigned, 2);
        assert_eq!(stored_order(&store.inner, far.id()).courier_id(), Some(car.id()));

        // The car's move is staged before the walker's delivery fails.
        store.fail_order_updates = 1;
        let err = move_couriers(&mut store).unwrap_err();
        assert!(matches!(err, SimError::Store(StoreError::Unavailable(_))));
        assert_eq!(store.inner.pending(), 0);
        assert_eq!(stored_courier(&store.inner, car.id()).location(), loc(1, 1));

        let report = move_couriers(&mut store).unwrap();
        assert_eq!(report, MoveReport { moved: 1, completed: 1, skipped: 0, failed: 0 });
        assert_eq!(stored_courier(&store.inner, car.id()).location(), loc(4, 1));
        assert_eq!(stored_order(&store.inner, here.id()).status(), OrderStatus::Completed);
        assert!(stored_courier(&store.inner, walker.id()).is_free());
    }

    #[test]
    fn end_to_end_assign_then_move() {
        let c = courier("c", Transport::Bicycle, 6, 2);
        let order = order_to(6, 2);
        let mut store = seeded(&[c.clone()], &[order.clone()]);

        assign_orders(&mut store, &FastestCourierDispatcher).unwrap();
        move_couriers(&mut store).unwrap();

        assert_eq!(stored_order(&store, order.id()).status(), OrderStatus::Completed);
        let c = stored_courier(&store, c.id());
        assert_eq!(c.status(), CourierStatus::Free);
        assert_eq!(c.location(), loc(6, 2));
    }
}

// ── Create order ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod create_tests {
    use super::*;

    #[test]
    fn creates_and_commits() {
        let mut store = InMemoryStore::new();
        let mut geo = RandomGeoClient::new(SimRng::new(3));
        let basket = Uuid::new_v4();

        let order = create_order(&mut store, &mut geo, basket, "Main St 1").unwrap();
        assert_eq!(order.id().as_uuid(), basket);
        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(store.find_created().unwrap(), vec![order]);
    }

    #[test]
    fn blank_street_rejected() {
        let mut store = InMemoryStore::new();
        let mut geo = RandomGeoClient::new(SimRng::new(3));
        let err = create_order(&mut store, &mut geo, Uuid::new_v4(), "   ").unwrap_err();
        assert!(matches!(err, SimError::Core(CoreError::ValueRequired("street"))));
        assert!(store.orders().is_empty());
    }

    #[test]
    fn nil_basket_rejected() {
        let mut store = InMemoryStore::new();
        let mut geo = RandomGeoClient::new(SimRng::new(3));
        let err = create_order(&mut store, &mut geo, Uuid::nil(), "Main St 1").unwrap_err();
        assert!(matches!(err, SimError::Order(_)));
        assert!(store.orders().is_empty());
    }

    #[test]
    fn geocoder_outage_surfaces_after_retries() {
        let mut store = InMemoryStore::new();
        let mut geo = RetryingGeoClient::with_policy(DownGeo, RetryPolicy::immediate(3));
        let err = create_order(&mut store, &mut geo, Uuid::new_v4(), "Main St 1").unwrap_err();
        assert!(matches!(err, SimError::Store(StoreError::Unavailable(_))));
        assert!(store.orders().is_empty());
    }
}

// ── SimBuilder and run ────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts:    usize,
        summaries: Vec<TickSummary>,
        snapshots: Vec<(Tick, usize, usize)>,
        ended_at:  Option<Tick>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
            self.summaries.push(*summary);
        }
        fn on_snapshot(&mut self, tick: Tick, couriers: &[Courier], orders: &[Order]) {
            self.snapshots.push((tick, couriers.len(), orders.len()));
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.ended_at = Some(final_tick);
        }
    }

    /// Refuses every order.
    struct NeverDispatch;

    impl Dispatcher for NeverDispatch {
        fn dispatch<'c>(&self, _order: &mut Order, _couriers: &'c mut [Courier]) -> DispatchResult<&'c Courier> {
            Err(DispatchError::NoFreeCouriers)
        }
    }

    #[test]
    fn zero_interval_rejected() {
        let config = SimConfig { move_interval_ticks: 0, ..test_config(5) };
        let result = SimBuilder::new(config, InMemoryStore::new()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn builder_hires_couriers() {
        let couriers = vec![courier("a", Transport::Car, 1, 1), courier("b", Transport::Bicycle, 2, 2)];
        let sim = SimBuilder::new(test_config(5), InMemoryStore::new())
            .couriers(couriers.clone())
            .build()
            .unwrap();
        assert_eq!(sim.store.find_free().unwrap(), couriers);
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn single_tick_delivers_order_at_courier_location() {
        let c = courier("c", Transport::Pedestrian, 7, 7);
        let mut sim = SimBuilder::new(test_config(10), InMemoryStore::new())
            .couriers(vec![c.clone()])
            .build()
            .unwrap();
        let order = order_to(7, 7);
        sim.store.add_order(&order).unwrap();
        sim.store.commit().unwrap();

        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();

        assert_eq!(rec.summaries[0].assigned(), 1);
        assert_eq!(rec.summaries[0].completed(), 1);
        assert_eq!(stored_order(&sim.store, order.id()).status(), OrderStatus::Completed);
        assert!(stored_courier(&sim.store, c.id()).is_free());
        assert_eq!(sim.clock.current_tick, Tick(1));
    }

    #[test]
    fn run_reaches_end_tick_and_calls_hooks() {
        let mut sim = SimBuilder::new(test_config(7), InMemoryStore::new()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(7));
        assert_eq!(rec.starts, 7);
        assert_eq!(rec.summaries.len(), 7);
        assert_eq!(rec.ended_at, Some(Tick(7)));
    }

    #[test]
    fn loops_respect_intervals() {
        let config = SimConfig { move_interval_ticks: 2, output_interval_ticks: 2, ..test_config(4) };
        let mut sim = SimBuilder::new(config, InMemoryStore::new())
            .couriers(vec![courier("a", Transport::Car, 1, 1)])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let moved_on: Vec<u64> = rec.summaries.iter().filter(|s| s.movement.is_some()).map(|s| s.tick.0).collect();
        assert_eq!(moved_on, [0, 2]);
        assert!(rec.summaries.iter().all(|s| s.assign.is_some()));
        assert_eq!(rec.snapshots, [(Tick(0), 1, 0), (Tick(2), 1, 0)]);
    }

    #[test]
    fn delivery_over_several_ticks() {
        let c = courier("walker", Transport::Pedestrian, 1, 1);
        let mut sim = SimBuilder::new(test_config(10), InMemoryStore::new())
            .couriers(vec![c.clone()])
            .build()
            .unwrap();
        let mut geo = RandomGeoClient::new(SimRng::new(11));
        let order = sim.create_order(&mut geo, Uuid::new_v4(), "Elm St 5").unwrap();
        let ticks_needed = u64::from(loc(1, 1).distance_to(order.target())).max(1);

        let mut rec = Recorder::default();
        sim.run_ticks(ticks_needed, &mut rec).unwrap();

        assert_eq!(stored_order(&sim.store, order.id()).status(), OrderStatus::Completed);
        let total: usize = rec.summaries.iter().map(TickSummary::completed).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn custom_dispatcher_is_used() {
        let mut sim = SimBuilder::new(test_config(3), InMemoryStore::new())
            .couriers(vec![courier("a", Transport::Car, 1, 1)])
            .dispatcher(NeverDispatch)
            .build()
            .unwrap();
        sim.store.add_order(&order_to(2, 2)).unwrap();
        sim.store.commit().unwrap();

        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.store.find_created().unwrap().len(), 1);
        assert_eq!(sim.store.find_free().unwrap().len(), 1);
    }
}
