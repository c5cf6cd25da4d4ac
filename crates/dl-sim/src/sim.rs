//! The `Sim` struct and its tick loop.

use tracing::{debug, debug_span};

use dl_core::{SimClock, SimConfig, Tick, Uuid};
use dl_dispatch::Dispatcher;
use dl_order::Order;
use dl_store::{DeliveryStore, GeoClient};

use crate::{SimObserver, SimResult, TickSummary, assign_orders, create_order, move_couriers};

/// The tick runner.
///
/// Each tick runs, in this order:
///
/// 1. the assignment loop, when the tick is a multiple of
///    `config.assign_interval_ticks`;
/// 2. the movement loop, when the tick is a multiple of
///    `config.move_interval_ticks`.
///
/// The runner owns the store, so ticks never overlap.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: DeliveryStore, D: Dispatcher> {
    pub config: SimConfig,

    /// Tracks the current tick and maps it to wall time.
    pub clock: SimClock,

    pub store: S,

    pub dispatcher: D,
}

impl<S: DeliveryStore, D: Dispatcher> Sim<S, D> {
    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Create an order between ticks.  See [`create_order`].
    pub fn create_order<G: GeoClient + ?Sized>(
        &mut self,
        geo:       &mut G,
        basket_id: Uuid,
        street:    &str,
    ) -> SimResult<Order> {
        create_order(&mut self.store, geo, basket_id, street)
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;

        observer.on_tick_start(now);
        let summary = self.process_tick(now)?;
        observer.on_tick_end(now, &summary);

        if now.is_due(self.config.output_interval_ticks) {
            let mut couriers = self.store.find_free()?;
            couriers.extend(self.store.find_busy()?);
            let mut orders = self.store.find_created()?;
            orders.extend(self.store.find_assigned()?);
            observer.on_snapshot(now, &couriers, &orders);
        }

        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        let _span = debug_span!("tick", tick = now.0).entered();
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        if now.is_due(self.config.assign_interval_ticks) {
            let report = assign_orders(&mut self.store, &self.dispatcher)?;
            debug!(assigned = report.assigned, skipped = report.skipped, "assignment loop");
            summary.assign = Some(report);
        }

        if now.is_due(self.config.move_interval_ticks) {
            let report = move_couriers(&mut self.store)?;
            debug!(
                moved     = report.moved,
                completed = report.completed,
                skipped   = report.skipped,
                failed    = report.failed,
                "movement loop"
            );
            summary.movement = Some(report);
        }

        Ok(summary)
    }
}
