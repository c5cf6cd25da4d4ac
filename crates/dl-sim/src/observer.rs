//! Simulation observer trait for progress reporting and data collection.

use dl_core::Tick;
use dl_courier::Courier;
use dl_order::Order;

use crate::TickSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Delivered(usize);
///
/// impl SimObserver for Delivered {
///     fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
///         self.0 += summary.completed();
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any loop runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the reports of the loops that ran.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    ///
    /// `couriers` holds every courier (free first, then busy); `orders` holds
    /// the open orders (created first, then assigned).
    fn on_snapshot(&mut self, _tick: Tick, _couriers: &[Courier], _orders: &[Order]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
