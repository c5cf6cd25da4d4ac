//! `dl-sim` — the orchestration loops and the tick runner.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Assign — every assign_interval ticks: for each Created order,
//!               re-read free couriers, dispatch, commit the pair.
//!   ② Move   — every move_interval ticks: step each Busy courier towards
//!               its order; on arrival complete the order and free the
//!               courier.  One commit for the whole batch.
//!   ③ Output — every output_interval ticks: observer.on_snapshot(..)
//! ```
//!
//! The loops are plain functions over the `dl-store` ports, so they can be
//! driven without a [`Sim`] (e.g. from a scheduler of your own).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dl_core::SimConfig;
//! use dl_sim::{NoopObserver, SimBuilder};
//! use dl_store::InMemoryStore;
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), InMemoryStore::new())
//!     .couriers(couriers)
//!     .build()?;
//! sim.create_order(&mut geo, basket_id, "Main St 1")?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod assign;
pub mod builder;
pub mod create;
pub mod error;
pub mod movement;
pub mod observer;
pub mod report;
pub mod sim;
mod unit;

#[cfg(test)]
mod tests;

pub use assign::assign_orders;
pub use builder::SimBuilder;
pub use create::create_order;
pub use error::{SimError, SimResult};
pub use movement::move_couriers;
pub use observer::{NoopObserver, SimObserver};
pub use report::{AssignReport, MoveReport, TickSummary};
pub use sim::Sim;
