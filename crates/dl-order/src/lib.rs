//! `dl-order` — the order aggregate.
//!
//! # Lifecycle
//!
//! ```text
//!             assign(courier)             complete()
//!   Created ──────────────────▶ Assigned ────────────▶ Completed
//! ```
//!
//! `assign` is refused from `Assigned` (`AlreadyAssigned`) and from the
//! terminal `Completed` status (`AlreadyCompleted`); `complete` is refused
//! from anything but `Assigned` (`ImpossibleToComplete`).

pub mod error;
pub mod order;
pub mod status;


pub use error::{OrderError, OrderResult};
pub use order::Order;
pub use status::OrderStatus;
