//! `dl-courier` — the courier aggregate and its movement model.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`status`]    | `CourierStatus` (`Free` / `Busy`)                          |
//! | [`movement`]  | `step_towards` (one tick of travel), `steps_estimate`      |
//! | [`courier`]   | `Courier`: identity, transport, location, status           |
//! | [`error`]     | `CourierError`, `CourierResult<T>`                         |
//!
//! # State machine
//!
//! ```text
//!          make_busy            make_free
//!   Free ────────────▶ Busy ────────────▶ Free
//! ```
//!
//! Calling either transition from the wrong state is a guard error
//! (`AlreadyBusy` / `AlreadyFree`); the orchestration loops never do so in
//! normal flow.

pub mod courier;
pub mod error;
pub mod movement;
pub mod status;


pub use courier::Courier;
pub use error::{CourierError, CourierResult};
pub use movement::{step_towards, steps_estimate};
pub use status::CourierStatus;
