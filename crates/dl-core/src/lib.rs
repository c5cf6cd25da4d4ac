//! `dl-core` — foundational types for the `rust_dl` courier dispatch simulator.
//!
//! This crate is a dependency of every other `dl-*` crate.  It intentionally
//! has no `dl-*` dependencies and minimal external ones (`rand`, `thiserror`
//! and `uuid`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CourierId`, `OrderId`                                |
//! | [`location`]    | `Location` grid cell, Manhattan distance              |
//! | [`transport`]   | `Transport` enum and its speed table                  |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (seeded, reproducible)                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod location;
pub mod rng;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{CourierId, OrderId};
pub use location::Location;
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
pub use transport::Transport;
pub use uuid::Uuid;
