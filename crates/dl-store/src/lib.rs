//! `dl-store` — the ports the dispatch loops talk to, and reference adapters.
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`ports`]  | `OrderRepository`, `CourierRepository`, `UnitOfWork`, `GeoClient` |
//! | [`memory`] | `InMemoryStore` (insertion-ordered, staged writes)             |
//! | [`geo`]    | `RandomGeoClient`, `RetryingGeoClient`, `RetryPolicy`          |
//! | `sqlite`   | `SqliteStore` (feature `sqlite`)                               |
//! | [`error`]  | `StoreError`, `StoreResult<T>`                                 |
//!
//! Every adapter stages `add_*` / `update_*` calls and applies them only on
//! `commit`, so a unit of work that fails half-way leaves nothing behind.

pub mod error;
pub mod geo;
pub mod memory;
pub mod ports;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use error::{StoreError, StoreResult};
pub use geo::{RandomGeoClient, RetryPolicy, RetryingGeoClient};
pub use memory::InMemoryStore;
pub use ports::{CourierRepository, DeliveryStore, GeoClient, OrderRepository, UnitOfWork};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
