//! Collaborator error type.

use thiserror::Error;

use dl_core::{CoreError, CourierId, OrderId};
use dl_courier::CourierError;
use dl_order::OrderError;

/// Errors produced by repositories, the unit of work, and geolocation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("courier {0} not found")]
    CourierNotFound(CourierId),

    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    #[error("courier {0} already exists")]
    DuplicateCourier(CourierId),

    #[error("order {0} already exists")]
    DuplicateOrder(OrderId),

    /// Transient failure; the only kind [`RetryingGeoClient`][crate::RetryingGeoClient] retries.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("geolocation failed: {0}")]
    Geo(String),

    #[error("stored row is corrupt: {0}")]
    Corrupt(String),

    #[error("stored courier rejected: {0}")]
    Courier(#[from] CourierError),

    #[error("stored order rejected: {0}")]
    Order(#[from] OrderError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
