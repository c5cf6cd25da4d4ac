//! Dispatch error type.

use dl_courier::CourierError;
use dl_order::{OrderError, OrderStatus};
use thiserror::Error;

/// Errors produced by a [`Dispatcher`][crate::Dispatcher].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("order is in status {0}, expected created")]
    InvalidOrderStatus(OrderStatus),

    #[error("there is no courier to process the order")]
    NoAnyCouriers,

    #[error("there is no free courier who could process the order")]
    NoFreeCouriers,

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Courier(#[from] CourierError),
}

impl DispatchError {
    /// `true` for the expected "nothing to do this tick" outcomes.
    #[inline]
    pub fn is_no_candidate(&self) -> bool {
        matches!(self, DispatchError::NoAnyCouriers | DispatchError::NoFreeCouriers)
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
