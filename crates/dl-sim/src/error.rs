use thiserror::Error;

use dl_core::CoreError;
use dl_courier::CourierError;
use dl_dispatch::DispatchError;
use dl_order::OrderError;
use dl_store::StoreError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("courier error: {0}")]
    Courier(#[from] CourierError),

    #[error("order error: {0}")]
    Order(#[from] OrderError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type SimResult<T> = Result<T, SimError>;
