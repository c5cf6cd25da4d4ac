use dl_core::{CoreError, CourierId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourierError {
    #[error("courier {0} is not free now")]
    AlreadyBusy(CourierId),

    #[error("courier {0} is already free")]
    AlreadyFree(CourierId),

    #[error("courier name must not be empty")]
    EmptyName,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type CourierResult<T> = Result<T, CourierError>;
