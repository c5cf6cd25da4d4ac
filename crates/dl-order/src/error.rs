use dl_core::{CoreError, OrderId};
use thiserror::Error;

use crate::OrderStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("order {0} has already been assigned")]
    AlreadyAssigned(OrderId),

    #[error("order {0} is completed and cannot be assigned")]
    AlreadyCompleted(OrderId),

    #[error("order {id} cannot be completed from status {status}: it is not assigned")]
    ImpossibleToComplete { id: OrderId, status: OrderStatus },

    #[error("order {id} in status {status} is inconsistent with its courier reference")]
    Inconsistent { id: OrderId, status: OrderStatus },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type OrderResult<T> = Result<T, OrderError>;
