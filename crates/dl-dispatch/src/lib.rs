//! `dl-dispatch` — matches one pending order to the fastest free courier.
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`dispatcher`] | `Dispatcher` trait, `FastestCourierDispatcher`         |
//! | [`error`]      | `DispatchError`, `DispatchResult<T>`                   |
//!
//! Dispatch is a pure in-memory step: it mutates the order and the winning
//! courier but never touches storage.  Persisting the pair is the caller's
//! job (see `dl-sim`'s assignment loop).

pub mod dispatcher;
pub mod error;


pub use dispatcher::{Dispatcher, FastestCourierDispatcher};
pub use error::{DispatchError, DispatchResult};
