//! Validation error type shared by every `dl-*` crate.
//!
//! Aggregate crates define their own error enums and wrap `CoreError` as one
//! `#[from]` variant, so a bad coordinate surfaces unchanged at any layer.

use thiserror::Error;

/// Validation failures for the foundational value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("coordinate {axis} = {value} is outside [{min}, {max}]")]
    InvalidCoordinate {
        axis:  char,
        value: i32,
        min:   i32,
        max:   i32,
    },

    #[error("unknown transport {0:?}")]
    UnknownTransport(String),

    #[error("a value is required for `{0}`")]
    ValueRequired(&'static str),

    #[error("invalid value for `{0}`")]
    ValueInvalid(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `dl-core`.
pub type CoreResult<T> = Result<T, CoreError>;
