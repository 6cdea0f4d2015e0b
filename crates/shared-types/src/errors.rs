//! # Error Types
//!
//! Errors raised while decoding shared wire types.

use thiserror::Error;

/// A request id that is not a decimal counter value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid request id: {raw:?}")]
pub struct ParseIdError {
    /// The text that failed to parse.
    pub raw: String,
}
