//! Framework error type.
//!
//! Sub-crates define their own error enums; `sf-sim` wraps this one via
//! `From` so configuration failures surface through a single result type.

use thiserror::Error;

/// Errors raised while validating core configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("grid dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: u32, width: u32 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `sf-core`.
pub type CoreResult<T> = Result<T, CoreError>;
