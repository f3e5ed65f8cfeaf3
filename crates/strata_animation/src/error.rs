//! Animation error types

use thiserror::Error;

use strata_core::CoreError;

/// Errors raised by the animator's fallible operations
///
/// Ticking never fails; only layer bookkeeping and configuration loading do.
#[derive(Error, Debug)]
pub enum AnimationError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid animator config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to serialize animator config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type for animator operations
pub type Result<T> = std::result::Result<T, AnimationError>;
