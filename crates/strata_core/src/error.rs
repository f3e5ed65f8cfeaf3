//! Core error types

use thiserror::Error;

use crate::layer::LayerId;

/// Errors raised by layer tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The id does not name a live layer (never inserted, or removed)
    #[error("Layer not found: {0:?}")]
    LayerNotFound(LayerId),

    /// Attaching the layer would make it its own ancestor
    #[error("Layer {child:?} cannot be attached below {parent:?}: would create a cycle")]
    Cycle { parent: LayerId, child: LayerId },
}

/// Result type for layer tree operations
pub type Result<T> = std::result::Result<T, CoreError>;
