//! Strata Core
//!
//! The retained layer model that the Strata animation engine drives:
//!
//! - **Geometry**: `Point`, `Size` and `Rect` value types
//! - **Layer Tree**: generational layer ids, sublayer hierarchy and the
//!   authoritative model values (frame, bounds, opacity) of every layer
//!
//! # Example
//!
//! ```rust
//! use strata_core::{LayerTree, LayerValues, Rect};
//!
//! let mut tree = LayerTree::new();
//! let root = tree.insert(LayerValues::with_frame(Rect::new(0.0, 0.0, 320.0, 480.0)));
//! let child = tree.insert(LayerValues::default());
//! tree.add_sublayer(root, child).unwrap();
//!
//! assert_eq!(tree.sublayers(root), &[child]);
//! assert_eq!(tree.bounds(root).unwrap().size, tree.frame(root).unwrap().size);
//! ```

pub mod error;
pub mod geometry;
pub mod layer;

pub use error::{CoreError, Result};
pub use geometry::{Point, Rect, Size};
pub use layer::{LayerId, LayerTree, LayerValues};
