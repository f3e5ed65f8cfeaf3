//! Strata Animation
//!
//! Declarative property animations for the Strata layer tree.
//!
//! # Features
//!
//! - **Implicit Animations**: Changing `frame`, `bounds` or `opacity` animates
//!   from the old value to the new one with a short default prototype
//! - **Explicit Animations**: `animate(...)` scopes a prototype over a closure
//!   and reports completion exactly once per call
//! - **Spring Variant**: `animate_spring(...)` carries damping and velocity
//! - **Presentation Snapshots**: Model values update immediately; what is on
//!   screen is interpolated per tick into a separate value snapshot
//! - **Host-Driven Clock**: `animate_if_needed(now)` is the only place time
//!   enters the engine
//!
//! # Example
//!
//! ```rust
//! use strata_animation::{AnimationOptions, Animator};
//! use strata_core::{LayerValues, Rect};
//!
//! let mut animator = Animator::new();
//! let layer = animator.add_layer(LayerValues::with_frame(Rect::new(0.0, 0.0, 10.0, 10.0)));
//!
//! animator
//!     .animate(
//!         0.5,
//!         0.0,
//!         AnimationOptions::default(),
//!         |a| a.set_frame(layer, Rect::new(100.0, 0.0, 10.0, 10.0)),
//!         Some(Box::new(|finished: bool| assert!(finished))),
//!     )
//!     .unwrap();
//!
//! // The model holds the destination right away
//! assert_eq!(animator.frame(layer).unwrap().x(), 100.0);
//!
//! animator.animate_if_needed(0.0);
//! animator.animate_if_needed(250.0);
//! let x = animator.presentation(layer).unwrap().frame.x();
//! assert!(x > 0.0 && x < 100.0);
//!
//! assert!(!animator.animate_if_needed(500.0));
//! assert!(animator.presentation(layer).is_none());
//! ```

pub mod animation;
pub mod animator;
pub mod config;
pub mod context;
pub mod easing;
pub mod error;
pub mod group;
pub mod presentation;
pub mod prototype;
pub mod scheduler;
pub mod values;

pub use animation::{KeyPath, PropertyAnimation};
pub use animator::Animator;
pub use config::AnimatorConfig;
pub use context::AnimationContext;
pub use easing::TimingCurve;
pub use error::{AnimationError, Result};
pub use group::{Completion, GroupId};
pub use presentation::PresentationSnapshot;
pub use prototype::{AnimationOptions, AnimationPrototype, PrototypeVariant, SpringParameters};
pub use values::{AnimatableValue, Interpolate};
