//! Retained layer tree
//!
//! Every layer owns its authoritative *model* values (frame, bounds, opacity)
//! and an ordered list of sublayers. The tree knows nothing about animation:
//! it is the plain store the animation engine reads old values from and writes
//! destination values into.
//!
//! Frame and bounds are coupled the way a layer's geometry is upstream:
//! writing a frame resizes the bounds, writing bounds resizes the frame. The
//! origins stay independent (frame origin is the position in the superlayer,
//! bounds origin is the layer's own scroll offset).

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::{CoreError, Result};
use crate::geometry::Rect;

new_key_type! {
    /// Generational handle to a layer in a [`LayerTree`]
    pub struct LayerId;
}

/// The interpolable model values of a layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerValues {
    pub frame: Rect,
    pub bounds: Rect,
    pub opacity: f32,
}

impl Default for LayerValues {
    fn default() -> Self {
        Self {
            frame: Rect::ZERO,
            bounds: Rect::ZERO,
            opacity: 1.0,
        }
    }
}

impl LayerValues {
    /// Values for a fully opaque layer with the given frame
    pub fn with_frame(frame: Rect) -> Self {
        Self {
            frame,
            bounds: frame.size.to_rect(),
            opacity: 1.0,
        }
    }

    /// Set opacity (builder pattern)
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Internal layer storage
struct LayerNode {
    values: LayerValues,
    superlayer: Option<LayerId>,
    sublayers: SmallVec<[LayerId; 4]>,
}

/// The retained layer tree
#[derive(Default)]
pub struct LayerTree {
    layers: SlotMap<LayerId, LayerNode>,
}

impl LayerTree {
    pub fn new() -> Self {
        Self {
            layers: SlotMap::with_key(),
        }
    }

    /// Insert a detached layer
    pub fn insert(&mut self, values: LayerValues) -> LayerId {
        self.layers.insert(LayerNode {
            values,
            superlayer: None,
            sublayers: SmallVec::new(),
        })
    }

    /// Remove a layer and its whole subtree
    ///
    /// Returns every removed id, the layer itself first.
    pub fn remove(&mut self, id: LayerId) -> Result<Vec<LayerId>> {
        self.remove_from_superlayer(id)?;

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.layers.remove(next) {
                stack.extend(node.sublayers.iter().rev().copied());
                removed.push(next);
            }
        }
        tracing::debug!(?id, count = removed.len(), "removed layer subtree");
        Ok(removed)
    }

    /// Attach `child` as the last sublayer of `parent`
    ///
    /// A child that already has a superlayer is moved.
    pub fn add_sublayer(&mut self, parent: LayerId, child: LayerId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(CoreError::Cycle { parent, child });
            }
            ancestor = self.layers.get(current).and_then(|n| n.superlayer);
        }

        self.remove_from_superlayer(child)?;
        self.node_mut(parent)?.sublayers.push(child);
        self.node_mut(child)?.superlayer = Some(parent);
        Ok(())
    }

    /// Detach a layer from its superlayer (no-op for root layers)
    pub fn remove_from_superlayer(&mut self, id: LayerId) -> Result<()> {
        let Some(parent) = self.node_mut(id)?.superlayer.take() else {
            return Ok(());
        };
        if let Some(parent) = self.layers.get_mut(parent) {
            parent.sublayers.retain(|sub| *sub != id);
        }
        Ok(())
    }

    /// Sublayers of a layer, in insertion order (empty for unknown ids)
    pub fn sublayers(&self, id: LayerId) -> &[LayerId] {
        self.layers
            .get(id)
            .map(|n| n.sublayers.as_slice())
            .unwrap_or(&[])
    }

    pub fn superlayer(&self, id: LayerId) -> Option<LayerId> {
        self.layers.get(id).and_then(|n| n.superlayer)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(id)
    }

    /// Number of live layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    // =========================================================================
    // Model values
    // =========================================================================

    pub fn values(&self, id: LayerId) -> Result<LayerValues> {
        Ok(self.node(id)?.values)
    }

    pub fn frame(&self, id: LayerId) -> Result<Rect> {
        Ok(self.node(id)?.values.frame)
    }

    pub fn bounds(&self, id: LayerId) -> Result<Rect> {
        Ok(self.node(id)?.values.bounds)
    }

    pub fn opacity(&self, id: LayerId) -> Result<f32> {
        Ok(self.node(id)?.values.opacity)
    }

    /// Write the frame without any animation; bounds size follows
    pub fn set_frame_raw(&mut self, id: LayerId, frame: Rect) -> Result<()> {
        let values = &mut self.node_mut(id)?.values;
        values.frame = frame;
        values.bounds.size = frame.size;
        Ok(())
    }

    /// Write the bounds without any animation; frame size follows
    pub fn set_bounds_raw(&mut self, id: LayerId, bounds: Rect) -> Result<()> {
        let values = &mut self.node_mut(id)?.values;
        values.bounds = bounds;
        values.frame.size = bounds.size;
        Ok(())
    }

    pub fn set_opacity_raw(&mut self, id: LayerId, opacity: f32) -> Result<()> {
        self.node_mut(id)?.values.opacity = opacity;
        Ok(())
    }

    fn node(&self, id: LayerId) -> Result<&LayerNode> {
        self.layers.get(id).ok_or(CoreError::LayerNotFound(id))
    }

    fn node_mut(&mut self, id: LayerId) -> Result<&mut LayerNode> {
        self.layers.get_mut(id).ok_or(CoreError::LayerNotFound(id))
    }
}
