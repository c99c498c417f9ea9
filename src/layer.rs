//! # Layers
//!
//! Decorative sub-pieces anchored to frames by frame key.
//!
//! Layers carry no sockets and are never overlap-checked; a placed layer is
//! a plain record of which prototype landed on which frame, and where.

use crate::frame::FrameId;
use crate::math::Vec2;
use serde::{Deserialize, Serialize};

/// An immutable layer definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerPrototype {
    /// The frame type this layer may attach to.
    pub frame_key: i32,
    /// The layer's own bottom-left offset, used to anchor it flush to the
    /// host frame's bottom-left corner.
    pub left_bottom: Vec2,
}

/// A placed layer. Created once per successful placement, never reused.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerInstance {
    /// Which configured layer order produced this placement.
    pub order: usize,
    /// Index of the prototype within that order.
    pub prototype: usize,
    /// The frame the layer is attached to.
    pub frame: FrameId,
    /// World position of the layer origin.
    pub position: Vec2,
}
