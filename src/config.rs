//! # Generator Configuration
//!
//! Static data supplied at construction time: frame prototypes with their
//! sampling weights and supply counts, layer orders, and optional world
//! bounds. Loaded once, typically from an external TOML file, and never
//! mutated afterwards.
//!
//! ## Supply counts
//!
//! A **positive** count is a finite remaining supply, **zero** permanently
//! excludes the prototype, and a **negative** count means unlimited supply.

use crate::error::{GeneratorError, GeneratorResult};
use crate::frame::FramePrototype;
use crate::layer::LayerPrototype;
use crate::math::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A frame prototype together with its sampling weight and supply count.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameSlot {
    /// The prototype definition.
    pub prototype: FramePrototype,
    /// Base sampling weight; must be finite and non-negative.
    pub weight: f32,
    /// Initial supply count (negative = unlimited).
    pub count: i32,
}

/// A layer prototype together with its sampling weight and supply count.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayerSlot {
    /// The prototype definition.
    pub prototype: LayerPrototype,
    /// Base sampling weight; must be finite and non-negative.
    pub weight: f32,
    /// Initial supply count (negative = unlimited).
    pub count: i32,
}

/// One layer pass. Orders run once each per generated frame, in sequence;
/// each order places at most one layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LayerOrder {
    /// Candidate layers for this pass, in tie-break order.
    pub layers: Vec<LayerSlot>,
}

/// Complete static configuration for a [`LevelGenerator`].
///
/// [`LevelGenerator`]: crate::generator::LevelGenerator
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// When set, every placed frame's world rectangle must lie entirely
    /// within this rectangle.
    #[serde(default)]
    pub bounds: Option<Rect>,
    /// Frame prototypes in tie-break order.
    pub frames: Vec<FrameSlot>,
    /// Layer passes, outermost first.
    #[serde(default)]
    pub layer_orders: Vec<LayerOrder>,
}

impl GeneratorConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Parse`] on malformed TOML.
    pub fn from_toml_str(text: &str) -> GeneratorResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Io`] if the file cannot be read and
    /// [`GeneratorError::Parse`] if it is not valid TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> GeneratorResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks the locally-verifiable invariants: at least one frame, finite
    /// non-negative weights, bounds orientation.
    ///
    /// Cross-prototype consistency (plug graph, layer frame keys) is checked
    /// while the compatibility index is built.
    ///
    /// # Errors
    ///
    /// Returns the first configuration inconsistency found.
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.frames.is_empty() {
            return Err(GeneratorError::NoFrames);
        }

        if let Some(bounds) = &self.bounds {
            if !bounds.is_ordered() {
                return Err(GeneratorError::InvertedBounds);
            }
        }

        for (index, slot) in self.frames.iter().enumerate() {
            if !slot.weight.is_finite() || slot.weight < 0.0 {
                return Err(GeneratorError::InvalidWeight {
                    kind: "frame",
                    index,
                    weight: slot.weight,
                });
            }
        }

        for order in &self.layer_orders {
            for (index, slot) in order.layers.iter().enumerate() {
                if !slot.weight.is_finite() || slot.weight < 0.0 {
                    return Err(GeneratorError::InvalidWeight {
                        kind: "layer",
                        index,
                        weight: slot.weight,
                    });
                }
            }
        }

        Ok(())
    }
}
