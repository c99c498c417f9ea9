//! # Generator Error Types
//!
//! Fatal configuration errors surfaced while building a generator.
//!
//! Expected dead-ends during generation (no eligible candidate at a socket
//! or layer order) are *not* errors; they are reported through the `None`
//! return of the generation calls.

use thiserror::Error;

/// Errors that can occur while loading or validating generator configuration.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The configuration declares no frame prototypes.
    #[error("no frame prototypes configured")]
    NoFrames,

    /// A prototype weight is negative or not finite.
    #[error("invalid weight {weight} for {kind} prototype {index}")]
    InvalidWeight {
        /// `"frame"` or `"layer"`.
        kind: &'static str,
        /// Prototype index within its array (layer indices are per order).
        index: usize,
        /// The offending weight.
        weight: f32,
    },

    /// The generator bounds rectangle has inverted corners.
    #[error("generator bounds are inverted: right_top must be >= left_bottom")]
    InvertedBounds,

    /// A socket lists a plug key that no frame prototype exposes as a socket
    /// key on the opposing side. Generating from such a socket would have no
    /// bucket to draw candidates from.
    #[error("plug key {plug} on a {direction:?} socket of frame prototype {frame} has no matching socket on the {opposite:?} side of any prototype")]
    UnknownPlugKey {
        /// Frame prototype owning the socket.
        frame: usize,
        /// Side the socket sits on.
        direction: crate::socket::Direction,
        /// Side that was searched for a matching socket.
        opposite: crate::socket::Direction,
        /// The dangling plug key.
        plug: i32,
    },

    /// A layer names a frame key that no frame prototype carries.
    #[error("layer prototype {layer} at order {order} targets frame key {frame_key}, which no frame prototype has")]
    UnknownFrameKey {
        /// Layer order index.
        order: usize,
        /// Layer prototype index within that order.
        layer: usize,
        /// The unmatched frame key.
        frame_key: i32,
    },

    /// Configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed as TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for generator construction and config loading.
pub type GeneratorResult<T> = Result<T, GeneratorError>;
