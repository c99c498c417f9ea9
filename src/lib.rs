//! # levelgen2d
//!
//! Constraint-driven procedural 2D level generation.
//!
//! Levels grow frame by frame: each placed frame exposes typed connection
//! points (sockets), and expanding a socket selects a compatible new frame
//! by weighted random sampling, places it without overlapping anything
//! already placed, then stochastically decorates it with layers.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same seed + same config + same calls = same level
//! 2. **Constraint-driven**: key matching, supply limits, pluggable
//!    conditions, overlap and bounds tests all gate every candidate
//! 3. **Driver-agnostic**: the engine expands exactly one socket per call;
//!    frontier policy (breadth-first, depth-first, lazy) belongs to the
//!    caller
//! 4. **Pure logic**: no rendering, no engine integration, no threads
//!
//! ## Core Components
//!
//! - `LevelGenerator`: the stateful generation engine
//! - `GeneratorConfig`: prototypes, weights, supply counts, bounds (TOML)
//! - `CompatibilityIndex`: precomputed socket/layer matching tables
//! - `LevelCondition`: pluggable "can this be generated now?" predicate
//!
//! ## Example
//!
//! ```rust,ignore
//! use levelgen2d::{Direction, GenSeed, GeneratorConfig, LevelGenerator, SocketId};
//!
//! let config = GeneratorConfig::load("data/level.toml")?;
//! let mut generator = LevelGenerator::new(config, GenSeed::new(12345))?;
//!
//! // Seed a hand-placed start room, then expand its right socket.
//! let start = generator.add_other_frame(0, levelgen2d::Vec2::ZERO);
//! let socket = SocketId::new(start, Direction::Right, 0);
//! let position = generator.socket_world_position(socket);
//! if let Some(frame) = generator.generate_level(Direction::Right, socket, position) {
//!     // Discover the new frame's sockets and keep growing.
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod condition;
pub mod config;
pub mod error;
pub mod frame;
pub mod generator;
pub mod index;
pub mod layer;
pub mod math;
pub mod socket;

pub use condition::LevelCondition;
pub use config::{FrameSlot, GeneratorConfig, LayerOrder, LayerSlot};
pub use error::{GeneratorError, GeneratorResult};
pub use frame::{FrameId, FrameInstance, FramePrototype};
pub use generator::{GenSeed, LevelGenerator};
pub use index::{CompatibilityIndex, SocketInFrame};
pub use layer::{LayerInstance, LayerPrototype};
pub use math::{Rect, Vec2, OVERLAP_EPSILON};
pub use socket::{Direction, SocketId, SocketPrototype, SocketState};
