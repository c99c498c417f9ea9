//! # Generation Engine
//!
//! The stateful orchestrator behind level growth. Given a socket on an
//! already-placed frame, [`LevelGenerator::generate_level`] selects a
//! compatible frame prototype by weighted sampling, places it without
//! overlapping any earlier frame, then runs every configured layer pass
//! over the new frame.
//!
//! ## Determinism Guarantee
//!
//! Sampling draws from a ChaCha8 stream seeded by [`GenSeed`]; candidate
//! order is fixed by the compatibility index. Same seed, same config, same
//! call sequence = same level, always.
//!
//! ## Depleting-Pool Weighting
//!
//! A finite-supply prototype contributes `weight * remaining / initial`,
//! so its share shrinks linearly as its pool drains and hits exactly zero
//! when the pool is empty. Unlimited prototypes (negative count) always
//! contribute their flat weight; their counter keeps decrementing toward
//! more-negative with no observable effect, since only equality with zero
//! gates exclusion.

use crate::condition::LevelCondition;
use crate::config::GeneratorConfig;
use crate::error::GeneratorResult;
use crate::frame::{FrameId, FrameInstance, FramePrototype};
use crate::index::{CompatibilityIndex, SocketInFrame};
use crate::layer::LayerInstance;
use crate::math::{Rect, Vec2};
use crate::socket::{Direction, SocketId, SocketState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic generation.
///
/// All sampling derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenSeed(u64);

impl GenSeed {
    /// Creates a new seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose (e.g. one per level slice),
    /// so a driver can split independent streams off one master seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        // FNV-1a hash mixing
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

impl Default for GenSeed {
    fn default() -> Self {
        Self(0xC0FF_EE00_F00D_5EED)
    }
}

/// An eligible candidate gathered for one sampling round, with its current
/// weight contribution.
#[derive(Clone, Copy)]
struct Weighted<T> {
    item: T,
    weight: f32,
}

/// The level generation engine.
///
/// Explicitly constructed and explicitly owned; drive it from a single
/// thread. All state mutation happens inside `generate_level` and
/// `add_other_frame`.
pub struct LevelGenerator {
    config: GeneratorConfig,
    index: CompatibilityIndex,
    frame_conditions: Vec<Option<Box<dyn LevelCondition>>>,
    layer_conditions: Vec<Vec<Option<Box<dyn LevelCondition>>>>,
    remaining_frames: Vec<i32>,
    remaining_layers: Vec<Vec<i32>>,
    frames: Vec<FrameInstance>,
    layers: Vec<LayerInstance>,
    rng: ChaCha8Rng,
}

impl LevelGenerator {
    /// Validates `config`, builds the compatibility index, and initializes
    /// the supply counters from the configured counts.
    ///
    /// # Errors
    ///
    /// Returns a [`GeneratorError`](crate::error::GeneratorError) describing
    /// the first configuration inconsistency found.
    pub fn new(config: GeneratorConfig, seed: GenSeed) -> GeneratorResult<Self> {
        config.validate()?;
        let index = CompatibilityIndex::build(&config)?;

        let remaining_frames = config.frames.iter().map(|slot| slot.count).collect();
        let remaining_layers = config
            .layer_orders
            .iter()
            .map(|order| order.layers.iter().map(|slot| slot.count).collect())
            .collect();
        let frame_conditions = config.frames.iter().map(|_| None).collect();
        let layer_conditions = config
            .layer_orders
            .iter()
            .map(|order| order.layers.iter().map(|_| None).collect())
            .collect();

        Ok(Self {
            config,
            index,
            frame_conditions,
            layer_conditions,
            remaining_frames,
            remaining_layers,
            frames: Vec::new(),
            layers: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed.value()),
        })
    }

    /// Attaches a generation condition to a frame prototype. Prototypes
    /// without a condition are always eligible.
    ///
    /// # Panics
    ///
    /// Panics if `prototype` is out of range.
    pub fn set_frame_condition(
        &mut self,
        prototype: usize,
        condition: impl LevelCondition + 'static,
    ) {
        self.frame_conditions[prototype] = Some(Box::new(condition));
    }

    /// Attaches a generation condition to a layer prototype of one order.
    ///
    /// # Panics
    ///
    /// Panics if `order` or `layer` is out of range.
    pub fn set_layer_condition(
        &mut self,
        order: usize,
        layer: usize,
        condition: impl LevelCondition + 'static,
    ) {
        self.layer_conditions[order][layer] = Some(Box::new(condition));
    }

    /// Registers a pre-existing frame (e.g. a hand-placed start room) so
    /// later generation respects its footprint.
    ///
    /// Touches no supply counts or conditions. Must be called before any
    /// generation that should avoid this frame. The returned handle lets
    /// the driver expand the seeded frame's own sockets.
    ///
    /// # Panics
    ///
    /// Panics if `prototype` is out of range.
    pub fn add_other_frame(&mut self, prototype: usize, position: Vec2) -> FrameId {
        let instance = FrameInstance::new(prototype, &self.config.frames[prototype].prototype, position);
        let id = FrameId(self.frames.len());
        self.frames.push(instance);
        id
    }

    /// Expands one socket: selects and places a compatible frame, then runs
    /// every layer pass over it.
    ///
    /// `direction` is the side of the existing frame the socket sits on;
    /// `socket_position` is the socket's world position. Returns the placed
    /// frame, or `None` when the socket was already consumed or no candidate
    /// is eligible. A dead-end is a normal outcome, not an error: the socket
    /// is sealed (`blocked = true`) and never retried by the engine.
    ///
    /// Each socket is expanded at most once; the socket is consumed the
    /// instant the attempt starts, success or not.
    ///
    /// # Panics
    ///
    /// Panics if `socket` does not name a placed frame's socket.
    pub fn generate_level(
        &mut self,
        direction: Direction,
        socket: SocketId,
        socket_position: Vec2,
    ) -> Option<FrameId> {
        {
            let state = self.frames[socket.frame.0].socket_state_mut(socket.direction, socket.index);
            if !state.can_try_connect {
                return None;
            }
            state.can_try_connect = false;
        }

        let opposite = direction.opposite();
        let (candidates, weight_sum) = self.consider_frames(opposite, socket, socket_position);
        let Some(winner) = Self::select(&mut self.rng, &candidates, weight_sum) else {
            tracing::debug!(
                "dead end: no eligible frame at {:?} socket (key lookup on {:?} side)",
                direction,
                opposite
            );
            self.frames[socket.frame.0]
                .socket_state_mut(socket.direction, socket.index)
                .blocked = true;
            return None;
        };
        self.frames[socket.frame.0]
            .socket_state_mut(socket.direction, socket.index)
            .blocked = false;

        let id = self.place_frame(winner, socket_position);
        for order in 0..self.config.layer_orders.len() {
            self.generate_layer(order, id);
        }

        Some(id)
    }

    /// Gathers eligible frame candidates for every plug key of the input
    /// socket, in plug order then bucket order, together with their current
    /// weight contributions.
    fn consider_frames(
        &self,
        opposite: Direction,
        socket: SocketId,
        socket_position: Vec2,
    ) -> (Vec<Weighted<SocketInFrame>>, f32) {
        let instance = &self.frames[socket.frame.0];
        let input = self.config.frames[instance.prototype()]
            .prototype
            .socket(socket.direction, socket.index);

        let mut candidates = Vec::new();
        let mut weight_sum = 0.0f32;

        for &plug in &input.plugs {
            for &entry in self.index.candidates(opposite, plug) {
                if let Some(condition) = &self.frame_conditions[entry.frame] {
                    if !condition.can_generate() {
                        continue;
                    }
                }
                if self.remaining_frames[entry.frame] == 0 {
                    continue;
                }

                let slot = &self.config.frames[entry.frame];
                let candidate_socket = slot.prototype.socket(entry.direction, entry.socket);
                let placement = slot
                    .prototype
                    .local_rect()
                    .translated(socket_position - candidate_socket.local_position);
                if !self.can_place(&placement) {
                    continue;
                }

                let weight = self.frame_weight(entry.frame);
                weight_sum += weight;
                candidates.push(Weighted {
                    item: entry,
                    weight,
                });
            }
        }

        (candidates, weight_sum)
    }

    /// Current weight contribution of a frame prototype.
    fn frame_weight(&self, prototype: usize) -> f32 {
        let slot = &self.config.frames[prototype];
        let remaining = self.remaining_frames[prototype];
        if remaining > 0 {
            slot.weight * remaining as f32 / slot.count as f32
        } else {
            slot.weight
        }
    }

    /// Weighted sampling by cumulative subtraction: one uniform draw in
    /// `[0, weight_sum)`, then a single pass in gathering order. The first
    /// candidate whose share contains the draw wins, which preserves the
    /// deterministic tie-break order.
    fn select<T: Copy>(
        rng: &mut ChaCha8Rng,
        candidates: &[Weighted<T>],
        weight_sum: f32,
    ) -> Option<T> {
        if candidates.is_empty() || weight_sum <= 0.0 {
            return None;
        }

        let mut choice = rng.gen_range(0.0..weight_sum);
        for candidate in candidates {
            if choice > candidate.weight {
                choice -= candidate.weight;
                continue;
            }
            return Some(candidate.item);
        }

        // Accumulated float error can exhaust the walk; treated as no winner.
        None
    }

    /// Instantiates the winning prototype so its matched socket lands
    /// exactly on the input socket's world position.
    fn place_frame(&mut self, winner: SocketInFrame, socket_position: Vec2) -> FrameId {
        let slot = &self.config.frames[winner.frame];
        let matched = slot.prototype.socket(winner.direction, winner.socket);
        let position = socket_position - matched.local_position;

        let mut instance = FrameInstance::new(winner.frame, &slot.prototype, position);
        // The matched socket is already connected; it must never be expanded.
        instance
            .socket_state_mut(winner.direction, winner.socket)
            .can_try_connect = false;

        let id = FrameId(self.frames.len());
        tracing::debug!(
            "placed frame prototype {} (key {}) at ({}, {})",
            winner.frame,
            slot.prototype.frame_key,
            position.x,
            position.y
        );
        self.frames.push(instance);
        self.remaining_frames[winner.frame] -= 1;
        id
    }

    /// Runs one layer pass over a freshly placed frame. Places at most one
    /// layer; an empty candidate set skips the pass silently.
    fn generate_layer(&mut self, order: usize, frame: FrameId) {
        let instance = &self.frames[frame.0];
        let frame_slot = &self.config.frames[instance.prototype()];
        let frame_key = frame_slot.prototype.frame_key;

        let mut candidates = Vec::new();
        let mut weight_sum = 0.0f32;
        for &layer in self.index.layer_candidates(order, frame_key) {
            if let Some(condition) = &self.layer_conditions[order][layer] {
                if !condition.can_generate() {
                    continue;
                }
            }
            let remaining = self.remaining_layers[order][layer];
            if remaining == 0 {
                continue;
            }

            let slot = &self.config.layer_orders[order].layers[layer];
            let weight = if remaining > 0 {
                slot.weight * remaining as f32 / slot.count as f32
            } else {
                slot.weight
            };
            weight_sum += weight;
            candidates.push(Weighted {
                item: layer,
                weight,
            });
        }

        let Some(layer) = Self::select(&mut self.rng, &candidates, weight_sum) else {
            return;
        };

        // Anchor the layer flush to the host frame's bottom-left corner.
        let layer_proto = &self.config.layer_orders[order].layers[layer].prototype;
        let position = instance.position() + frame_slot.prototype.left_bottom - layer_proto.left_bottom;

        tracing::trace!(
            "placed layer {} of order {} on frame {} at ({}, {})",
            layer,
            order,
            frame.0,
            position.x,
            position.y
        );
        self.layers.push(LayerInstance {
            order,
            prototype: layer,
            frame,
            position,
        });
        self.remaining_layers[order][layer] -= 1;
    }

    /// Tests whether a world rectangle is placeable: inside the bounds when
    /// the generator is limited, and overlapping no placed frame.
    fn can_place(&self, placement: &Rect) -> bool {
        if let Some(bounds) = &self.config.bounds {
            if !bounds.contains(placement) {
                return false;
            }
        }

        for instance in &self.frames {
            let occupied = instance.world_rect(&self.config.frames[instance.prototype()].prototype);
            if placement.overlaps(&occupied) {
                return false;
            }
        }

        true
    }

    /// The configuration this engine was built from.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// A placed frame by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a placed frame.
    #[inline]
    #[must_use]
    pub fn frame(&self, id: FrameId) -> &FrameInstance {
        &self.frames[id.0]
    }

    /// All placed frames, in placement order.
    #[inline]
    #[must_use]
    pub fn frames(&self) -> &[FrameInstance] {
        &self.frames
    }

    /// All placed layers, in placement order.
    #[inline]
    #[must_use]
    pub fn layers(&self) -> &[LayerInstance] {
        &self.layers
    }

    /// Number of placed frames, seeded frames included.
    #[inline]
    #[must_use]
    pub fn placed_frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The prototype a placed frame was instantiated from.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a placed frame.
    #[inline]
    #[must_use]
    pub fn frame_prototype(&self, id: FrameId) -> &FramePrototype {
        &self.config.frames[self.frames[id.0].prototype()].prototype
    }

    /// World-space bounding rectangle of a placed frame.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a placed frame.
    #[inline]
    #[must_use]
    pub fn world_rect(&self, id: FrameId) -> Rect {
        self.frames[id.0].world_rect(self.frame_prototype(id))
    }

    /// Current state of a socket on a placed frame.
    ///
    /// # Panics
    ///
    /// Panics if `socket` does not name a placed frame's socket.
    #[inline]
    #[must_use]
    pub fn socket_state(&self, socket: SocketId) -> SocketState {
        self.frames[socket.frame.0].socket_state(socket.direction, socket.index)
    }

    /// World position of a socket on a placed frame; what a driver passes
    /// back into [`generate_level`](Self::generate_level).
    ///
    /// # Panics
    ///
    /// Panics if `socket` does not name a placed frame's socket.
    #[inline]
    #[must_use]
    pub fn socket_world_position(&self, socket: SocketId) -> Vec2 {
        let instance = &self.frames[socket.frame.0];
        let proto = &self.config.frames[instance.prototype()].prototype;
        instance.position() + proto.socket(socket.direction, socket.index).local_position
    }

    /// Remaining supply for a frame prototype (negative = unlimited).
    ///
    /// # Panics
    ///
    /// Panics if `prototype` is out of range.
    #[inline]
    #[must_use]
    pub fn remaining_frame_count(&self, prototype: usize) -> i32 {
        self.remaining_frames[prototype]
    }

    /// Remaining supply for a layer prototype (negative = unlimited).
    ///
    /// # Panics
    ///
    /// Panics if `order` or `layer` is out of range.
    #[inline]
    #[must_use]
    pub fn remaining_layer_count(&self, order: usize, layer: usize) -> i32 {
        self.remaining_layers[order][layer]
    }
}
