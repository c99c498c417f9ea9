//! # Compatibility Index
//!
//! Precomputed lookup tables answering two questions:
//!
//! 1. Which `(frame prototype, socket)` pairs expose a given socket key on a
//!    given side?
//! 2. Which layer prototypes of a given order attach to a given frame key?
//!
//! Built once from the configuration and read-only thereafter. Bucket entry
//! order is prototype-array order, then socket-array order, which fixes the
//! tie-break order of weighted sampling and makes generation reproducible.

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::socket::Direction;
use std::collections::{HashMap, HashSet};

/// One candidate socket: a frame prototype exposing a socket on some side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocketInFrame {
    /// Frame prototype index.
    pub frame: usize,
    /// Side of the frame the socket sits on.
    pub direction: Direction,
    /// Socket index within that side.
    pub socket: usize,
}

/// The precomputed compatibility tables.
#[derive(Debug)]
pub struct CompatibilityIndex {
    /// Per direction: socket key → candidate sockets exposing that key.
    socket_buckets: [HashMap<i32, Vec<SocketInFrame>>; Direction::COUNT],
    /// Per layer order: frame key → eligible layer prototype indices.
    layer_buckets: Vec<HashMap<i32, Vec<usize>>>,
}

impl CompatibilityIndex {
    /// Builds the index and validates cross-prototype consistency.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::UnknownPlugKey`] if any socket lists a plug
    /// key with no matching socket on the opposing side of any prototype,
    /// and [`GeneratorError::UnknownFrameKey`] if a layer targets a frame
    /// key no frame prototype carries.
    pub fn build(config: &GeneratorConfig) -> GeneratorResult<Self> {
        let mut socket_buckets: [HashMap<i32, Vec<SocketInFrame>>; Direction::COUNT] =
            std::array::from_fn(|_| HashMap::new());

        for (frame, slot) in config.frames.iter().enumerate() {
            for direction in Direction::ALL {
                let sockets = &slot.prototype.sockets[direction.index()];
                for (socket, proto) in sockets.iter().enumerate() {
                    socket_buckets[direction.index()]
                        .entry(proto.socket_key)
                        .or_default()
                        .push(SocketInFrame {
                            frame,
                            direction,
                            socket,
                        });
                }
            }
        }

        let mut layer_buckets = Vec::with_capacity(config.layer_orders.len());
        for order in &config.layer_orders {
            let mut bucket: HashMap<i32, Vec<usize>> = HashMap::new();
            for (layer, slot) in order.layers.iter().enumerate() {
                bucket.entry(slot.prototype.frame_key).or_default().push(layer);
            }
            layer_buckets.push(bucket);
        }

        let index = Self {
            socket_buckets,
            layer_buckets,
        };
        index.validate(config)?;
        Ok(index)
    }

    /// Candidate sockets exposing `socket_key` on the `direction` side,
    /// in tie-break order. Empty if no prototype exposes that key there.
    #[inline]
    #[must_use]
    pub fn candidates(&self, direction: Direction, socket_key: i32) -> &[SocketInFrame] {
        self.socket_buckets[direction.index()]
            .get(&socket_key)
            .map_or(&[], Vec::as_slice)
    }

    /// Layer prototype indices of `order` that attach to `frame_key`, in
    /// tie-break order. Empty means the order is skipped for that frame.
    #[inline]
    #[must_use]
    pub fn layer_candidates(&self, order: usize, frame_key: i32) -> &[usize] {
        self.layer_buckets[order]
            .get(&frame_key)
            .map_or(&[], Vec::as_slice)
    }

    /// Fail-fast configuration checks. The original design crashed on the
    /// first lookup of a dangling key mid-generation; surfacing the same
    /// inconsistencies at build time keeps generation calls infallible.
    fn validate(&self, config: &GeneratorConfig) -> GeneratorResult<()> {
        for (frame, slot) in config.frames.iter().enumerate() {
            for direction in Direction::ALL {
                let opposite = direction.opposite();
                for socket in &slot.prototype.sockets[direction.index()] {
                    for &plug in &socket.plugs {
                        if self.candidates(opposite, plug).is_empty() {
                            return Err(GeneratorError::UnknownPlugKey {
                                frame,
                                direction,
                                opposite,
                                plug,
                            });
                        }
                    }
                }
            }
        }

        let frame_keys: HashSet<i32> = config
            .frames
            .iter()
            .map(|slot| slot.prototype.frame_key)
            .collect();
        for (order, layer_order) in config.layer_orders.iter().enumerate() {
            for (layer, slot) in layer_order.layers.iter().enumerate() {
                if !frame_keys.contains(&slot.prototype.frame_key) {
                    return Err(GeneratorError::UnknownFrameKey {
                        order,
                        layer,
                        frame_key: slot.prototype.frame_key,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FrameSlot, LayerOrder, LayerSlot};
    use crate::frame::FramePrototype;
    use crate::layer::LayerPrototype;
    use crate::math::Vec2;
    use crate::socket::SocketPrototype;

    fn socket(key: i32, plugs: &[i32], x: f32) -> SocketPrototype {
        SocketPrototype {
            socket_key: key,
            plugs: plugs.to_vec(),
            local_position: Vec2::new(x, 0.0),
        }
    }

    fn frame_slot(frame_key: i32, left: Vec<SocketPrototype>, right: Vec<SocketPrototype>) -> FrameSlot {
        FrameSlot {
            prototype: FramePrototype {
                frame_key,
                left_bottom: Vec2::new(-1.0, -1.0),
                right_top: Vec2::new(1.0, 1.0),
                sockets: [left, right, vec![], vec![]],
            },
            weight: 1.0,
            count: -1,
        }
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig {
            bounds: None,
            frames: vec![
                frame_slot(1, vec![socket(10, &[10], -1.0)], vec![socket(10, &[10], 1.0)]),
                frame_slot(2, vec![socket(10, &[10], -1.0)], vec![socket(10, &[10], 1.0)]),
            ],
            layer_orders: vec![LayerOrder {
                layers: vec![LayerSlot {
                    prototype: LayerPrototype {
                        frame_key: 1,
                        left_bottom: Vec2::ZERO,
                    },
                    weight: 1.0,
                    count: -1,
                }],
            }],
        }
    }

    #[test]
    fn test_bucket_order_follows_prototype_order() {
        let index = CompatibilityIndex::build(&config()).unwrap();
        let bucket = index.candidates(Direction::Left, 10);

        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket[0].frame, 0);
        assert_eq!(bucket[1].frame, 1);
        assert_eq!(bucket[0].direction, Direction::Left);
    }

    #[test]
    fn test_missing_key_yields_empty_bucket() {
        let index = CompatibilityIndex::build(&config()).unwrap();

        assert!(index.candidates(Direction::Top, 10).is_empty());
        assert!(index.candidates(Direction::Left, 99).is_empty());
    }

    #[test]
    fn test_layer_bucket_keyed_by_frame_key() {
        let index = CompatibilityIndex::build(&config()).unwrap();

        assert_eq!(index.layer_candidates(0, 1), &[0]);
        assert!(index.layer_candidates(0, 2).is_empty());
    }

    #[test]
    fn test_dangling_plug_key_rejected() {
        let mut cfg = config();
        cfg.frames[0].prototype.sockets[1][0].plugs.push(42);

        assert!(matches!(
            CompatibilityIndex::build(&cfg),
            Err(GeneratorError::UnknownPlugKey { plug: 42, .. })
        ));
    }

    #[test]
    fn test_layer_with_unknown_frame_key_rejected() {
        let mut cfg = config();
        cfg.layer_orders[0].layers[0].prototype.frame_key = 9;

        assert!(matches!(
            CompatibilityIndex::build(&cfg),
            Err(GeneratorError::UnknownFrameKey { frame_key: 9, .. })
        ));
    }
}
