//! # Frames
//!
//! Rectangular tile prototypes and their placed instances.
//!
//! Prototypes are configured offline and shared read-only; instances are
//! created by the engine during generation, own their mutable socket state,
//! and live in an append-only arena addressed by [`FrameId`]. Instances
//! persist for the lifetime of the generated level.

use crate::math::{Rect, Vec2};
use crate::socket::{Direction, SocketPrototype, SocketState};
use serde::{Deserialize, Serialize};

/// Stable handle to a placed frame in the engine's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub(crate) usize);

impl FrameId {
    /// Position of the frame in placement order.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// An immutable frame definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FramePrototype {
    /// Identifies which layers may attach to instances of this frame.
    pub frame_key: i32,
    /// Bottom-left corner of the local bounding rectangle.
    pub left_bottom: Vec2,
    /// Top-right corner of the local bounding rectangle.
    pub right_top: Vec2,
    /// Sockets per side, indexed by [`Direction::index`].
    #[serde(default)]
    pub sockets: [Vec<SocketPrototype>; Direction::COUNT],
}

impl FramePrototype {
    /// The local-space bounding rectangle.
    #[inline]
    #[must_use]
    pub const fn local_rect(&self) -> Rect {
        Rect::new(self.left_bottom, self.right_top)
    }

    /// Number of sockets on the given side.
    #[inline]
    #[must_use]
    pub fn socket_count(&self, direction: Direction) -> usize {
        self.sockets[direction.index()].len()
    }

    /// The socket at `index` on the given side.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for that side.
    #[inline]
    #[must_use]
    pub fn socket(&self, direction: Direction, index: usize) -> &SocketPrototype {
        &self.sockets[direction.index()][index]
    }
}

/// A placed frame: a prototype reference plus world position and the
/// per-instance socket state mirror.
#[derive(Clone, Debug)]
pub struct FrameInstance {
    prototype: usize,
    position: Vec2,
    socket_states: [Vec<SocketState>; Direction::COUNT],
}

impl FrameInstance {
    /// Instantiates a prototype at a world position with fresh socket state.
    #[must_use]
    pub fn new(prototype_index: usize, prototype: &FramePrototype, position: Vec2) -> Self {
        let socket_states = std::array::from_fn(|direction| {
            vec![SocketState::new(); prototype.sockets[direction].len()]
        });

        Self {
            prototype: prototype_index,
            position,
            socket_states,
        }
    }

    /// Index of the prototype this frame was instantiated from.
    #[inline]
    #[must_use]
    pub const fn prototype(&self) -> usize {
        self.prototype
    }

    /// World position of the frame origin.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// World-space bounding rectangle.
    #[inline]
    #[must_use]
    pub fn world_rect(&self, prototype: &FramePrototype) -> Rect {
        prototype.local_rect().translated(self.position)
    }

    /// Socket state at `index` on the given side.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for that side.
    #[inline]
    #[must_use]
    pub fn socket_state(&self, direction: Direction, index: usize) -> SocketState {
        self.socket_states[direction.index()][index]
    }

    /// Mutable socket state at `index` on the given side.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for that side.
    #[inline]
    pub fn socket_state_mut(&mut self, direction: Direction, index: usize) -> &mut SocketState {
        &mut self.socket_states[direction.index()][index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prototype() -> FramePrototype {
        FramePrototype {
            frame_key: 1,
            left_bottom: Vec2::new(-2.0, -1.0),
            right_top: Vec2::new(2.0, 1.0),
            sockets: [
                vec![SocketPrototype {
                    socket_key: 10,
                    plugs: vec![10],
                    local_position: Vec2::new(-2.0, 0.0),
                }],
                vec![
                    SocketPrototype {
                        socket_key: 10,
                        plugs: vec![10],
                        local_position: Vec2::new(2.0, 0.0),
                    },
                    SocketPrototype {
                        socket_key: 11,
                        plugs: vec![11],
                        local_position: Vec2::new(2.0, 0.5),
                    },
                ],
                vec![],
                vec![],
            ],
        }
    }

    #[test]
    fn test_socket_access() {
        let proto = prototype();

        assert_eq!(proto.socket_count(Direction::Left), 1);
        assert_eq!(proto.socket_count(Direction::Right), 2);
        assert_eq!(proto.socket_count(Direction::Top), 0);
        assert_eq!(proto.socket(Direction::Right, 1).socket_key, 11);
    }

    #[test]
    fn test_instance_world_rect() {
        let proto = prototype();
        let instance = FrameInstance::new(0, &proto, Vec2::new(10.0, 5.0));
        let rect = instance.world_rect(&proto);

        assert_eq!(rect.left_bottom, Vec2::new(8.0, 4.0));
        assert_eq!(rect.right_top, Vec2::new(12.0, 6.0));
    }

    #[test]
    fn test_instance_socket_state_is_independent() {
        let proto = prototype();
        let mut a = FrameInstance::new(0, &proto, Vec2::ZERO);
        let b = FrameInstance::new(0, &proto, Vec2::ZERO);

        a.socket_state_mut(Direction::Right, 0).can_try_connect = false;

        assert!(!a.socket_state(Direction::Right, 0).can_try_connect);
        assert!(b.socket_state(Direction::Right, 0).can_try_connect);
    }
}
