//! # Sockets
//!
//! Typed connection points exposed by frame prototypes.
//!
//! A socket carries a key identifying its own connector type and an ordered
//! list of plug keys naming the socket types it may connect *to* on the
//! opposing side. Matching is not required to be symmetric: socket `3` may
//! plug into `7` without `7` plugging back into `3`.

use crate::frame::FrameId;
use crate::math::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four sides of a frame a socket can sit on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Left side (negative X).
    Left = 0,
    /// Right side (positive X).
    Right = 1,
    /// Top side (positive Y).
    Top = 2,
    /// Bottom side (negative Y).
    Bottom = 3,
}

impl Direction {
    /// Number of directions; sizes per-direction lookup arrays.
    pub const COUNT: usize = 4;

    /// All directions in fixed order.
    ///
    /// This order is load-bearing: the compatibility index iterates it
    /// during construction, which fixes candidate order for sampling.
    pub const ALL: [Self; Self::COUNT] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Returns the opposing direction (Left↔Right, Top↔Bottom).
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Index for per-direction array addressing.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// An immutable socket definition on a frame prototype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SocketPrototype {
    /// Connector type of this socket.
    pub socket_key: i32,
    /// Socket keys this socket may connect to, in match-priority order.
    pub plugs: Vec<i32>,
    /// Offset from the owning frame's origin.
    pub local_position: Vec2,
}

/// Mutable per-instance socket state.
///
/// Created alongside each placed frame; the prototype stays untouched.
#[derive(Clone, Copy, Debug)]
pub struct SocketState {
    /// Whether this socket may still be used as input to a generation
    /// attempt. Consumed the instant the attempt starts, success or not.
    pub can_try_connect: bool,
    /// Whether the socket has been sealed as a dead-end. Stands in for the
    /// original blocker object toggle.
    pub blocked: bool,
}

impl SocketState {
    /// Fresh state for a newly placed frame.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            can_try_connect: true,
            blocked: false,
        }
    }
}

impl Default for SocketState {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable handle naming one socket on one placed frame.
///
/// Handles keep the driver decoupled from engine internals; there are no
/// live references between frames and the sockets they expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SocketId {
    /// The placed frame owning the socket.
    pub frame: FrameId,
    /// The side the socket sits on.
    pub direction: Direction,
    /// Position within that side's socket list.
    pub index: usize,
}

impl SocketId {
    /// Creates a socket handle.
    #[inline]
    #[must_use]
    pub const fn new(frame: FrameId, direction: Direction, index: usize) -> Self {
        Self {
            frame,
            direction,
            index,
        }
    }
}
