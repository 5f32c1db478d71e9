//! Move representation.

use crate::{PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chess move from one square to another.
///
/// Moves are transient values: the move generator produces them, the game
/// state machine consumes them, and nothing retains them afterwards.
/// Promotion moves are generated with `promotion` unset; the game resolves
/// the concrete kind before the move finalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// True if the destination held an enemy piece when generated.
    pub capture: bool,
    /// The kind a pawn becomes on reaching the far rank, once chosen.
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a quiet (non-capturing) move.
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            capture: false,
            promotion: None,
        }
    }

    /// Creates a capturing move.
    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            capture: true,
            promotion: None,
        }
    }

    /// Returns a copy of this move with the promotion kind filled in.
    #[inline]
    pub const fn promoting_to(self, kind: PieceKind) -> Self {
        Move {
            from: self.from,
            to: self.to,
            capture: self.capture,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.capture {
            write!(f, "{}x{}", self.from, self.to)
        } else {
            write!(f, "{}-{}", self.from, self.to)
        }
    }
}
