//! Chess piece representation.

use crate::Color;
use serde::{Deserialize, Serialize};

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The kinds a pawn may promote to.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Returns the index of this piece kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true if this kind moves along rays (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Returns true if a pawn may promote to this kind.
    #[inline]
    pub const fn is_promotable(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        write!(f, "{}", name)
    }
}

/// A piece on the board: a kind tagged with its owner's color.
///
/// Replaces any stringly-typed piece identification: a piece is always an
/// explicit (kind, color) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// Creates a piece of the given kind and color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Returns the single-letter code for this piece, uppercase for White
    /// and lowercase for Black (used by board diagrams).
    pub const fn to_char(self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_slider() {
        assert!(!PieceKind::Pawn.is_slider());
        assert!(!PieceKind::Knight.is_slider());
        assert!(PieceKind::Bishop.is_slider());
        assert!(PieceKind::Rook.is_slider());
        assert!(PieceKind::Queen.is_slider());
        assert!(!PieceKind::King.is_slider());
    }

    #[test]
    fn is_promotable() {
        assert!(PieceKind::Queen.is_promotable());
        assert!(PieceKind::Rook.is_promotable());
        assert!(PieceKind::Bishop.is_promotable());
        assert!(PieceKind::Knight.is_promotable());
        assert!(!PieceKind::Pawn.is_promotable());
        assert!(!PieceKind::King.is_promotable());
    }

    #[test]
    fn piece_char() {
        assert_eq!(Piece::new(PieceKind::Pawn, Color::White).to_char(), 'P');
        assert_eq!(Piece::new(PieceKind::Pawn, Color::Black).to_char(), 'p');
        assert_eq!(Piece::new(PieceKind::King, Color::White).to_char(), 'K');
        assert_eq!(Piece::new(PieceKind::Knight, Color::Black).to_char(), 'n');
    }

    #[test]
    fn display() {
        let piece = Piece::new(PieceKind::Queen, Color::Black);
        assert_eq!(format!("{}", piece), "Black queen");
    }
}
