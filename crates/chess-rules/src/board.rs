//! Board storage.
//!
//! The [`Board`] is a pure storage abstraction: an 8x8 grid of optionally
//! occupied squares. It knows nothing about chess legality; the move
//! generator and game state machine own all of that.

use chess_core::{Color, File, Piece, PieceKind, Rank, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::GameError;

/// Validates raw grid coordinates (row 0 = top of the rendered board) into
/// a typed [`Square`].
///
/// This is the only place an out-of-range coordinate can appear: once a
/// `Square` exists it is in bounds by construction.
pub fn square_from_grid(row: u8, col: u8) -> Result<Square, GameError> {
    Square::from_row_col(row, col).ok_or(GameError::OutOfBounds { row, col })
}

/// An 8x8 chess board mapping each square to an optional piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Grid indexed by rank then file, both 0-7.
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates a board with both armies on their canonical starting
    /// squares.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (file, &kind) in File::ALL.iter().zip(BACK_RANK.iter()) {
            board.place(
                Square::new(*file, Rank::R1),
                Piece::new(kind, Color::White),
            );
            board.place(
                Square::new(*file, Rank::R8),
                Piece::new(kind, Color::Black),
            );
        }
        for file in File::ALL {
            board.place(
                Square::new(file, Rank::R2),
                Piece::new(PieceKind::Pawn, Color::White),
            );
            board.place(
                Square::new(file, Rank::R7),
                Piece::new(PieceKind::Pawn, Color::Black),
            );
        }
        board
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank().index() as usize][square.file().index() as usize]
    }

    /// Puts a piece on the given square, replacing any occupant.
    #[inline]
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.squares[square.rank().index() as usize][square.file().index() as usize] = Some(piece);
    }

    /// Clears the given square, returning the piece that was on it.
    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.rank().index() as usize][square.file().index() as usize].take()
    }

    /// Returns true if the given square holds a piece.
    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Returns true if the given square holds a piece of the given color.
    #[inline]
    pub fn is_occupied_by(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.color == color)
    }

    /// Iterates over all occupied squares with their pieces, a1 through h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Returns the square of the given color's king.
    ///
    /// # Panics
    ///
    /// Panics if no such king exists. Exactly one king per color is a model
    /// invariant; a board without one is corrupted and play must not
    /// continue on it.
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(sq, _)| sq)
            .unwrap_or_else(|| panic!("no {} king on the board", color))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            write!(f, "{} ", rank)?;
            for file in File::ALL {
                match self.piece_at(Square::new(file, *rank)) {
                    Some(piece) => write!(f, " {}", piece.to_char())?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
