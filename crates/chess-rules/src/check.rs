//! Check detection.
//!
//! The detector treats the move generator as an attack map: a square is
//! attacked by a color iff some piece of that color has it among its
//! pseudo-legal destinations.

use chess_core::{Color, Piece, Square};

use crate::movegen::piece_moves;
use crate::Board;

/// Returns every piece of `by` whose pseudo-legal moves reach `target`,
/// with the square it attacks from.
///
/// Collects all attackers rather than stopping at the first so callers can
/// highlight each piece delivering check.
pub fn attackers_of(board: &Board, target: Square, by: Color) -> Vec<(Square, Piece)> {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == by)
        .filter(|&(from, piece)| {
            piece_moves(board, from, piece)
                .iter()
                .any(|mv| mv.to == target)
        })
        .collect()
}

/// Returns true if `color`'s king is attacked by any opposing piece.
///
/// # Panics
///
/// Panics if `color` has no king on the board (a corrupted model).
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king = board.king_square(color);
    board
        .pieces()
        .filter(|(_, piece)| piece.color == color.opposite())
        .any(|(from, piece)| {
            piece_moves(board, from, piece)
                .iter()
                .any(|mv| mv.to == king)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::PieceKind;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn starting_position_is_quiet() {
        let board = Board::standard();
        assert!(!is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
        assert!(attackers_of(&board, sq("e1"), Color::Black).is_empty());
    }

    #[test]
    fn rook_on_open_file_gives_check() {
        let mut board = Board::empty();
        board.place(sq("e1"), Piece::new(PieceKind::King, Color::White));
        board.place(sq("e8"), Piece::new(PieceKind::Rook, Color::Black));
        board.place(sq("a8"), Piece::new(PieceKind::King, Color::Black));

        assert!(is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));

        let attackers = attackers_of(&board, sq("e1"), Color::Black);
        assert_eq!(attackers.len(), 1);
        assert_eq!(attackers[0].0, sq("e8"));
        assert_eq!(attackers[0].1.kind, PieceKind::Rook);
    }

    #[test]
    fn blocked_rook_gives_no_check() {
        let mut board = Board::empty();
        board.place(sq("e1"), Piece::new(PieceKind::King, Color::White));
        board.place(sq("e4"), Piece::new(PieceKind::Pawn, Color::Black));
        board.place(sq("e8"), Piece::new(PieceKind::Rook, Color::Black));
        board.place(sq("a8"), Piece::new(PieceKind::King, Color::Black));

        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn pawn_checks_diagonally_only() {
        let mut board = Board::empty();
        board.place(sq("e4"), Piece::new(PieceKind::King, Color::White));
        board.place(sq("d5"), Piece::new(PieceKind::Pawn, Color::Black));
        board.place(sq("h8"), Piece::new(PieceKind::King, Color::Black));

        assert!(is_in_check(&board, Color::White));

        // A pawn directly ahead attacks nothing on its file.
        board.remove(sq("d5"));
        board.place(sq("e5"), Piece::new(PieceKind::Pawn, Color::Black));
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn double_check_reports_both_attackers() {
        let mut board = Board::empty();
        board.place(sq("e1"), Piece::new(PieceKind::King, Color::White));
        board.place(sq("e8"), Piece::new(PieceKind::Rook, Color::Black));
        board.place(sq("d3"), Piece::new(PieceKind::Knight, Color::Black));
        board.place(sq("a8"), Piece::new(PieceKind::King, Color::Black));

        let attackers = attackers_of(&board, sq("e1"), Color::Black);
        assert_eq!(attackers.len(), 2);
    }

    #[test]
    fn attackers_nonempty_iff_in_check() {
        // The attack-map symmetry the status report relies on.
        let mut board = Board::empty();
        board.place(sq("g1"), Piece::new(PieceKind::King, Color::White));
        board.place(sq("b6"), Piece::new(PieceKind::Bishop, Color::Black));
        board.place(sq("a8"), Piece::new(PieceKind::King, Color::Black));

        for color in [Color::White, Color::Black] {
            let king = board.king_square(color);
            let attackers = attackers_of(&board, king, color.opposite());
            assert_eq!(is_in_check(&board, color), !attackers.is_empty());
        }
    }
}
