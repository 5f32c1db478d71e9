//! Move generation.
//!
//! Pseudo-legal generation walks each piece's movement geometry over the
//! board; the legality filter then simulates every candidate on a scratch
//! board and discards the ones that leave the mover's own king attacked.
//! Pseudo-legal generation alone is unsafe: it permits moving into check
//! and failing to resolve an existing check.

use chess_core::{Color, Move, Piece, PieceKind, Square};

use crate::check::is_in_check;
use crate::{Board, GameError};

/// Orthogonal ray directions as (file, rank) deltas.
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal ray directions.
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// All eight ray directions, for queens and the king's single steps.
const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The knight's eight L-shaped jumps.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Returns every destination reachable by the piece on `from` under its
/// movement geometry, ignoring whether the mover's own king would be left
/// in check.
///
/// A piece with nowhere to go yields an empty list; only querying an
/// unoccupied square is an error.
pub fn pseudo_legal_moves(board: &Board, from: Square) -> Result<Vec<Move>, GameError> {
    let piece = board
        .piece_at(from)
        .ok_or(GameError::EmptySquare(from))?;
    Ok(piece_moves(board, from, piece))
}

/// Returns the moves of `from` that do not leave the mover's own king in
/// check: each pseudo-legal candidate is applied to a scratch board and
/// kept only if the king is safe afterwards.
pub fn legal_moves_from(board: &Board, from: Square) -> Result<Vec<Move>, GameError> {
    let piece = board
        .piece_at(from)
        .ok_or(GameError::EmptySquare(from))?;
    let mut moves = piece_moves(board, from, piece);
    moves.retain(|&mv| !is_in_check(&apply_move(board, mv), piece.color));
    Ok(moves)
}

/// Geometry dispatch. Total over any (square, piece) pair, so the attack
/// scan in the check detector can call it without an occupancy check.
pub(crate) fn piece_moves(board: &Board, from: Square, piece: Piece) -> Vec<Move> {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.color),
        PieceKind::Knight => step_moves(board, from, piece.color, &KNIGHT_JUMPS),
        PieceKind::Bishop => ray_moves(board, from, piece.color, &BISHOP_DIRS),
        PieceKind::Rook => ray_moves(board, from, piece.color, &ROOK_DIRS),
        PieceKind::Queen => ray_moves(board, from, piece.color, &QUEEN_DIRS),
        PieceKind::King => step_moves(board, from, piece.color, &QUEEN_DIRS),
    }
}

/// Applies a move to a copy of the board: relocates the mover, removes any
/// captured occupant, and substitutes the promotion kind when one is set.
pub(crate) fn apply_move(board: &Board, mv: Move) -> Board {
    let mut next = board.clone();
    let mut piece = next
        .remove(mv.from)
        .expect("applied move must start on an occupied square");
    next.remove(mv.to);
    if let Some(kind) = mv.promotion {
        piece.kind = kind;
    }
    next.place(mv.to, piece);
    next
}

/// Ray-casts from `from` along each direction: a ray stops at (and
/// includes, as a capture) the first enemy square, and stops before any
/// same-color square.
fn ray_moves(board: &Board, from: Square, color: Color, dirs: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(df, dr) in dirs {
        let mut sq = from;
        while let Some(next) = sq.offset(df, dr) {
            match board.piece_at(next) {
                None => {
                    moves.push(Move::quiet(from, next));
                    sq = next;
                }
                Some(occupant) => {
                    if occupant.color != color {
                        moves.push(Move::capture(from, next));
                    }
                    break;
                }
            }
        }
    }
    moves
}

/// Single-step targets for knights and kings: on-board and not blocked by
/// a same-color piece.
fn step_moves(board: &Board, from: Square, color: Color, steps: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(df, dr) in steps {
        if let Some(to) = from.offset(df, dr) {
            match board.piece_at(to) {
                None => moves.push(Move::quiet(from, to)),
                Some(occupant) if occupant.color != color => {
                    moves.push(Move::capture(from, to));
                }
                Some(_) => {}
            }
        }
    }
    moves
}

/// Pawn moves: single advance onto an empty square, double advance from
/// the starting rank when both squares ahead are empty, and diagonal
/// captures only onto occupied enemy squares.
fn pawn_moves(board: &Board, from: Square, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(0, dir) {
        if !board.is_occupied(one) {
            moves.push(Move::quiet(from, one));
            if from.rank() == color.pawn_start_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if !board.is_occupied(two) {
                        moves.push(Move::quiet(from, two));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(diag) = from.offset(df, dir) {
            if board.is_occupied_by(diag, color.opposite()) {
                moves.push(Move::capture(from, diag));
            }
        }
    }

    moves
}
