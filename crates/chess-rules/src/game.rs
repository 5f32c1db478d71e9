//! Game state machine.
//!
//! [`Game`] owns the board, the turn, and the terminal classification. It
//! is the only component that mutates board occupancy, and every rejected
//! operation is a no-op on state. The whole value serializes, so a UI (or
//! a future networked host) can snapshot and restore a game wholesale.

use chess_core::{Color, Move, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::check::{attackers_of, is_in_check};
use crate::{movegen, Board};

/// Errors surfaced at the engine boundary.
///
/// All of these are recoverable for the caller: the game state is
/// unchanged after any of them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates ({row}, {col}) are off the board")]
    OutOfBounds { row: u8, col: u8 },

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("invalid promotion choice")]
    InvalidPromotion,

    #[error("the game is over")]
    GameOver,
}

/// Where the game stands after the latest finalized move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The side to move has legal moves and is not in check.
    InProgress,
    /// The side to move is in check but can escape.
    Check,
    /// The side to move is in check with no legal move.
    Checkmate { winner: Color },
    /// The side to move is not in check but has no legal move.
    Stalemate,
}

impl Status {
    /// Returns true for statuses that end the game.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::Checkmate { .. } | Status::Stalemate)
    }
}

/// Snapshot handed to the UI: whose turn it is, the status, and the
/// squares of every piece currently delivering check (for highlighting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub turn: Color,
    pub status: Status,
    pub checkers: Vec<Square>,
}

/// A pawn that reached the far rank and is waiting for its new kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct PendingPromotion {
    square: Square,
    color: Color,
}

/// A single chess game on one shared board.
///
/// Created at the standard starting layout and mutated in place for the
/// life of one game; [`Game::reset`] returns it to the same layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
    fullmove: u32,
    status: Status,
    pending: Option<PendingPromotion>,
    /// Pieces captured so far, indexed by the captured piece's color.
    captured: [Vec<Piece>; 2],
    /// The side configured to move first; restored by reset.
    opening_side: Color,
}

impl Game {
    /// Creates a game with white to move first.
    pub fn new() -> Self {
        Self::with_opening_side(Color::White)
    }

    /// Creates a game where the given side moves first.
    pub fn with_opening_side(opening_side: Color) -> Self {
        Game {
            board: Board::standard(),
            turn: opening_side,
            fullmove: 1,
            status: Status::InProgress,
            pending: None,
            captured: [Vec::new(), Vec::new()],
            opening_side,
        }
    }

    /// Creates a game from a custom position with the given side to move,
    /// classifying it immediately (it may already be checkmate or
    /// stalemate).
    ///
    /// # Panics
    ///
    /// Panics if either king is missing from `board`.
    pub fn from_board(board: Board, turn: Color) -> Self {
        let mut game = Game {
            board,
            turn,
            fullmove: 1,
            status: Status::InProgress,
            pending: None,
            captured: [Vec::new(), Vec::new()],
            opening_side: turn,
        };
        game.status = game.classify(turn);
        game
    }

    /// Returns the game to the starting layout and the configured opening
    /// side.
    pub fn reset(&mut self) {
        *self = Game::with_opening_side(self.opening_side);
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the current status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns true once the game has reached checkmate or stalemate.
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the current full move number (starts at 1, increments after
    /// Black's move finalizes).
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove
    }

    /// Returns the pieces of the given color captured so far, in capture
    /// order (the UI's capture tray).
    pub fn captures(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    /// Returns the square of the pawn awaiting a promotion choice, if any.
    pub fn awaiting_promotion(&self) -> Option<Square> {
        self.pending.map(|p| p.square)
    }

    /// Returns the legal moves for the piece on `from`.
    ///
    /// Pieces of the side not to move yield an empty list, as does any
    /// query while the game is over or a promotion is pending: those
    /// pieces are simply not available, which is the state-machine form of
    /// the UI graying them out. Only an unoccupied square is an error.
    pub fn legal_moves(&self, from: Square) -> Result<Vec<Move>, GameError> {
        let piece = self
            .board
            .piece_at(from)
            .ok_or(GameError::EmptySquare(from))?;
        if self.status.is_terminal() || self.pending.is_some() || piece.color != self.turn {
            return Ok(Vec::new());
        }
        movegen::legal_moves_from(&self.board, from)
    }

    /// Returns the legal destination squares for the piece on `from`, in
    /// generation order: the highlight set for a selected piece.
    pub fn legal_targets(&self, from: Square) -> Result<Vec<Square>, GameError> {
        Ok(self
            .legal_moves(from)?
            .into_iter()
            .map(|mv| mv.to)
            .collect())
    }

    /// Commits the move from `from` to `to`.
    ///
    /// The move must be in the legal set for `from`; anything else,
    /// including selecting an opponent's piece or moving while a promotion
    /// is pending, is a [`GameError::IllegalMove`] and leaves the state
    /// untouched. A pawn reaching the far rank parks the game in the
    /// awaiting-promotion sub-state: the turn does not advance until
    /// [`Game::choose_promotion`] supplies a kind.
    pub fn select_and_move(&mut self, from: Square, to: Square) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        if self.pending.is_some() {
            return Err(GameError::IllegalMove { from, to });
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(GameError::EmptySquare(from))?;
        if piece.color != self.turn {
            return Err(GameError::IllegalMove { from, to });
        }

        let mv = movegen::legal_moves_from(&self.board, from)?
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(GameError::IllegalMove { from, to })?;

        if let Some(captured) = self.board.piece_at(mv.to) {
            self.captured[captured.color.index()].push(captured);
        }
        self.board = movegen::apply_move(&self.board, mv);

        if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank() {
            self.pending = Some(PendingPromotion {
                square: to,
                color: piece.color,
            });
            return Ok(());
        }

        self.finalize_turn();
        Ok(())
    }

    /// Resolves a pending promotion with the chosen kind and finalizes the
    /// move.
    ///
    /// Valid only while a promotion is pending and for the four promotable
    /// kinds; anything else is [`GameError::InvalidPromotion`].
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        let pending = self.pending.ok_or(GameError::InvalidPromotion)?;
        if !kind.is_promotable() {
            return Err(GameError::InvalidPromotion);
        }

        self.board
            .place(pending.square, Piece::new(kind, pending.color));
        self.pending = None;
        self.finalize_turn();
        Ok(())
    }

    /// Returns the snapshot driving the turn banner and check/checkmate
    /// highlighting.
    pub fn current_status(&self) -> StatusReport {
        let checkers = match self.status {
            Status::Check | Status::Checkmate { .. } => {
                let king = self.board.king_square(self.turn);
                attackers_of(&self.board, king, self.turn.opposite())
                    .into_iter()
                    .map(|(sq, _)| sq)
                    .collect()
            }
            _ => Vec::new(),
        };
        StatusReport {
            turn: self.turn,
            status: self.status,
            checkers,
        }
    }

    /// Hands the turn over and classifies the position for the new side to
    /// move.
    fn finalize_turn(&mut self) {
        if self.turn == Color::Black {
            self.fullmove += 1;
        }
        self.turn = self.turn.opposite();
        self.status = self.classify(self.turn);
    }

    /// Classifies the position for `side`: in check with no legal move is
    /// checkmate, out of check with no legal move is stalemate.
    fn classify(&self, side: Color) -> Status {
        let in_check = is_in_check(&self.board, side);
        let has_moves = self.has_any_legal_move(side);
        match (in_check, has_moves) {
            (true, false) => Status::Checkmate {
                winner: side.opposite(),
            },
            (true, true) => Status::Check,
            (false, false) => Status::Stalemate,
            (false, true) => Status::InProgress,
        }
    }

    /// Returns true if any piece of `side` has at least one legal move.
    fn has_any_legal_move(&self, side: Color) -> bool {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.color == side)
            .any(|(from, _)| {
                movegen::legal_moves_from(&self.board, from)
                    .map(|moves| !moves.is_empty())
                    .unwrap_or(false)
            })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn mv(game: &mut Game, from: &str, to: &str) {
        game.select_and_move(sq(from), sq(to)).unwrap();
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.status(), Status::InProgress);
        assert_eq!(game.fullmove_number(), 1);
        assert!(!game.is_game_over());
        assert!(game.awaiting_promotion().is_none());
    }

    #[test]
    fn opening_side_is_configurable() {
        let game = Game::with_opening_side(Color::Black);
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn turn_alternates_and_fullmove_counts() {
        let mut game = Game::new();
        mv(&mut game, "e2", "e4");
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.fullmove_number(), 1);
        mv(&mut game, "e7", "e5");
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.fullmove_number(), 2);
    }

    #[test]
    fn wrong_color_piece_is_unavailable() {
        let mut game = Game::new();
        // Black piece while white is to move: no targets, and moving it is
        // illegal.
        assert!(game.legal_targets(sq("e7")).unwrap().is_empty());
        assert_eq!(
            game.select_and_move(sq("e7"), sq("e5")),
            Err(GameError::IllegalMove {
                from: sq("e7"),
                to: sq("e5")
            })
        );
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn empty_square_query_errors() {
        let game = Game::new();
        assert_eq!(
            game.legal_targets(sq("e4")),
            Err(GameError::EmptySquare(sq("e4")))
        );
    }

    #[test]
    fn illegal_move_leaves_state_untouched() {
        let mut game = Game::new();
        let before = game.board().clone();
        assert!(game.select_and_move(sq("e2"), sq("e5")).is_err());
        assert_eq!(game.board(), &before);
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn capture_fills_the_tray() {
        let mut game = Game::new();
        mv(&mut game, "e2", "e4");
        mv(&mut game, "d7", "d5");
        mv(&mut game, "e4", "d5");

        let captured = game.captures(Color::Black);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0], Piece::new(PieceKind::Pawn, Color::Black));
        assert!(game.captures(Color::White).is_empty());
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        mv(&mut game, "f2", "f3");
        mv(&mut game, "e7", "e5");
        mv(&mut game, "g2", "g4");
        mv(&mut game, "d8", "h4");

        assert_eq!(
            game.status(),
            Status::Checkmate {
                winner: Color::Black
            }
        );
        assert!(game.is_game_over());

        let report = game.current_status();
        assert_eq!(report.turn, Color::White);
        assert_eq!(report.checkers, vec![sq("h4")]);

        assert_eq!(
            game.select_and_move(sq("a2"), sq("a3")),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn check_is_reported_with_attackers() {
        let mut game = Game::new();
        mv(&mut game, "e2", "e4");
        mv(&mut game, "f7", "f6");
        mv(&mut game, "d1", "h5");

        assert_eq!(game.status(), Status::Check);
        let report = game.current_status();
        assert_eq!(report.turn, Color::Black);
        assert_eq!(report.checkers, vec![sq("h5")]);

        // The checked side must resolve the check.
        assert_eq!(
            game.select_and_move(sq("a7"), sq("a6")),
            Err(GameError::IllegalMove {
                from: sq("a7"),
                to: sq("a6")
            })
        );
        mv(&mut game, "g7", "g6");
        assert_eq!(game.status(), Status::InProgress);
    }

    #[test]
    fn reset_restores_the_initial_board() {
        let mut game = Game::new();
        mv(&mut game, "e2", "e4");
        mv(&mut game, "d7", "d5");
        mv(&mut game, "e4", "d5");

        game.reset();
        assert_eq!(game.board(), Game::new().board());
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.status(), Status::InProgress);
        assert!(game.captures(Color::Black).is_empty());
        assert_eq!(game.fullmove_number(), 1);
    }

    #[test]
    fn reset_keeps_the_configured_opening_side() {
        let mut game = Game::with_opening_side(Color::Black);
        game.select_and_move(sq("e7"), sq("e5")).unwrap();
        game.reset();
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn game_state_serializes_roundtrip() {
        let mut game = Game::new();
        mv(&mut game, "e2", "e4");
        mv(&mut game, "d7", "d5");
        mv(&mut game, "e4", "d5");

        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.turn(), game.turn());
        assert_eq!(restored.captures(Color::Black), game.captures(Color::Black));
    }
}
