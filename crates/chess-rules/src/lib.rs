//! Rules engine for a two-player, shared-board chess game.
//!
//! This crate provides:
//! - [`Board`] - an 8x8 grid mapping squares to optional pieces
//! - Move generation and the self-check legality filter
//! - Check detection via attack-map queries
//! - [`Game`] - the state machine owning turn order, captures, promotion,
//!   and terminal classification (checkmate, stalemate)
//!
//! # Architecture
//!
//! The engine is a plain in-memory library: a UI collaborator asks for the
//! legal targets of a selected square, highlights them, and commits a move
//! through [`Game::select_and_move`]. All state lives in one explicit,
//! serializable [`Game`] value; queries never mutate, and rejected
//! operations leave the state untouched.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Square};
//! use chess_rules::Game;
//!
//! let mut game = Game::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//!
//! assert!(game.legal_targets(e2).unwrap().contains(&e4));
//! game.select_and_move(e2, e4).unwrap();
//! assert_eq!(game.turn(), Color::Black);
//! ```

mod board;
mod check;
mod game;
mod movegen;

pub use board::{square_from_grid, Board};
pub use check::{attackers_of, is_in_check};
pub use game::{Game, GameError, Status, StatusReport};
pub use movegen::{legal_moves_from, pseudo_legal_moves};
