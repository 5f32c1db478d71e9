//! WebAssembly bindings for the chess rules engine.
//!
//! This crate exposes the engine boundary to a browser UI: the page owns
//! rendering, click handling, and highlight animation, and calls in here
//! for legal targets, move commits, promotion choices, and the status
//! banner. Squares cross the boundary as (row, col) grid coordinates with
//! row 0 at the top of the rendered board.
//!
//! # Usage
//!
//! ```javascript
//! import init, { WasmGame } from 'chess-wasm';
//!
//! await init();
//!
//! const game = new WasmGame();
//! const targets = game.legalTargets(6, 4);    // pawn on e2
//! game.selectAndMove(6, 4, 4, 4);             // e2 to e4
//! console.log(game.currentStatus());
//! ```

use chess_core::{PieceKind, Square};
use chess_rules::{square_from_grid, Game, GameError, Status};
use wasm_bindgen::prelude::*;

fn js_err(e: GameError) -> JsError {
    JsError::new(&e.to_string())
}

fn grid(row: u8, col: u8) -> Result<Square, JsError> {
    square_from_grid(row, col).map_err(js_err)
}

/// A chess game that can be driven from JavaScript.
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Creates a new game with white to move.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        WasmGame { game: Game::new() }
    }

    /// Returns the legal destination squares for the piece on (row, col)
    /// as an array of `[row, col]` pairs, the set the UI highlights.
    #[wasm_bindgen(js_name = legalTargets)]
    pub fn legal_targets(&self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let from = grid(row, col)?;
        let targets: Vec<[u8; 2]> = self
            .game
            .legal_targets(from)
            .map_err(js_err)?
            .into_iter()
            .map(|sq| [sq.row(), sq.col()])
            .collect();
        serde_wasm_bindgen::to_value(&targets).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Commits a move. Errors if the move is not legal; the game state is
    /// unchanged in that case and the UI should re-prompt.
    #[wasm_bindgen(js_name = selectAndMove)]
    pub fn select_and_move(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> Result<(), JsError> {
        let from = grid(from_row, from_col)?;
        let to = grid(to_row, to_col)?;
        self.game.select_and_move(from, to).map_err(js_err)
    }

    /// Resolves a pending pawn promotion. `kind` is one of "queen",
    /// "rook", "bishop", "knight".
    #[wasm_bindgen(js_name = choosePromotion)]
    pub fn choose_promotion(&mut self, kind: &str) -> Result<(), JsError> {
        let kind = match kind {
            "queen" => PieceKind::Queen,
            "rook" => PieceKind::Rook,
            "bishop" => PieceKind::Bishop,
            "knight" => PieceKind::Knight,
            other => return Err(JsError::new(&format!("unknown promotion kind: {}", other))),
        };
        self.game.choose_promotion(kind).map_err(js_err)
    }

    /// Returns the `[row, col]` of the pawn awaiting promotion, or
    /// `undefined` when no promotion is pending.
    #[wasm_bindgen(js_name = awaitingPromotion)]
    pub fn awaiting_promotion(&self) -> Option<Vec<u8>> {
        self.game
            .awaiting_promotion()
            .map(|sq| vec![sq.row(), sq.col()])
    }

    /// Returns the status report driving the turn banner and check
    /// highlighting: `{ turn, status, winner, checkers: [[row, col], ...] }`
    /// where `status` is one of "in_progress", "check", "checkmate",
    /// "stalemate".
    #[wasm_bindgen(js_name = currentStatus)]
    pub fn current_status(&self) -> Result<JsValue, JsError> {
        let report = self.game.current_status();
        let checkers: Vec<[u8; 2]> = report
            .checkers
            .iter()
            .map(|sq| [sq.row(), sq.col()])
            .collect();
        let (status, winner) = match report.status {
            Status::InProgress => ("in_progress", None),
            Status::Check => ("check", None),
            Status::Checkmate { winner } => ("checkmate", Some(winner.to_string().to_lowercase())),
            Status::Stalemate => ("stalemate", None),
        };
        let view = StatusView {
            turn: report.turn.to_string().to_lowercase(),
            status: status.to_string(),
            winner,
            checkers,
        };
        serde_wasm_bindgen::to_value(&view).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Returns the single-letter code of the piece on (row, col), uppercase
    /// for white, or `undefined` for an empty square.
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, row: u8, col: u8) -> Result<Option<String>, JsError> {
        let sq = grid(row, col)?;
        Ok(self.game.board().piece_at(sq).map(|p| p.to_char().to_string()))
    }

    /// Returns "white" or "black".
    #[wasm_bindgen(js_name = sideToMove)]
    pub fn side_to_move(&self) -> String {
        self.game.turn().to_string().to_lowercase()
    }

    /// Returns true once the game has ended in checkmate or stalemate.
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// Starts the game over from the initial layout.
    pub fn reset(&mut self) {
        self.game.reset();
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Serialize)]
struct StatusView {
    turn: String,
    status: String,
    winner: Option<String>,
    checkers: Vec<[u8; 2]>,
}
