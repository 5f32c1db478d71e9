//! Random self-play demo - plays random legal moves for both sides.
//!
//! This is the simplest possible consumer of the rules engine, useful as a
//! template for wiring up a real front end: it selects pieces, asks for
//! their legal moves, commits one, and answers promotion prompts, exactly
//! the way a UI would.

use chess_core::{Move, PieceKind, Square};
use chess_rules::{Game, Status};
use rand::seq::SliceRandom;

/// Hard stop so a random game cannot shuffle pieces forever.
const MAX_PLIES: u32 = 300;

/// Collects every legal move available to the side to move.
fn all_moves(game: &Game) -> Vec<Move> {
    Square::all()
        .filter_map(|sq| game.legal_moves(sq).ok())
        .flatten()
        .collect()
}

fn main() {
    let mut rng = rand::thread_rng();
    let mut game = Game::new();
    let mut plies = 0u32;

    while !game.is_game_over() && plies < MAX_PLIES {
        let moves = all_moves(&game);
        let mv = match moves.choose(&mut rng) {
            Some(&mv) => mv,
            None => break,
        };

        let mover = game.turn();
        game.select_and_move(mv.from, mv.to)
            .expect("a generated move is legal");
        println!("{:>3}. {}: {}", plies + 1, mover, mv);

        if game.awaiting_promotion().is_some() {
            let kind = *PieceKind::PROMOTIONS
                .choose(&mut rng)
                .expect("promotion kinds are non-empty");
            game.choose_promotion(kind)
                .expect("a promotable kind is accepted");
            println!("     promoted to {}", kind);
        }

        plies += 1;
    }

    println!("\n{}\n", game.board());

    match game.status() {
        Status::Checkmate { winner } => println!("Checkmate - {} wins after {} plies", winner, plies),
        Status::Stalemate => println!("Stalemate after {} plies", plies),
        Status::Check => println!("Stopped at the ply limit ({}) with {} in check", plies, game.turn()),
        Status::InProgress => println!("Stopped at the ply limit ({})", plies),
    }
}
