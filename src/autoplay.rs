use std::env;

use anyhow::{Context, Result};
#[allow(unused_imports)]
use log::{debug, info, warn};
use scripted_chess::{Algorithm, CaptureGreedyBot, Color, EngineConfig, Game, GameState};

const MAX_TURNS: usize = 500;

/// Lets the greedy opponent play White against itself.
///
/// Usage: `autoplay [games] [seed]`
fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let games: usize = match args.get(1) {
        Some(arg) => arg.parse().context("Games count must be a number")?,
        None => 10,
    };
    let seed: u64 = match args.get(2) {
        Some(arg) => arg.parse().context("Seed must be a number")?,
        None => 0,
    };

    let (mut white_wins, mut black_wins, mut unfinished) = (0, 0, 0);
    for idx in 0..games {
        let game_seed = seed.wrapping_add(idx as u64);
        let mut game = Game::new(EngineConfig::seeded(game_seed));
        let mut white = CaptureGreedyBot::seeded(game_seed.rotate_left(32));
        for _ in 0..MAX_TURNS {
            if game.state() != GameState::PlayerMove(Color::White) {
                break;
            }
            let Some((piece, candidate)) = white.solve(game.board(), Color::White) else {
                warn!("White has nothing to move in game {idx}");
                break;
            };
            game.submit_move(piece, candidate.destination, candidate.is_capture())
                .with_context(|| format!("Engine refused its own suggestion in game {idx}"))?;
        }
        match game.winner() {
            Some(Color::White) => white_wins += 1,
            Some(Color::Black) => black_wins += 1,
            None => unfinished += 1,
        }
        info!(
            "[game-{}]: {} plies, winner: {:?}",
            idx,
            game.history().len(),
            game.winner()
        );
    }
    println!("White: {white_wins} Black: {black_wins} Unfinished: {unfinished}");
    Ok(())
}
