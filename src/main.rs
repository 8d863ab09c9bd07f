use std::env;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use log::info;
use scripted_chess::{Cell, Color, EngineConfig, Game, MatchInterface, PieceType, Square};

fn main() -> Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let seed = env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>())
        .transpose()
        .context("Seed must be an unsigned number")?;
    let mut game = Game::new(EngineConfig {
        seed,
        ..Default::default()
    });
    info!("You play White, moves are `e2e4` or `file,rank file,rank` (e.g. `4,1 4,3`)");

    print_board(&game);
    prompt()?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        match line.trim() {
            "" => (),
            "quit" | "q" => break,
            "new" => {
                game.reset();
                print_board(&game);
            }
            _ if game.game_ended() => println!("Game is over, type `new` or `quit`"),
            input => match play(&mut game, input) {
                Ok(()) => print_board(&game),
                Err(err) => println!("{err:#}"),
            },
        }
        if let Some(winner) = game.winner() {
            println!("{winner} is the winner");
        }
        prompt()?;
    }
    Ok(())
}

fn parse_move(input: &str) -> Result<(Square, Square)> {
    let mut parts = input.split_whitespace();
    let (from, to) = match (parts.next(), parts.next(), parts.next()) {
        (Some(from), Some(to), None) => (from, to),
        // `e2e4`
        (Some(both), None, None) if both.len() == 4 && both.is_ascii() => both.split_at(2),
        _ => bail!("Expected `e2e4`, `e2 e4` or `file,rank file,rank`"),
    };
    Ok((from.parse()?, to.parse()?))
}

fn play(game: &mut Game, input: &str) -> Result<()> {
    let (from, to) = parse_move(input)?;
    let piece = game
        .piece_at(from)
        .with_context(|| format!("No piece on {from}"))?;
    let outcome = game.on_destination_chosen(piece, to)?;
    println!(" - {}", outcome.submitted.record);
    for reply in outcome.replies {
        println!(" - {}", reply.record);
    }
    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush().context("Failed to flush stdout")
}

fn print_board(game: &Game) {
    let rows = game.current_board();
    for (rank, row) in rows.iter().enumerate().rev() {
        let line: String = row.iter().map(|cell| format!(" {}", glyph(cell))).collect();
        println!("{rank} {line}");
    }
    println!("   0 1 2 3 4 5 6 7");
    if let Some(player) = game.current_player() {
        println!("{player} to move");
    }
}

fn glyph(cell: &Cell) -> char {
    let Cell::Figure(figure) = cell else {
        return '.';
    };
    let letter = match figure.kind {
        PieceType::Pawn => 'p',
        PieceType::Knight => 'n',
        PieceType::Bishop => 'b',
        PieceType::Rook => 'r',
        PieceType::Queen => 'q',
        PieceType::King => 'k',
    };
    match figure.color {
        Color::White => letter.to_ascii_uppercase(),
        Color::Black => letter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_notations() {
        let e2e4 = (Square::new(4, 1), Square::new(4, 3));
        for input in ["e2e4", "e2 e4", " 4,1  4,3 ", "(4,1) e4"] {
            assert!(parse_move(input).ok() == Some(e2e4), "Can't read `{input}`");
        }
        for input in ["", "e2", "e2e9", "i2i4", "e2 e4 e5", "4,1"] {
            assert!(parse_move(input).is_err(), "`{input}` shouldn't be a move");
        }
    }
}
