use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scripted_chess::{
    all_moves, legal_moves, Algorithm, Board, CaptureGreedyBot, Color, EngineConfig, Game,
    GameState, PieceType, Square,
};

fn iter_pieces(board: &Board) -> u64 {
    board
        .pieces()
        .map(|piece| piece.kind().value() as u64)
        .sum()
}

fn for_piece_count(board: &Board) -> u64 {
    let mut result = 0;
    for file in 0..8 {
        for rank in 0..8 {
            if let Ok(Some(piece)) = board.occupant_at(Square::new(file, rank)) {
                result += piece.kind().value() as u64;
            }
        }
    }
    result
}

fn open_board() -> Board {
    let mut board = Board::new();
    for (color, kind, file, rank) in [
        (Color::White, PieceType::Queen, 3, 3),
        (Color::White, PieceType::King, 4, 0),
        (Color::Black, PieceType::Rook, 3, 6),
        (Color::Black, PieceType::Bishop, 6, 6),
        (Color::Black, PieceType::King, 4, 7),
    ] {
        board
            .spawn(color, kind, Square::new(file, rank))
            .expect("Bench setup must be valid");
    }
    board
}

fn greedy_game(mut game: Game, max_steps: usize) -> Game {
    let mut white = CaptureGreedyBot::seeded(1);
    for _ in 0..max_steps {
        if game.state() != GameState::PlayerMove(Color::White) {
            break;
        }
        let Some((piece, candidate)) = white.solve(game.board(), Color::White) else {
            break;
        };
        if game
            .submit_move(piece, candidate.destination, candidate.is_capture())
            .is_err()
        {
            break;
        }
    }
    game
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("iter piece count", |b| {
        b.iter(|| iter_pieces(black_box(&Board::default())))
    });
    c.bench_function("for piece count", |b| {
        b.iter(|| for_piece_count(black_box(&Board::default())))
    });
    c.bench_function("opening moves", |b| {
        let board = Board::default();
        b.iter(|| all_moves(black_box(&board), Color::White))
    });
    c.bench_function("queen in the open", |b| {
        let board = open_board();
        let queen = board
            .roster(Color::White)
            .next()
            .expect("Queen is spawned first")
            .clone();
        b.iter(|| legal_moves(black_box(&board), black_box(&queen)))
    });
    c.bench_function("rank opening moves", |b| {
        let board = Board::default();
        let mut bot = CaptureGreedyBot::seeded(0);
        b.iter(|| bot.rank_moves(black_box(&board), Color::Black))
    });
    c.bench_function("greedy game 100", |b| {
        b.iter(|| greedy_game(Game::new(EngineConfig::seeded(0)), 100))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
