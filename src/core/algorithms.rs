use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::board::Board;
use crate::core::definitions::{Color, MoveCandidate, MoveKind, PieceId};
use crate::core::engine::all_moves;

/// Move picker for the automated side.
pub trait Algorithm {
    /** `None` when `color` has nothing to move. */
    fn solve(&mut self, board: &Board, color: Color) -> Option<(PieceId, MoveCandidate)>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub piece: PieceId,
    pub candidate: MoveCandidate,
    pub score: u32,
}

/// Greedy one-ply opponent.
///
/// A capture scores the material value of its victim, a quiet move scores a
/// fresh random number in `1..=9`. Since the cheapest victim is worth 10, any
/// capture outranks every quiet move.
#[derive(Debug, Clone)]
pub struct CaptureGreedyBot<R: Rng = StdRng> {
    rng: R,
}

impl CaptureGreedyBot<StdRng> {
    pub fn from_entropy() -> Self {
        CaptureGreedyBot::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        CaptureGreedyBot::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => CaptureGreedyBot::seeded(seed),
            None => CaptureGreedyBot::from_entropy(),
        }
    }
}

impl<R: Rng> CaptureGreedyBot<R> {
    pub fn new(rng: R) -> Self {
        CaptureGreedyBot { rng }
    }

    pub fn score(&mut self, board: &Board, candidate: &MoveCandidate) -> u32 {
        let victim = match candidate.kind {
            MoveKind::Capture => board
                .occupant_at(candidate.destination)
                .ok()
                .flatten()
                .map(|target| target.kind().value()),
            MoveKind::Quiet => None,
        };
        match victim {
            Some(value) if value > 0 => value,
            _ => self.rng.gen_range(1..=9),
        }
    }

    /// All moves of `color`, best first. Equal scores keep generation order.
    pub fn rank_moves(&mut self, board: &Board, color: Color) -> Vec<ScoredMove> {
        let mut scored: Vec<_> = all_moves(board, color)
            .into_iter()
            .map(|(piece, candidate)| ScoredMove {
                piece,
                candidate,
                score: self.score(board, &candidate),
            })
            .collect();
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }
}

impl<R: Rng> Algorithm for CaptureGreedyBot<R> {
    fn solve(&mut self, board: &Board, color: Color) -> Option<(PieceId, MoveCandidate)> {
        let ranked = self.rank_moves(board, color);
        trace!("{color} has {} candidate moves", ranked.len());
        let best = ranked.first()?;
        debug!(
            "{color} picks {} -> {} (score {})",
            best.piece, best.candidate.destination, best.score
        );
        Some((best.piece, best.candidate))
    }
}
