pub mod core;

// module re-exports
pub use crate::core::algorithms::{Algorithm, CaptureGreedyBot, ScoredMove};
pub use crate::core::board::Board;
pub use crate::core::config::EngineConfig;
pub use crate::core::definitions::{
    Cell, Color, ExecutionResult, Figure, GameObserver, GameState, MatchInterface, MoveCandidate,
    MoveKind, MoveRecord, Piece, PieceId, PieceType, Square, TurnOutcome,
};
pub use crate::core::engine::{all_moves, legal_moves, legal_moves_of};
pub use crate::core::error::{ChessError, ChessResult};
pub use crate::core::game::{Game, SharedGame};
