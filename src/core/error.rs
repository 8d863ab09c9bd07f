//! Error types of the chess core.
//!
//! Every variant is local and recoverable: the caller is expected to drop
//! the offending input, the game state is left untouched.

use crate::core::definitions::{Color, PieceId, Square};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// Square coordinates outside of the 8x8 grid
    #[error("Square {0} is outside of the board")]
    OutOfBounds(Square),

    /// Destination isn't among the generated candidates of the piece
    #[error("Piece {piece} can't move to {destination}")]
    IllegalMove { piece: PieceId, destination: Square },

    /// Piece doesn't belong to the side to move
    #[error("It's {expected} turn, {actual} piece was submitted")]
    WrongTurn { expected: Color, actual: Color },

    /// Submission after a king was captured
    #[error("Game is already over")]
    GameAlreadyOver,

    /// Setup tried to put two pieces on one square
    #[error("Square {0} is already occupied")]
    SquareOccupied(Square),

    /// Setup or textual input doesn't describe a playable position
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    /// Another submission is still resolving on a shared game
    #[error("Previous turn is still in progress")]
    TurnInProgress,

    /// A turn panicked half way; the shared game was restarted
    #[error("Turn was aborted, the game has been restarted")]
    TurnAborted,
}

/// Result type alias for chess core operations
pub type ChessResult<T> = Result<T, ChessError>;
