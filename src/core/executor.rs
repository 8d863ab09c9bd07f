use log::{debug, info};

use crate::core::board::Board;
use crate::core::definitions::{ExecutionResult, MoveRecord, PieceId, PieceType, Square};
use crate::core::error::{ChessError, ChessResult};

/// Applies a move which was already validated against the generated
/// candidates. The only code path that rewrites the grid after setup.
///
/// Input is still checked before anything changes, so a bad call leaves the
/// board as it was.
pub fn apply(
    board: &mut Board,
    piece: PieceId,
    destination: Square,
    is_capture: bool,
) -> ChessResult<ExecutionResult> {
    let illegal = ChessError::IllegalMove { piece, destination };
    let mover = board.piece(piece).ok_or(illegal.clone())?;
    let (color, kind, from) = (mover.color, mover.kind, mover.square);
    match board.occupant_at(destination)? {
        Some(target) if !is_capture || target.color == color => return Err(illegal),
        _ => (),
    }

    let captured = if is_capture {
        board.clear(destination)?
    } else {
        None
    };
    board.place(piece, destination)?;
    if let Some(moved) = board.piece_mut(piece) {
        moved.has_moved = true;
    }

    let king_captured = match &captured {
        Some(target) if target.kind == PieceType::King => {
            info!("{} king captured on {}", target.color, destination);
            Some(target.color)
        }
        Some(target) => {
            debug!("{color} {kind} took {} {} on {destination}", target.color, target.kind);
            None
        }
        None => None,
    };
    Ok(ExecutionResult {
        record: MoveRecord {
            piece,
            color,
            kind,
            from,
            to: destination,
            captured: captured.map(|target| target.kind),
        },
        king_captured,
    })
}
