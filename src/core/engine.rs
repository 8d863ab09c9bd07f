//! Candidate generation for a selected piece.
//!
//! Nothing here mutates the board. Candidates are pseudo-legal in the usual
//! chess sense: there is no check detection, a king may walk into attack.

use crate::core::board::Board;
use crate::core::definitions::{Color, MoveCandidate, Piece, PieceId, PieceType, Square};
use crate::core::utils::{
    in_direction, offset, BISHOP_DIR, KING_MOVES, KNIGHT_MOVES, PAWN_PUSH, QUEEN_DIR, ROOK_DIR,
};

/// Every destination `piece` can reach on `board`, each tagged quiet or
/// capture.
pub fn legal_moves(board: &Board, piece: &Piece) -> Vec<MoveCandidate> {
    let Some(position) = piece.square.to_pos() else {
        return Vec::new();
    };
    let mut possible_moves = Vec::with_capacity(28);
    match piece.kind {
        PieceType::Pawn => pawn_moves(board, piece, position, &mut possible_moves),
        PieceType::Knight => {
            jump_moves(board, piece.color, position, KNIGHT_MOVES, &mut possible_moves)
        }
        PieceType::King => {
            jump_moves(board, piece.color, position, KING_MOVES, &mut possible_moves)
        }
        // Sliding pieces
        sliding_type => {
            let possible_directions = match sliding_type {
                PieceType::Bishop => BISHOP_DIR,
                PieceType::Rook => ROOK_DIR,
                _ => QUEEN_DIR,
            };
            for dir in possible_directions {
                for pos in in_direction(position, *dir) {
                    match board.at(pos) {
                        None => possible_moves.push(MoveCandidate::quiet(Square::from_pos(pos))),
                        Some(other) => {
                            if other.color != piece.color {
                                possible_moves.push(MoveCandidate::capture(Square::from_pos(pos)));
                            }
                            break;
                        }
                    }
                }
            }
        }
    }
    possible_moves
}

/** Same as [`legal_moves`], looked up by id. Unknown ids have no moves. */
pub fn legal_moves_of(board: &Board, piece: PieceId) -> Vec<MoveCandidate> {
    board
        .piece(piece)
        .map(|piece| legal_moves(board, piece))
        .unwrap_or_default()
}

/** Every candidate of every live piece of `color`, in roster order. */
pub fn all_moves(board: &Board, color: Color) -> Vec<(PieceId, MoveCandidate)> {
    board
        .roster(color)
        .flat_map(|piece| {
            legal_moves(board, piece)
                .into_iter()
                .map(move |candidate| (piece.id, candidate))
        })
        .collect()
}

fn jump_moves(
    board: &Board,
    color: Color,
    position: u8,
    jumps: &[u8],
    possible_moves: &mut Vec<MoveCandidate>,
) {
    for pos in jumps.iter().filter_map(|step| offset(position, *step)) {
        match board.at(pos) {
            None => possible_moves.push(MoveCandidate::quiet(Square::from_pos(pos))),
            Some(other) if other.color != color => {
                possible_moves.push(MoveCandidate::capture(Square::from_pos(pos)))
            }
            Some(_) => (),
        }
    }
}

fn pawn_moves(board: &Board, pawn: &Piece, position: u8, possible_moves: &mut Vec<MoveCandidate>) {
    let step = PAWN_PUSH[pawn.color.index()];
    let Some(front_pos) = offset(position, step) else {
        return;
    };
    // push
    if board.at(front_pos).is_none() {
        possible_moves.push(MoveCandidate::quiet(Square::from_pos(front_pos)));
        // double push, the rank the pawn stands on isn't checked
        if !pawn.has_moved {
            if let Some(pos) = offset(front_pos, step).filter(|pos| board.at(*pos).is_none()) {
                possible_moves.push(MoveCandidate::quiet(Square::from_pos(pos)));
            }
        }
    }
    // capture
    for side in [0x01, 0xff] {
        let Some(pos) = offset(front_pos, side) else {
            continue;
        };
        if matches!(board.at(pos), Some(other) if other.color != pawn.color) {
            possible_moves.push(MoveCandidate::capture(Square::from_pos(pos)));
        }
    }
}
