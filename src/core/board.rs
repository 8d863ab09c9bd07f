use log::trace;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::core::definitions::{Color, Piece, PieceId, PieceType, Square};
use crate::core::error::{ChessError, ChessResult};

/// Owner of every live piece.
///
/// The grid is a variation of 0x88 board, so move generation can walk it
/// with plain byte offsets. Pieces live in a slab indexed by [`PieceId`];
/// a captured piece leaves a hole there and disappears from its roster.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BoardLayout")]
pub struct Board {
    #[serde_as(as = "[_; 128]")]
    grid: [Option<PieceId>; 128],
    pieces: Vec<Option<Piece>>,
    rosters: [Vec<PieceId>; 2],
}

/** Untrusted serialized form, turned into a [`Board`] only if consistent. */
#[serde_as]
#[derive(Deserialize)]
struct BoardLayout {
    #[serde_as(as = "[_; 128]")]
    grid: [Option<PieceId>; 128],
    pieces: Vec<Option<Piece>>,
    rosters: [Vec<PieceId>; 2],
}

impl TryFrom<BoardLayout> for Board {
    type Error = ChessError;

    fn try_from(layout: BoardLayout) -> ChessResult<Board> {
        let board = Board {
            grid: layout.grid,
            pieces: layout.pieces,
            rosters: layout.rosters,
        };
        board.check_layout()?;
        Ok(board)
    }
}

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl Board {
    /** Board without any pieces. */
    pub fn new() -> Board {
        Board {
            grid: [None; 128],
            pieces: Vec::with_capacity(32),
            rosters: [Vec::with_capacity(16), Vec::with_capacity(16)],
        }
    }

    /// Puts a new, never moved piece on the board. Used by setup only.
    pub fn spawn(&mut self, color: Color, kind: PieceType, square: Square) -> ChessResult<PieceId> {
        let pos = square.to_pos().ok_or(ChessError::OutOfBounds(square))?;
        if self.grid[pos as usize].is_some() {
            return Err(ChessError::SquareOccupied(square));
        }
        if self.pieces.len() > u8::MAX as usize {
            return Err(ChessError::InvalidPosition("too many pieces".to_string()));
        }
        Ok(self.push_piece(color, kind, pos))
    }

    fn push_piece(&mut self, color: Color, kind: PieceType, pos: u8) -> PieceId {
        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(Some(Piece {
            id,
            color,
            kind,
            square: Square::from_pos(pos),
            has_moved: false,
        }));
        self.rosters[color.index()].push(id);
        self.grid[pos as usize] = Some(id);
        id
    }

    pub fn is_on_board(&self, square: Square) -> bool {
        square.is_on_board()
    }

    pub fn occupant_at(&self, square: Square) -> ChessResult<Option<&Piece>> {
        let pos = square.to_pos().ok_or(ChessError::OutOfBounds(square))?;
        Ok(self.at(pos))
    }

    #[inline]
    pub(crate) fn at(&self, pos: u8) -> Option<&Piece> {
        self.grid[pos as usize].and_then(|id| self.piece(id))
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    /** Live pieces of one side in setup order. */
    pub fn roster(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.rosters[color.index()]
            .iter()
            .filter_map(|id| self.piece(*id))
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().flatten()
    }

    pub fn piece_count(&self) -> usize {
        self.rosters.iter().map(Vec::len).sum()
    }

    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.roster(color).find(|piece| piece.kind == PieceType::King)
    }

    /// Game start requires a consistent layout and exactly one king per
    /// side.
    pub fn validate(&self) -> ChessResult<()> {
        self.check_layout()?;
        for color in [Color::White, Color::Black] {
            let kings = self
                .roster(color)
                .filter(|piece| piece.kind == PieceType::King)
                .count();
            if kings != 1 {
                return Err(ChessError::InvalidPosition(format!(
                    "{color} has {kings} kings, expected exactly one"
                )));
            }
        }
        Ok(())
    }

    /// Grid, slab and rosters must describe the same set of pieces: every
    /// live piece stands on its own on-board cell, is listed once in its
    /// side's roster, and no cell points anywhere else.
    fn check_layout(&self) -> ChessResult<()> {
        let broken = |reason: String| Err(ChessError::InvalidPosition(reason));
        if self.pieces.len() > u8::MAX as usize + 1 {
            return broken("too many pieces".to_string());
        }
        for (idx, slot) in self.pieces.iter().enumerate() {
            let Some(piece) = slot else { continue };
            if piece.id.0 as usize != idx {
                return broken(format!("slot {idx} holds piece {}", piece.id));
            }
            let Some(pos) = piece.square.to_pos() else {
                return broken(format!("piece {} stands on {}", piece.id, piece.square));
            };
            if self.grid[pos as usize] != Some(piece.id) {
                return broken(format!("cell {} doesn't hold piece {}", piece.square, piece.id));
            }
        }
        for (pos, cell) in self.grid.iter().enumerate() {
            let Some(id) = cell else { continue };
            let stands_here = self
                .piece(*id)
                .and_then(|piece| piece.square.to_pos())
                .is_some_and(|own| own as usize == pos);
            if !stands_here {
                return broken(format!("cell {pos:#04x} points to piece {id}"));
            }
        }
        for color in [Color::White, Color::Black] {
            let roster = &self.rosters[color.index()];
            for (idx, id) in roster.iter().enumerate() {
                if roster[..idx].contains(id) {
                    return broken(format!("piece {id} is listed twice"));
                }
                if self.piece(*id).map(Piece::color) != Some(color) {
                    return broken(format!("{color} roster lists piece {id}"));
                }
            }
        }
        if self.piece_count() != self.pieces().count() {
            return broken("rosters miss live pieces".to_string());
        }
        Ok(())
    }

    /// Moves a live piece onto `square`, vacating the cell it was on.
    pub(crate) fn place(&mut self, id: PieceId, square: Square) -> ChessResult<()> {
        let pos = square.to_pos().ok_or(ChessError::OutOfBounds(square))?;
        if matches!(self.grid[pos as usize], Some(occupant) if occupant != id) {
            return Err(ChessError::SquareOccupied(square));
        }
        let piece = self
            .pieces
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or_else(|| ChessError::InvalidPosition(format!("piece {id} isn't on the board")))?;
        if let Some(previous) = piece.square.to_pos() {
            if self.grid[previous as usize] == Some(id) {
                self.grid[previous as usize] = None;
            }
        }
        piece.square = square;
        self.grid[pos as usize] = Some(id);
        trace!("Placed {id} on {square}");
        Ok(())
    }

    /// Empties `square`. Its occupant, if any, leaves the game: it is
    /// dropped from the slab and from its side's roster.
    pub(crate) fn clear(&mut self, square: Square) -> ChessResult<Option<Piece>> {
        let pos = square.to_pos().ok_or(ChessError::OutOfBounds(square))?;
        let Some(id) = self.grid[pos as usize].take() else {
            return Ok(None);
        };
        let removed = self.pieces.get_mut(id.0 as usize).and_then(Option::take);
        if let Some(piece) = &removed {
            self.rosters[piece.color.index()].retain(|other| *other != id);
        }
        Ok(removed)
    }
}

/// Standard starting position: ranks 0/1 are White, ranks 6/7 are Black.
impl Default for Board {
    fn default() -> Self {
        let mut board = Board::new();
        for (color, back_rank, pawn_rank) in [(Color::White, 0u8, 1u8), (Color::Black, 7, 6)] {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                board.push_piece(color, *kind, back_rank << 4 | file as u8);
            }
            for file in 0..8u8 {
                board.push_piece(color, PieceType::Pawn, pawn_rank << 4 | file);
            }
        }
        board
    }
}
