use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{ChessError, ChessResult};
use crate::core::utils::{compact_pos, is_valid_coord, unpack_pos};

#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Color::White => "White",
            Color::Black => "Black",
        })
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /** Material value used by the scripted opponent to rank captures. */
    pub fn value(self) -> u32 {
        match self {
            PieceType::Pawn => 10,
            PieceType::Knight => 30,
            PieceType::Bishop => 30,
            PieceType::Rook => 50,
            PieceType::Queen => 90,
            PieceType::King => 1000,
        }
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            PieceType::Pawn => "pawn",
            PieceType::Knight => "knight",
            PieceType::Bishop => "bishop",
            PieceType::Rook => "rook",
            PieceType::Queen => "queen",
            PieceType::King => "king",
        })
    }
}

/// Board coordinate as a `(file, rank)` pair.
///
/// Coordinates outside of `[0, 7]` are representable on purpose: bounds
/// checks stay total and callers get `OutOfBounds` instead of a panic.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Square {
    pub file: i8,
    pub rank: i8,
}

impl Square {
    pub const fn new(file: i8, rank: i8) -> Square {
        Square { file, rank }
    }

    pub fn is_on_board(self) -> bool {
        (0..8).contains(&self.file) && (0..8).contains(&self.rank)
    }

    pub fn offset(self, file: i8, rank: i8) -> Square {
        Square::new(self.file.saturating_add(file), self.rank.saturating_add(rank))
    }

    pub(crate) fn to_pos(self) -> Option<u8> {
        self.is_on_board()
            .then(|| compact_pos(self.file as u8, self.rank as u8))
    }

    pub(crate) fn from_pos(pos: u8) -> Square {
        debug_assert!(is_valid_coord(pos), "0x88 position outside of the board");
        let (file, rank): (u8, u8) = unpack_pos(pos);
        Square::new(file as i8, rank as i8)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}

/// Accepts `file,rank` (optionally wrapped in parentheses) or an algebraic
/// square like `e2`, where files `a..=h` and ranks `1..=8` map to `0..8`.
impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> ChessResult<Self> {
        let invalid = || ChessError::InvalidPosition(format!("can't parse square `{s}`"));
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let Some((file, rank)) = trimmed.split_once(',') else {
            return match trimmed.as_bytes() {
                [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                    Ok(Square::new((file - b'a') as i8, (rank - b'1') as i8))
                }
                _ => Err(invalid()),
            };
        };
        let parse = |part: &str| part.trim().parse::<i8>().map_err(|_| invalid());
        Ok(Square::new(parse(file)?, parse(rank)?))
    }
}

/** Stable handle of a piece for the whole life of a game. */
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub(crate) u8);

impl Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) color: Color,
    pub(crate) kind: PieceType,
    pub(crate) square: Square,
    pub(crate) has_moved: bool,
}

impl Piece {
    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> PieceType {
        self.kind
    }

    pub fn square(&self) -> Square {
        self.square
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Quiet,
    Capture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub destination: Square,
    pub kind: MoveKind,
}

impl MoveCandidate {
    pub fn quiet(destination: Square) -> Self {
        MoveCandidate {
            destination,
            kind: MoveKind::Quiet,
        }
    }

    pub fn capture(destination: Square) -> Self {
        MoveCandidate {
            destination,
            kind: MoveKind::Capture,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.kind == MoveKind::Capture
    }
}

/** One applied half-move. */
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub color: Color,
    pub kind: PieceType,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceType>,
}

impl Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} -> {}", self.color, self.kind, self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, " takes {captured}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub record: MoveRecord,
    /** Side which lost its king with this move. */
    pub king_captured: Option<Color>,
}

/// Everything that happened during one accepted submission: the submitted
/// move, the automated replies and the state the game ended up in.
///
/// Usually there is at most one reply. The scripted side keeps moving while
/// the other side has nothing to play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub submitted: ExecutionResult,
    pub replies: Vec<ExecutionResult>,
    pub state: GameState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    PlayerMove(Color),
    /** Holds the winner. */
    Finished(Color),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub id: PieceId,
    pub kind: PieceType,
    pub color: Color,
    pub has_moved: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Figure(Figure),
}

impl From<&Piece> for Figure {
    fn from(piece: &Piece) -> Self {
        Figure {
            id: piece.id,
            kind: piece.kind,
            color: piece.color,
            has_moved: piece.has_moved,
        }
    }
}

/// Boundary used by input and presentation collaborators.
pub trait MatchInterface {
    fn current_board(&self) -> Vec<Vec<Cell>>;
    fn cell(&self, file: usize, rank: usize) -> Option<Cell>;
    fn on_piece_selected(&self, piece: PieceId) -> Vec<MoveCandidate>;
    fn on_destination_chosen(
        &mut self,
        piece: PieceId,
        destination: Square,
    ) -> ChessResult<TurnOutcome>;
    fn reset(&mut self);
    // info
    fn current_player(&self) -> Option<Color>;
    fn game_ended(&self) -> bool;
}

/// Receives every applied half-move and the end of the game.
pub trait GameObserver {
    fn piece_moved(&mut self, record: &MoveRecord);
    fn game_over(&mut self, winner: Color);
}
