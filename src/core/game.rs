use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use crate::core::algorithms::{Algorithm, CaptureGreedyBot};
use crate::core::board::Board;
use crate::core::config::EngineConfig;
use crate::core::definitions::{
    Cell, Color, ExecutionResult, Figure, GameObserver, GameState, MatchInterface, MoveCandidate,
    MoveKind, MoveRecord, PieceId, Square, TurnOutcome,
};
use crate::core::engine::{all_moves, legal_moves, legal_moves_of};
use crate::core::error::{ChessError, ChessResult};
use crate::core::executor;

/** Scripted half-moves in a row before the controller gives up the turn. */
const MAX_SCRIPTED_PLIES: usize = 256;

/** Rows are ranks `0..8`, every row lists files `0..8`. */
pub fn ui_board(board: &Board) -> Vec<Vec<Cell>> {
    (0..8)
        .map(|rank| {
            (0..8)
                .map(|file| {
                    match board.occupant_at(Square::new(file, rank)).ok().flatten() {
                        Some(piece) => Cell::Figure(Figure::from(piece)),
                        None => Cell::Empty,
                    }
                })
                .collect()
        })
        .collect()
}

/// Turn controller: owns the board and decides who may move.
///
/// A submitted move for the side to move is validated, applied and, when
/// the other side is played by the scripted opponent, answered before
/// `submit_move` returns.
pub struct Game {
    board: Board,
    state: GameState,
    config: EngineConfig,
    opponent: Box<dyn Algorithm + Send>,
    history: Vec<MoveRecord>,
    observer: Option<Box<dyn GameObserver + Send>>,
}

impl Game {
    pub fn new(config: EngineConfig) -> Game {
        let opponent = Box::new(CaptureGreedyBot::from_seed(config.seed));
        Game::from_parts(Board::default(), Color::White, config, opponent)
    }

    /// Starts from a custom position. The board must hold exactly one king
    /// per side.
    pub fn with_board(board: Board, to_move: Color, config: EngineConfig) -> ChessResult<Game> {
        let opponent = Box::new(CaptureGreedyBot::from_seed(config.seed));
        Game::with_algorithm(board, to_move, config, opponent)
    }

    pub fn with_algorithm(
        board: Board,
        to_move: Color,
        config: EngineConfig,
        opponent: Box<dyn Algorithm + Send>,
    ) -> ChessResult<Game> {
        board.validate()?;
        Ok(Game::from_parts(board, to_move, config, opponent))
    }

    fn from_parts(
        board: Board,
        to_move: Color,
        config: EngineConfig,
        opponent: Box<dyn Algorithm + Send>,
    ) -> Game {
        let mut game = Game {
            board,
            state: GameState::PlayerMove(to_move),
            config,
            opponent,
            history: Vec::new(),
            observer: None,
        };
        // scripted side may be the one to start
        game.settle();
        game
    }

    pub fn set_observer(&mut self, observer: impl GameObserver + Send + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn winner(&self) -> Option<Color> {
        match self.state {
            GameState::Finished(winner) => Some(winner),
            GameState::PlayerMove(_) => None,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.board
            .occupant_at(square)
            .ok()
            .flatten()
            .map(|piece| piece.id())
    }

    /** Candidates of any live piece, regardless of whose turn it is. */
    pub fn legal_moves(&self, piece: PieceId) -> Vec<MoveCandidate> {
        legal_moves_of(&self.board, piece)
    }

    /// Asks the opponent's algorithm what it would play for the side to
    /// move. Nothing is applied.
    pub fn suggest_move(&mut self) -> Option<(PieceId, MoveCandidate)> {
        match self.state {
            GameState::PlayerMove(player) => self.opponent.solve(&self.board, player),
            GameState::Finished(_) => None,
        }
    }

    /// The only way to change the game from outside.
    ///
    /// Either the whole turn goes through (submitted move, then the scripted
    /// reply if one is due) or nothing changes and the error says why.
    pub fn submit_move(
        &mut self,
        piece: PieceId,
        destination: Square,
        is_attack: bool,
    ) -> ChessResult<GameState> {
        self.submit(piece, destination, is_attack)
            .map(|outcome| outcome.state)
    }

    pub fn submit(
        &mut self,
        piece: PieceId,
        destination: Square,
        is_attack: bool,
    ) -> ChessResult<TurnOutcome> {
        let player = match self.state {
            GameState::Finished(_) => {
                debug!("Rejected move of {piece}: game is over");
                return Err(ChessError::GameAlreadyOver);
            }
            GameState::PlayerMove(player) => player,
        };
        let illegal = ChessError::IllegalMove { piece, destination };
        let mover = self.board.piece(piece).ok_or(illegal.clone())?;
        if mover.color() != player {
            debug!("Rejected move of {piece}: it's {player} turn");
            return Err(ChessError::WrongTurn {
                expected: player,
                actual: mover.color(),
            });
        }
        let wanted = MoveCandidate {
            destination,
            kind: if is_attack {
                MoveKind::Capture
            } else {
                MoveKind::Quiet
            },
        };
        if !legal_moves(&self.board, mover).contains(&wanted) {
            debug!("Rejected move of {piece} to {destination}: not a candidate");
            return Err(illegal);
        }

        let submitted = self.make_move(piece, wanted)?;
        let replies = self.settle();
        Ok(TurnOutcome {
            submitted,
            replies,
            state: self.state,
        })
    }

    /// Rebuilds the starting position. The opponent keeps its algorithm.
    pub fn reset(&mut self) {
        info!("New game");
        self.board = Board::default();
        self.state = GameState::PlayerMove(Color::White);
        self.history.clear();
        self.settle();
    }

    fn make_move(
        &mut self,
        piece: PieceId,
        candidate: MoveCandidate,
    ) -> ChessResult<ExecutionResult> {
        let result = executor::apply(
            &mut self.board,
            piece,
            candidate.destination,
            candidate.is_capture(),
        )?;
        debug!("Move: {}", result.record);
        self.history.push(result.record.clone());
        if let Some(observer) = self.observer.as_mut() {
            observer.piece_moved(&result.record);
        }
        self.state = if result.king_captured.is_some() {
            let winner = result.record.color;
            info!("{winner} is the winner");
            if let Some(observer) = self.observer.as_mut() {
                observer.game_over(winner);
            }
            GameState::Finished(winner)
        } else {
            GameState::PlayerMove(result.record.color.opposite())
        };
        Ok(result)
    }

    /// Hands the turn on until a side that can actually move is to play.
    ///
    /// A side without candidates is skipped, and the scripted side answers
    /// whenever the turn is its own. Stops when both sides are stuck.
    fn settle(&mut self) -> Vec<ExecutionResult> {
        let mut replies = Vec::new();
        let mut skipped = false;
        while let GameState::PlayerMove(player) = self.state {
            if all_moves(&self.board, player).is_empty() {
                if skipped {
                    warn!("Neither side has a move");
                    break;
                }
                info!("{player} has no move, turn passes");
                self.state = GameState::PlayerMove(player.opposite());
                skipped = true;
                continue;
            }
            skipped = false;
            if self.config.opponent != Some(player) {
                break;
            }
            if replies.len() == MAX_SCRIPTED_PLIES {
                warn!("{player} moved {MAX_SCRIPTED_PLIES} times in a row, stopping");
                break;
            }
            match self.play_opponent(player) {
                Some(result) => replies.push(result),
                None => {
                    self.state = GameState::PlayerMove(player.opposite());
                    skipped = true;
                }
            }
        }
        replies
    }

    fn play_opponent(&mut self, color: Color) -> Option<ExecutionResult> {
        let choice = self
            .opponent
            .solve(&self.board, color)
            .filter(|(piece, candidate)| legal_moves_of(&self.board, *piece).contains(candidate));
        let Some((piece, candidate)) = choice else {
            warn!("Opponent gave no usable move for {color}, turn passes");
            return None;
        };
        match self.make_move(piece, candidate) {
            Ok(result) => Some(result),
            Err(err) => {
                warn!("Opponent move wasn't applied: {err}");
                None
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(EngineConfig::default())
    }
}

impl MatchInterface for Game {
    fn current_board(&self) -> Vec<Vec<Cell>> {
        ui_board(&self.board)
    }

    fn cell(&self, file: usize, rank: usize) -> Option<Cell> {
        if file < 8 && rank < 8 {
            let square = Square::new(file as i8, rank as i8);
            Some(match self.board.occupant_at(square).ok().flatten() {
                Some(piece) => Cell::Figure(Figure::from(piece)),
                None => Cell::Empty,
            })
        } else {
            None
        }
    }

    fn on_piece_selected(&self, piece: PieceId) -> Vec<MoveCandidate> {
        let selectable = match (self.state, self.board.piece(piece)) {
            (GameState::PlayerMove(player), Some(selected)) => selected.color() == player,
            _ => false,
        };
        if selectable {
            legal_moves_of(&self.board, piece)
        } else {
            Vec::new()
        }
    }

    fn on_destination_chosen(
        &mut self,
        piece: PieceId,
        destination: Square,
    ) -> ChessResult<TurnOutcome> {
        let is_attack = legal_moves_of(&self.board, piece)
            .iter()
            .find(|candidate| candidate.destination == destination)
            .map(MoveCandidate::is_capture)
            .unwrap_or(false);
        self.submit(piece, destination, is_attack)
    }

    fn reset(&mut self) {
        Game::reset(self)
    }

    fn current_player(&self) -> Option<Color> {
        match self.state {
            GameState::PlayerMove(player) => Some(player),
            GameState::Finished(_) => None,
        }
    }

    fn game_ended(&self) -> bool {
        matches!(self.state, GameState::Finished(_))
    }
}

/// Game handle shared between an input thread and a presentation thread.
///
/// Submissions never wait: while another turn is still resolving they are
/// refused with [`ChessError::TurnInProgress`].
#[derive(Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    pub fn new(game: Game) -> Self {
        SharedGame {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    pub fn submit_move(
        &self,
        piece: PieceId,
        destination: Square,
        is_attack: bool,
    ) -> ChessResult<GameState> {
        let mut game = match self.inner.try_lock() {
            Ok(game) => game,
            Err(TryLockError::WouldBlock) => {
                debug!("Rejected move of {piece}: previous turn in progress");
                return Err(ChessError::TurnInProgress);
            }
            Err(TryLockError::Poisoned(poisoned)) => {
                drop(self.recover(poisoned.into_inner()));
                return Err(ChessError::TurnAborted);
            }
        };
        game.submit_move(piece, destination, is_attack)
    }

    /** Blocks until the current turn has resolved. */
    pub fn lock(&self) -> MutexGuard<'_, Game> {
        match self.inner.lock() {
            Ok(game) => game,
            Err(poisoned) => self.recover(poisoned.into_inner()),
        }
    }

    /// A panic mid-turn may leave the board half applied, so the game
    /// restarts from the initial position.
    fn recover<'a>(&'a self, mut game: MutexGuard<'a, Game>) -> MutexGuard<'a, Game> {
        error!("Turn was aborted by a panic, starting a new game");
        game.reset();
        self.inner.clear_poison();
        game
    }

    pub fn reset(&self) {
        self.lock().reset()
    }
}
