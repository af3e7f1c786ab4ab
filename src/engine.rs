// =============================================================================
// Rule & Turn Engine
//
// Owns the board and the turn state. The presentation layer feeds it
// coordinate-resolved clicks; the engine decides whether they are legal,
// applies the resulting mutation synchronously and reports what happened.
// Animation is the caller's business: with `await_transitions` on, every
// accepted move locks the engine until `complete_transition` is called.
//
// States: Idle -> Selected -> (Idle | ChainCapture) ... -> GameOver.
// A piece that has just captured and can capture again is locked in
// `pending_capture` and nothing else may act until the chain ends.
// =============================================================================

use log::{debug, info};
use serde::Serialize;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{ConfigError, Rejection};
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceId};
use crate::rules;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub current_player: Color,
    pub selected_piece: Option<PieceId>,
    /// Set while a piece that just captured must keep capturing.
    pub pending_capture: Option<PieceId>,
    pub game_over: bool,
    pub winner: Option<Color>,
    /// A move was accepted and the presentation layer has not finished it yet.
    pub is_moving: bool,
}

impl GameState {
    fn new(first_player: Color) -> Self {
        GameState {
            current_player: first_player,
            selected_piece: None,
            pending_capture: None,
            game_over: false,
            winner: None,
            is_moving: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state")]
pub enum EngineState {
    Idle,
    Selected { piece: PieceId },
    ChainCapture { piece: PieceId },
    GameOver { winner: Color },
}

/// A click, already resolved to board coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// A piece was clicked.
    Piece { row: i32, col: i32 },
    /// An empty cell was clicked.
    Cell { row: i32, col: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionResult {
    pub state: EngineState,
    pub moved: Option<Move>,
    /// The piece removed by a capture, as it stood before removal.
    pub captured: Option<Piece>,
    pub chain_pending: bool,
    pub turn_switched: bool,
    pub winner: Option<Color>,
    /// The engine is locked until `complete_transition` is called.
    pub awaiting_transition: bool,
}

#[derive(Clone, Debug)]
pub struct Engine {
    board: Board,
    state: GameState,
    config: GameConfig,
    history: Vec<Move>,
    captured_white: usize,
    captured_black: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_position(Board::new(), GameConfig::new())
    }
}

impl Engine {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::with_initial_rows(config.initial_rows);
        Ok(Self::from_position(board, config))
    }

    /// Start from an arbitrary position. `config.initial_rows` is ignored.
    /// A position where one side has no pieces starts out finished.
    pub fn from_position(board: Board, config: GameConfig) -> Self {
        let mut engine = Engine {
            board,
            state: GameState::new(config.first_player),
            config,
            history: Vec::new(),
            captured_white: 0,
            captured_black: 0,
        };
        engine.check_winner();
        engine
    }

    pub fn new_game(&mut self) {
        *self = Self::from_position(Board::with_initial_rows(self.config.initial_rows), self.config.clone());
        info!("new game, {} to move", self.state.current_player);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// How many pieces of `color` have been captured so far.
    pub fn captured_count(&self, color: Color) -> usize {
        match color {
            Color::White => self.captured_white,
            Color::Black => self.captured_black,
        }
    }

    pub fn state(&self) -> EngineState {
        if let Some(winner) = self.state.winner {
            EngineState::GameOver { winner }
        } else if let Some(piece) = self.state.pending_capture {
            EngineState::ChainCapture { piece }
        } else if let Some(piece) = self.state.selected_piece {
            EngineState::Selected { piece }
        } else {
            EngineState::Idle
        }
    }

    /// Destinations the given piece may use right now, taking turn, chain lock,
    /// a move still in flight and game over into account.
    pub fn legal_destinations(&self, id: PieceId) -> Vec<Move> {
        let Some(piece) = self.board.find(id) else {
            return Vec::new();
        };
        if self.state.game_over || self.state.is_moving || piece.color != self.state.current_player {
            return Vec::new();
        }
        match self.state.pending_capture {
            Some(locked) if locked != id => Vec::new(),
            Some(_) => rules::captures_for(&self.board, piece),
            None => rules::legal_destinations(&self.board, piece),
        }
    }

    /// Whether the player to move has anything to do. A blocked player does
    /// not lose; the presentation layer decides what to show.
    pub fn has_legal_move(&self) -> bool {
        if self.state.game_over {
            return false;
        }
        self.state.pending_capture.is_some()
            || !rules::moves_for(&self.board, self.state.current_player).is_empty()
    }

    /// Click on `(row, col)`, treating it as a piece click when the cell is occupied.
    pub fn click(&mut self, row: i32, col: i32) -> Result<TransitionResult, Rejection> {
        let interaction = if self.board.is_empty(row, col) {
            Interaction::Cell { row, col }
        } else {
            Interaction::Piece { row, col }
        };
        self.attempt_interaction(interaction)
    }

    pub fn attempt_interaction(&mut self, interaction: Interaction) -> Result<TransitionResult, Rejection> {
        let result = self.dispatch(interaction);
        if let Err(reason) = &result {
            debug!("ignored {interaction:?}: {reason}");
        }
        result
    }

    /// Signal from the presentation layer that the last move finished animating.
    pub fn complete_transition(&mut self) {
        self.state.is_moving = false;
    }

    fn dispatch(&mut self, interaction: Interaction) -> Result<TransitionResult, Rejection> {
        if self.state.game_over {
            return Err(Rejection::GameOver);
        }
        if self.state.is_moving {
            return Err(Rejection::TransitionInFlight);
        }
        match interaction {
            Interaction::Piece { row, col } => self.select(row, col),
            Interaction::Cell { row, col } => self.move_selected(row, col),
        }
    }

    fn select(&mut self, row: i32, col: i32) -> Result<TransitionResult, Rejection> {
        if !Board::is_within_board(row, col) {
            return Err(Rejection::OutOfBounds { row, col });
        }
        let piece = *self.board.piece_at(row, col).ok_or(Rejection::NoPieceAt { row, col })?;
        if piece.color != self.state.current_player {
            return Err(Rejection::NotYourTurn { current: self.state.current_player });
        }
        if matches!(self.state.pending_capture, Some(locked) if locked != piece.id) {
            return Err(Rejection::ChainLocked);
        }
        self.state.selected_piece = Some(piece.id);
        debug!("{} selected {:?} at ({row}, {col})", piece.color, piece.id);
        Ok(self.report(None, None, false))
    }

    fn move_selected(&mut self, row: i32, col: i32) -> Result<TransitionResult, Rejection> {
        if !Board::is_within_board(row, col) {
            return Err(Rejection::OutOfBounds { row, col });
        }
        let id = self.state.selected_piece.ok_or(Rejection::NothingSelected)?;
        let piece = *self.board.find(id).ok_or(Rejection::NothingSelected)?;
        let player = self.state.current_player;
        let start = (piece.row as i32, piece.col as i32);
        let end = (row, col);
        let to = (row as usize, col as usize);

        // Captures are checked first so they always win over a simple move.
        if let Some(mid) = rules::jumped_square(&self.board, start, end, player) {
            return self.execute(Move { from: piece.position(), to, captured: Some(mid) });
        }
        if rules::can_move(&self.board, start, end, player) {
            if self.state.pending_capture.is_some() {
                return Err(Rejection::MustContinueCapture);
            }
            return self.execute(Move { from: piece.position(), to, captured: None });
        }
        Err(Rejection::IllegalDestination { row, col })
    }

    fn execute(&mut self, mv: Move) -> Result<TransitionResult, Rejection> {
        let moved = self.board.relocate(mv.from, mv.to).ok_or(Rejection::IllegalDestination {
            row: mv.to.0 as i32,
            col: mv.to.1 as i32,
        })?;
        let captured = mv.captured.and_then(|at| self.board.remove(at));
        self.history.push(mv);
        debug!("{} plays {}", moved.color, mv.to_notation());

        let mut turn_switched = false;
        match captured {
            Some(victim) => {
                match victim.color {
                    Color::White => self.captured_white += 1,
                    Color::Black => self.captured_black += 1,
                }
                if rules::can_piece_capture_again(&self.board, &moved) {
                    self.state.pending_capture = Some(moved.id);
                    self.state.selected_piece = Some(moved.id);
                    debug!("{:?} must keep capturing", moved.id);
                } else {
                    self.end_turn();
                    turn_switched = true;
                }
                self.check_winner();
            }
            None => {
                self.end_turn();
                turn_switched = true;
            }
        }

        if self.config.await_transitions {
            self.state.is_moving = true;
        }
        Ok(self.report(Some(mv), captured, turn_switched))
    }

    fn end_turn(&mut self) {
        self.state.pending_capture = None;
        self.state.selected_piece = None;
        self.state.current_player = self.state.current_player.opposite();
    }

    fn check_winner(&mut self) {
        if self.state.game_over {
            return;
        }
        let winner = if self.board.count(Color::White) == 0 {
            Color::Black
        } else if self.board.count(Color::Black) == 0 {
            Color::White
        } else {
            return;
        };
        self.state.game_over = true;
        self.state.winner = Some(winner);
        self.state.pending_capture = None;
        self.state.selected_piece = None;
        info!("game over, {winner} wins after {} moves", self.history.len());
    }

    fn report(&self, moved: Option<Move>, captured: Option<Piece>, turn_switched: bool) -> TransitionResult {
        TransitionResult {
            state: self.state(),
            moved,
            captured,
            chain_pending: self.state.pending_capture.is_some(),
            turn_switched,
            winner: self.state.winner,
            awaiting_transition: self.state.is_moving,
        }
    }
}
