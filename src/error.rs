use thiserror::Error;

use crate::piece::Color;

/// Why the engine ignored an interaction. A rejection never changes state, so
/// callers that only care about "did anything happen" can drop the reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the game is already over")]
    GameOver,
    #[error("a move is still being animated")]
    TransitionInFlight,
    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("there is no piece at ({row}, {col})")]
    NoPieceAt { row: i32, col: i32 },
    #[error("it is {current}'s turn")]
    NotYourTurn { current: Color },
    #[error("the piece that just captured must keep capturing")]
    ChainLocked,
    #[error("no piece is selected")]
    NothingSelected,
    #[error("a capture is pending, simple moves are not allowed")]
    MustContinueCapture,
    #[error("the selected piece cannot go to ({row}, {col})")]
    IllegalDestination { row: i32, col: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("({row}, {col}) is a light square")]
    LightSquare { row: usize, col: usize },
    #[error("({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
    #[error("the piece stored at ({row}, {col}) records a different position")]
    Misplaced { row: usize, col: usize },
    #[error("piece id {0} is used by more than one piece")]
    DuplicateId(u16),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("initial_rows must be between 1 and 3, got {0}")]
    InvalidInitialRows(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bad move notation {text:?}: {reason}")]
pub struct NotationError {
    pub text: String,
    pub reason: &'static str,
}
