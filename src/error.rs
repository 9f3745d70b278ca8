use crate::board::{Action, Player};
use thiserror::Error;

/// Errors produced by the game rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// An operation was called on a board it is not defined for.
    #[error("precondition violated: {0}")]
    Precondition(&'static str),

    /// An action could not be applied to the board.
    #[error("invalid action {action}: {reason}")]
    InvalidAction {
        action: Action,
        reason: InvalidActionReason,
    },

    /// A literal board does not describe a reachable position.
    #[error("invalid board: {0}")]
    InvalidBoard(String),
}

/// Why [`Board::result`](crate::board::Board::result) rejected an action.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidActionReason {
    #[error("coordinates are outside the 3x3 grid")]
    OutOfBounds,

    #[error("cell is already marked by {0}")]
    Occupied(Player),

    #[error("the game is already over")]
    GameOver,
}

/// Convenience Result type for game operations.
pub type Result<T> = std::result::Result<T, GameError>;
