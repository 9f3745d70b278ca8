//! Players that can be seated at a [`play_game`](crate::game::play_game) table.

/// An agent that always plays the minimax action.
pub mod minimax_agent;
/// An agent that plays uniformly random legal actions.
pub mod random_agent;

pub use minimax_agent::MinimaxAgent;
pub use random_agent::RandomAgent;

use crate::board::{Action, Board};
use crate::error::Result;

/// Something that picks a move for the player to act.
pub trait Agent {
    /// A short label used in logs.
    fn name(&self) -> &str;

    /// Chooses an action for `board.player()`.
    ///
    /// # Errors
    /// Returns `GameError::Precondition` if the board is terminal.
    fn choose_action(&mut self, board: &Board) -> Result<Action>;
}
