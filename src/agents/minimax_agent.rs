use super::Agent;
use crate::board::{Action, Board};
use crate::error::{GameError, Result};
use crate::minimax::MinimaxSearch;
use tracing::trace;

/// Plays the action returned by an exhaustive [`MinimaxSearch`].
#[derive(Debug, Clone, Default)]
pub struct MinimaxAgent {
    search: MinimaxSearch,
}

impl MinimaxAgent {
    pub fn new(search: MinimaxSearch) -> Self {
        Self { search }
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn choose_action(&mut self, board: &Board) -> Result<Action> {
        let outcome = self.search.search(board);
        let action = outcome
            .action
            .ok_or(GameError::Precondition("no action to choose on a terminal board"))?;
        trace!(
            player = %board.player(),
            action = %action,
            score = %outcome.score,
            "minimax agent chose action"
        );
        Ok(action)
    }
}
