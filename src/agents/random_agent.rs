use super::Agent;
use crate::board::{Action, Board};
use crate::error::{GameError, Result};
use crate::random::{RandomGenerator, StandardRandomGenerator};
use tracing::trace;

/// Plays a uniformly random legal action.
#[derive(Debug, Clone, Default)]
pub struct RandomAgent<K: RandomGenerator = StandardRandomGenerator> {
    random: K,
}

impl<K: RandomGenerator> RandomAgent<K> {
    pub fn new(random: K) -> Self {
        Self { random }
    }
}

impl<K: RandomGenerator> Agent for RandomAgent<K> {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(&mut self, board: &Board) -> Result<Action> {
        let actions = board.actions();
        let action = *self
            .random
            .choose(&actions)
            .ok_or(GameError::Precondition("no action to choose on a terminal board"))?;
        trace!(player = %board.player(), action = %action, "random agent chose action");
        Ok(action)
    }
}
