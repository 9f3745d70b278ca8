use crate::agents::Agent;
use crate::board::{Action, Board, Player, Utility};
use crate::error::Result;
use tracing::debug;

/// A finished game: the moves in order and the final position.
///
/// Only [`play_from`] and [`play_game`] build records, so the final board is
/// always terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    start: Board,
    actions: Vec<Action>,
    final_board: Board,
}

impl GameRecord {
    /// The position the game was played from.
    pub fn start(&self) -> Board {
        self.start
    }

    /// The actions played, in order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn final_board(&self) -> Board {
        self.final_board
    }

    pub fn winner(&self) -> Option<Player> {
        self.final_board.winner()
    }

    /// The value of the final position. Always defined, the game is over.
    pub fn utility(&self) -> Utility {
        self.final_board
            .utility()
            .expect("a recorded game ends on a terminal board")
    }

    /// Replays the recorded actions from the start position.
    pub fn boards(&self) -> Result<Vec<Board>> {
        let mut boards = Vec::with_capacity(self.actions.len() + 1);
        let mut board = self.start;
        boards.push(board);
        for action in &self.actions {
            board = board.result(*action)?;
            boards.push(board);
        }
        Ok(boards)
    }
}

/// Plays a whole game from the empty board, `x` moving first.
pub fn play_game<A, B>(x: &mut A, o: &mut B) -> Result<GameRecord>
where
    A: Agent + ?Sized,
    B: Agent + ?Sized,
{
    play_from(Board::initial_state(), x, o)
}

/// Plays `start` to the end, asking `x` or `o` for a move depending on whose turn it is.
///
/// # Errors
/// Propagates any error from an agent or an action it returns that the board rejects.
pub fn play_from<A, B>(start: Board, x: &mut A, o: &mut B) -> Result<GameRecord>
where
    A: Agent + ?Sized,
    B: Agent + ?Sized,
{
    let mut board = start;
    let mut actions = Vec::new();

    while !board.is_terminal() {
        let player = board.player();
        let action = match player {
            Player::X => x.choose_action(&board)?,
            Player::O => o.choose_action(&board)?,
        };
        board = board.result(action)?;
        actions.push(action);

        let agent = match player {
            Player::X => x.name(),
            Player::O => o.name(),
        };
        debug!(player = %player, agent, action = %action, "move played");
    }

    let record = GameRecord {
        start,
        actions,
        final_board: board,
    };
    debug!(
        x = x.name(),
        o = o.name(),
        moves = record.actions.len(),
        utility = %record.utility(),
        "game finished"
    );
    Ok(record)
}
