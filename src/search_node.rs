use crate::board::{Action, Board, Player, Utility};

/// A single position visited by the minimax search.
///
/// Nodes are only kept when the search is built with tree recording enabled;
/// see [`MinimaxSearchBuilder::with_search_tree`](crate::minimax::MinimaxSearchBuilder::with_search_tree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    /// The position this node represents.
    pub board: Board,
    /// The action that led here from the parent. `None` for the root node.
    pub prev_action: Option<Action>,
    /// The player to move in this position.
    pub player: Player,
    /// Number of plies below the searched root.
    pub depth: u8,
    /// The minimax value of the position, filled in once its subtree is evaluated.
    pub score: Option<Utility>,
}

impl SearchNode {
    /// Creates an unscored node for `board`.
    pub fn new(board: Board, prev_action: Option<Action>, depth: u8) -> Self {
        SearchNode {
            board,
            prev_action,
            player: board.player(),
            depth,
            score: None,
        }
    }

    /// Returns true if the game is over in this position.
    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }
}
