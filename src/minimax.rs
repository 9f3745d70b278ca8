use crate::board::{Action, Board, Player, Utility};
use crate::search_node::SearchNode;
use ego_tree::{NodeId, Tree};
use tracing::debug;

/// Returns the optimal action for the player to move, or `None` if the game is over.
///
/// Ties between equally good actions go to the first one in row-major order,
/// so the answer for a given board never changes.
pub fn minimax(board: &Board) -> Option<Action> {
    MinimaxSearch::default().best_action(board)
}

/// Exhaustive minimax search over the Tic-Tac-Toe game tree.
///
/// X maximizes the [`Utility`], O minimizes it. Every reachable position below
/// the searched board is expanded; nothing is pruned or cached.
#[derive(Debug, Clone, Default)]
pub struct MinimaxSearch {
    record_tree: bool,
}

/// A builder for creating instances of `MinimaxSearch`.
#[derive(Debug, Clone, Default)]
pub struct MinimaxSearchBuilder {
    record_tree: bool,
}

impl MinimaxSearchBuilder {
    /// Creates a builder with tree recording disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables recording of every visited position in [`SearchOutcome::tree`].
    ///
    /// A search from the empty board records 549,946 nodes.
    pub fn with_search_tree(mut self, record_tree: bool) -> Self {
        self.record_tree = record_tree;
        self
    }

    /// Builds the `MinimaxSearch` instance with the configured parameters.
    pub fn build(self) -> MinimaxSearch {
        MinimaxSearch::new(self.record_tree)
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, the searched board included.
    pub nodes_visited: u64,
    /// Visited positions in which the game was over.
    pub terminal_nodes: u64,
    /// Deepest ply reached below the searched board.
    pub max_depth: u8,
}

/// Everything a search produced.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The chosen action. `None` when the searched board was terminal.
    pub action: Option<Action>,
    /// The minimax value of the searched board.
    pub score: Utility,
    pub stats: SearchStats,
    /// The explored tree, present only when recording was enabled.
    pub tree: Option<Tree<SearchNode>>,
}

impl MinimaxSearch {
    /// Returns a new builder for `MinimaxSearch`.
    pub fn builder() -> MinimaxSearchBuilder {
        MinimaxSearchBuilder::new()
    }

    /// Creates a new `MinimaxSearch`.
    ///
    /// It is recommended to use the builder pattern via `MinimaxSearch::builder()` instead.
    pub fn new(record_tree: bool) -> Self {
        Self { record_tree }
    }

    /// Returns true if this search records the explored tree.
    pub fn records_tree(&self) -> bool {
        self.record_tree
    }

    /// Searches `board` to the end of the game and returns the best action with its value.
    pub fn search(&self, board: &Board) -> SearchOutcome {
        let mut searcher = Searcher {
            stats: SearchStats::default(),
            tree: self
                .record_tree
                .then(|| Tree::new(SearchNode::new(*board, None, 0))),
        };
        let root = searcher.tree.as_ref().map(|tree| tree.root().id());

        let (score, action) = match board.player() {
            Player::X => searcher.max_value(board, root, 0),
            Player::O => searcher.min_value(board, root, 0),
        };

        debug!(
            nodes_visited = searcher.stats.nodes_visited,
            terminal_nodes = searcher.stats.terminal_nodes,
            score = %score,
            action = ?action,
            "minimax search complete"
        );

        SearchOutcome {
            action,
            score,
            stats: searcher.stats,
            tree: searcher.tree,
        }
    }

    /// Returns only the best action for `board`.
    pub fn best_action(&self, board: &Board) -> Option<Action> {
        self.search(board).action
    }
}

/// State of a single search. Scores live on the recursion stack; only the
/// counters and the optional recorded tree are shared across calls.
struct Searcher {
    stats: SearchStats,
    tree: Option<Tree<SearchNode>>,
}

impl Searcher {
    /// Best value X can force from `board`, and the first action achieving it.
    fn max_value(
        &mut self,
        board: &Board,
        node: Option<NodeId>,
        depth: u8,
    ) -> (Utility, Option<Action>) {
        if let Some(utility) = self.visit(board, depth) {
            self.record_score(node, utility);
            return (utility, None);
        }

        // `None` ranks below every utility.
        let mut best: Option<(Utility, Action)> = None;
        for action in board.actions() {
            let child = apply(board, action);
            let child_node = self.record_child(node, child, action, depth + 1);
            let (score, _) = self.min_value(&child, child_node, depth + 1);
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, action));
            }
        }

        self.finish(node, best)
    }

    /// Best value O can force from `board`, and the first action achieving it.
    fn min_value(
        &mut self,
        board: &Board,
        node: Option<NodeId>,
        depth: u8,
    ) -> (Utility, Option<Action>) {
        if let Some(utility) = self.visit(board, depth) {
            self.record_score(node, utility);
            return (utility, None);
        }

        // `None` ranks above every utility.
        let mut best: Option<(Utility, Action)> = None;
        for action in board.actions() {
            let child = apply(board, action);
            let child_node = self.record_child(node, child, action, depth + 1);
            let (score, _) = self.max_value(&child, child_node, depth + 1);
            if best.is_none_or(|(best_score, _)| score < best_score) {
                best = Some((score, action));
            }
        }

        self.finish(node, best)
    }

    /// Counts the visit and returns the utility if the game is over.
    fn visit(&mut self, board: &Board, depth: u8) -> Option<Utility> {
        self.stats.nodes_visited += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if !board.is_terminal() {
            return None;
        }

        self.stats.terminal_nodes += 1;
        Some(board.utility().expect("terminal board has a utility"))
    }

    fn finish(
        &mut self,
        node: Option<NodeId>,
        best: Option<(Utility, Action)>,
    ) -> (Utility, Option<Action>) {
        let (score, action) = best.expect("non-terminal board has at least one action");
        self.record_score(node, score);
        (score, Some(action))
    }

    fn record_child(
        &mut self,
        parent: Option<NodeId>,
        board: Board,
        action: Action,
        depth: u8,
    ) -> Option<NodeId> {
        let mut parent = self.tree.as_mut()?.get_mut(parent?)?;
        let child = parent.append(SearchNode::new(board, Some(action), depth));
        Some(child.id())
    }

    fn record_score(&mut self, node: Option<NodeId>, score: Utility) {
        if let (Some(tree), Some(id)) = (self.tree.as_mut(), node) {
            if let Some(mut node) = tree.get_mut(id) {
                node.value().score = Some(score);
            }
        }
    }
}

/// Applies an action produced by `Board::actions`. Failure here is a bug in
/// the rules, so it panics instead of skipping the branch.
fn apply(board: &Board, action: Action) -> Board {
    board
        .result(action)
        .unwrap_or_else(|err| panic!("BUG: enumerated action was rejected: {err}\n{board}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn takes_immediate_win() {
        // arrange
        let board = board("XX./OO./...");

        // act
        let outcome = MinimaxSearch::default().search(&board);

        // assert
        assert_eq!(outcome.action, Some(Action::new(0, 2)));
        assert_eq!(outcome.score, Utility::X_WINS);
        assert_eq!(outcome.stats.nodes_visited, 157);
    }

    #[test]
    fn only_finished_positions_count_as_terminal() {
        // arrange
        let search = MinimaxSearch::builder().with_search_tree(true).build();

        // act
        let outcome = search.search(&board("XX./OO./..."));

        // assert
        let tree = outcome.tree.unwrap();
        let leaves: Vec<_> = tree.nodes().filter(|n| !n.has_children()).collect();
        assert_eq!(outcome.stats.terminal_nodes, 73);
        assert_eq!(leaves.len(), 73);
        assert!(leaves.iter().all(|n| n.value().is_terminal()));
        assert!(
            tree.nodes()
                .filter(|n| n.has_children())
                .all(|n| n.value().board.utility().is_err())
        );
    }

    #[test]
    fn fills_last_cell() {
        let board = board("XOX/OXO/OX.");

        let action = minimax(&board).unwrap();
        let after = board.result(action).unwrap();

        assert_eq!(action, Action::new(2, 2));
        assert!(after.is_terminal());
        // the last X completes the main diagonal
        assert_eq!(after.utility(), Ok(Utility::X_WINS));
    }

    #[test]
    fn o_blocks_the_open_row() {
        let board = board("XX./.O./...");

        assert_eq!(board.player(), Player::O);
        assert_eq!(minimax(&board), Some(Action::new(0, 2)));
    }

    #[test]
    fn o_answers_corner_with_center_and_center_with_corner() {
        assert_eq!(minimax(&board("X../.../...")), Some(Action::new(1, 1)));
        assert_eq!(minimax(&board(".../.X./...")), Some(Action::new(0, 0)));
    }

    #[test]
    fn terminal_board_has_no_action() {
        // arrange
        let won = board("XXX/OO./...");

        // act
        let outcome = MinimaxSearch::default().search(&won);

        // assert
        assert_eq!(outcome.action, None);
        assert_eq!(outcome.score, Utility::X_WINS);
        assert_eq!(outcome.stats.nodes_visited, 1);
        assert_eq!(outcome.stats.terminal_nodes, 1);
        assert_eq!(minimax(&board("XOX/XOO/OXX")), None);
    }

    #[test]
    fn empty_board_is_a_draw_searched_without_pruning() {
        // arrange
        let board = Board::initial_state();
        let search = MinimaxSearch::default();

        // act
        let first = search.search(&board);
        let second = search.search(&board);

        // assert
        assert_eq!(first.action, Some(Action::new(0, 0)));
        assert_eq!(first.score, Utility::DRAW);
        assert_eq!(first.stats.nodes_visited, 549_946);
        assert_eq!(first.stats.terminal_nodes, 255_168);
        assert_eq!(first.stats.max_depth, 9);
        assert!(first.tree.is_none());
        assert_eq!(second.action, first.action);
        assert_eq!(second.stats, first.stats);
    }

    #[test]
    fn recorded_tree_matches_game_tree() {
        // arrange
        let search = MinimaxSearch::builder().with_search_tree(true).build();

        // act
        let outcome = search.search(&Board::initial_state());

        // assert
        let tree = outcome.tree.unwrap();
        assert_eq!(tree.nodes().count(), 549_946);
        assert_eq!(tree.nodes().filter(|n| !n.has_children()).count(), 255_168);
        assert_eq!(tree.root().value().score, Some(Utility::DRAW));
        assert_eq!(tree.root().value().prev_action, None);
    }

    #[test]
    fn recorded_scores_follow_minimax_rule() {
        let search = MinimaxSearch::builder().with_search_tree(true).build();
        let outcome = search.search(&board("X../.O./..."));
        let tree = outcome.tree.unwrap();

        for node in tree.nodes() {
            let data = node.value();
            let score = data.score.unwrap();

            if data.is_terminal() {
                assert!(!node.has_children());
                assert_eq!(Ok(score), data.board.utility());
                continue;
            }

            let actions: Vec<_> = node.children().map(|c| c.value().prev_action.unwrap()).collect();
            assert_eq!(actions, data.board.actions());

            let child_scores = node.children().map(|c| c.value().score.unwrap());
            let expected = match data.player {
                Player::X => child_scores.max(),
                Player::O => child_scores.min(),
            };
            assert_eq!(Some(score), expected);
            for child in node.children() {
                assert_eq!(child.value().depth, data.depth + 1);
            }
        }

        assert_eq!(outcome.score, tree.root().value().score.unwrap());
    }

    #[test]
    fn builder_defaults_to_no_tree() {
        assert!(!MinimaxSearch::builder().build().records_tree());
        assert!(MinimaxSearch::builder().with_search_tree(true).build().records_tree());
    }
}
