//! Property-based tests for the rules and the minimax search.

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tictactoe_minimax::{Action, Board, GameError, InvalidActionReason, MinimaxSearch, Player, minimax};

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Plays up to `num_moves` random legal moves from the empty board.
fn random_position(seed: u64, num_moves: usize) -> Board {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = Board::initial_state();

    for _ in 0..num_moves {
        let actions = board.actions();
        if actions.is_empty() {
            break;
        }
        let idx = rng.random_range(0..actions.len());
        board = board.result(actions[idx]).unwrap();
    }

    board
}

fn arb_position() -> impl Strategy<Value = Board> {
    (any::<u64>(), 0usize..=9).prop_map(|(seed, moves)| random_position(seed, moves))
}

/// Positions with at least two marks, cheap enough to search many times.
fn arb_searchable_position() -> impl Strategy<Value = Board> {
    (any::<u64>(), 2usize..=9).prop_map(|(seed, moves)| random_position(seed, moves))
}

fn count(board: &Board, player: Player) -> usize {
    board.rows().iter().flatten().filter(|c| **c == Some(player)).count()
}

// =============================================================================
// Rules
// =============================================================================

proptest! {
    #[test]
    fn prop_terminal_iff_winner_or_full(board in arb_position()) {
        prop_assert_eq!(board.is_terminal(), board.winner().is_some() || board.is_full());
    }

    #[test]
    fn prop_mark_counts_stay_balanced(board in arb_position()) {
        let x = count(&board, Player::X);
        let o = count(&board, Player::O);
        prop_assert!(x == o || x == o + 1, "X={} O={}\n{}", x, o, board);
    }

    #[test]
    fn prop_actions_are_empty_cells(board in arb_position()) {
        let actions = board.actions();

        if board.is_terminal() {
            prop_assert!(actions.is_empty());
        } else {
            prop_assert!(!actions.is_empty());
            for action in &actions {
                prop_assert!(action.is_in_bounds());
                prop_assert_eq!(board.get(action.row, action.col), None);
            }
        }
    }

    #[test]
    fn prop_result_changes_only_target_cell(board in arb_position()) {
        let original = board;

        for action in board.actions() {
            let next = board.result(action).unwrap();

            for row in 0..3 {
                for col in 0..3 {
                    if (row, col) == (action.row, action.col) {
                        prop_assert_eq!(next.get(row, col), Some(board.player()));
                    } else {
                        prop_assert_eq!(next.get(row, col), board.get(row, col));
                    }
                }
            }
        }

        prop_assert_eq!(board, original);
    }

    #[test]
    fn prop_result_rejects_marked_cells(board in arb_position()) {
        for row in 0..3 {
            for col in 0..3 {
                if let Some(owner) = board.get(row, col) {
                    let action = Action::new(row, col);
                    prop_assert_eq!(
                        board.result(action),
                        Err(GameError::InvalidAction {
                            action,
                            reason: InvalidActionReason::Occupied(owner),
                        })
                    );
                }
            }
        }
    }

    #[test]
    fn prop_utility_defined_only_on_terminal(board in arb_position()) {
        match board.utility() {
            Ok(_) => prop_assert!(board.is_terminal()),
            Err(err) => {
                prop_assert!(!board.is_terminal());
                prop_assert!(matches!(err, GameError::Precondition(_)));
            }
        }
    }

    #[test]
    fn prop_text_form_parses_back(board in arb_position()) {
        prop_assert_eq!(board.to_string().parse::<Board>(), Ok(board));
    }
}

// =============================================================================
// Search
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_minimax_none_only_on_terminal(board in arb_searchable_position()) {
        let action = minimax(&board);

        prop_assert_eq!(action.is_none(), board.is_terminal());
        if let Some(action) = action {
            prop_assert!(board.actions().contains(&action));
        }
    }

    #[test]
    fn prop_minimax_action_keeps_position_value(board in arb_searchable_position()) {
        let search = MinimaxSearch::default();
        let outcome = search.search(&board);

        let Some(action) = outcome.action else {
            return Ok(());
        };

        let child = search.search(&board.result(action).unwrap());
        prop_assert_eq!(child.score, outcome.score);

        // no other action is strictly better for the player to move
        for other in board.actions() {
            let score = search.search(&board.result(other).unwrap()).score;
            match board.player() {
                Player::X => prop_assert!(score <= outcome.score),
                Player::O => prop_assert!(score >= outcome.score),
            }
        }
    }

    #[test]
    fn prop_minimax_is_deterministic(board in arb_searchable_position()) {
        prop_assert_eq!(minimax(&board), minimax(&board));
    }
}
