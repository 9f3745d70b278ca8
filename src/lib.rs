//! Tic-Tac-Toe rules and an exhaustive minimax player.
//!
//! The crate models a 3x3 board as an immutable value, exposes the rule
//! queries a game driver needs (whose turn it is, legal actions, winner,
//! terminal detection, utility) and computes the game-theoretically optimal
//! action with a full minimax search.
//!
//! # Example
//!
//! ```rust
//! use tictactoe_minimax::board::{Action, Board, Utility};
//! use tictactoe_minimax::minimax::minimax;
//!
//! // X to move, with an open top row
//! let board: Board = "XX./OO./...".parse().unwrap();
//!
//! let action = minimax(&board).unwrap();
//! assert_eq!(action, Action::new(0, 2));
//!
//! let next = board.result(action).unwrap();
//! assert!(next.is_terminal());
//! assert_eq!(next.utility(), Ok(Utility::X_WINS));
//! ```

/// Players, actions and the board together with all rule queries.
pub mod board;
/// Error type shared by the rules and the game driver.
pub mod error;
/// The exhaustive minimax search.
pub mod minimax;
/// Contains the `SearchNode` struct, stored in a recorded search tree.
pub mod search_node;
/// Contains traits and implementations for random number generation.
pub mod random;
/// Agents that choose moves: minimax and random.
pub mod agents;
/// Runs a game between two agents.
pub mod game;

pub use board::{Action, Board, Player, Utility};
pub use error::{GameError, InvalidActionReason, Result};
pub use minimax::{MinimaxSearch, minimax};
