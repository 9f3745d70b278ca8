use crate::error::{GameError, InvalidActionReason, Result};
use std::fmt;
use std::str::FromStr;

/// Side length of the grid.
pub const SIZE: usize = 3;

/// The eight winning lines, scanned in this order: rows, columns, diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// One of the two players. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    fn to_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A cell to be marked, addressed by row and column from the top-left corner.
///
/// The derived ordering is row-major, which is also the order in which
/// [`Board::actions`] enumerates cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if both coordinates lie inside the grid.
    pub fn is_in_bounds(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }
}

impl From<(usize, usize)> for Action {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The value of a finished game, always from X's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Utility(i8);

impl Utility {
    /// X has completed a line.
    pub const X_WINS: Self = Self(1);
    /// O has completed a line.
    pub const O_WINS: Self = Self(-1);
    /// The grid is full and nobody has a line.
    pub const DRAW: Self = Self(0);
}

impl From<Utility> for i8 {
    fn from(utility: Utility) -> i8 {
        utility.0
    }
}

impl fmt::Display for Utility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Tic-Tac-Toe position.
///
/// Boards are plain values: [`Board::result`] returns a new board and leaves
/// the original untouched. The player to move is derived from the number of
/// marks, so a board is fully described by its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Option<Player>; SIZE]; SIZE],
}

impl Board {
    /// Returns the empty starting board.
    pub fn initial_state() -> Self {
        Self::default()
    }

    /// Builds a board from literal rows, checking that it could occur in a real game.
    ///
    /// # Errors
    /// Returns `GameError::InvalidBoard` if:
    /// - X does not have the same number of marks as O or exactly one more
    /// - both players own a complete line
    /// - the winner is not the player who moved last
    pub fn from_rows(rows: [[Option<Player>; SIZE]; SIZE]) -> Result<Self> {
        let board = Self { cells: rows };
        let x_count = board.count(Player::X);
        let o_count = board.count(Player::O);

        if x_count != o_count && x_count != o_count + 1 {
            return Err(GameError::InvalidBoard(format!(
                "X has {} marks and O has {}; X must have as many as O or one more",
                x_count, o_count
            )));
        }

        let x_line = board.has_line(Player::X);
        let o_line = board.has_line(Player::O);
        if x_line && o_line {
            return Err(GameError::InvalidBoard(
                "both players own a complete line".to_string(),
            ));
        }
        if x_line && x_count != o_count + 1 {
            return Err(GameError::InvalidBoard(
                "O moved after X had already won".to_string(),
            ));
        }
        if o_line && x_count != o_count {
            return Err(GameError::InvalidBoard(
                "X moved after O had already won".to_string(),
            ));
        }

        Ok(board)
    }

    /// Returns the rows of the grid.
    pub fn rows(&self) -> &[[Option<Player>; SIZE]; SIZE] {
        &self.cells
    }

    /// Returns the mark at the given cell, or `None` if it is empty or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Number of marked cells.
    pub fn marked_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Returns true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| c.is_some())
    }

    /// Returns the player whose turn it is.
    ///
    /// The value is derived from the mark count only, so it is still returned
    /// (but meaningless) once the game is over.
    pub fn player(&self) -> Player {
        if self.marked_count() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Returns every empty cell in row-major order.
    ///
    /// The list is empty exactly when the board is terminal.
    pub fn actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| Action::new(row, col)))
            .filter(|a| self.cells[a.row][a.col].is_none())
            .collect()
    }

    /// Returns the board after the player to move marks `action`.
    ///
    /// # Errors
    /// Returns `GameError::InvalidAction` if the action is out of bounds, the
    /// cell is already marked, or the game is already over.
    pub fn result(&self, action: Action) -> Result<Board> {
        let reject = |reason| GameError::InvalidAction { action, reason };

        if !action.is_in_bounds() {
            return Err(reject(InvalidActionReason::OutOfBounds));
        }
        if let Some(owner) = self.cells[action.row][action.col] {
            return Err(reject(InvalidActionReason::Occupied(owner)));
        }
        if self.winner().is_some() {
            return Err(reject(InvalidActionReason::GameOver));
        }

        let mut next = *self;
        next.cells[action.row][action.col] = Some(self.player());
        Ok(next)
    }

    /// Returns the owner of the first complete line, if any.
    pub fn winner(&self) -> Option<Player> {
        let winner = LINES.iter().find_map(|line| self.line_owner(line));
        debug_assert!(
            !(self.has_line(Player::X) && self.has_line(Player::O)),
            "both players own a complete line:\n{}",
            self
        );
        winner
    }

    /// Returns true if someone has won or the grid is full.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Returns the value of a finished game.
    ///
    /// # Errors
    /// Returns `GameError::Precondition` if the board is not terminal.
    pub fn utility(&self) -> Result<Utility> {
        if !self.is_terminal() {
            return Err(GameError::Precondition("utility called on non-terminal board"));
        }

        Ok(match self.winner() {
            Some(Player::X) => Utility::X_WINS,
            Some(Player::O) => Utility::O_WINS,
            None => Utility::DRAW,
        })
    }

    fn line_owner(&self, line: &[(usize, usize); 3]) -> Option<Player> {
        let [(r0, c0), (r1, c1), (r2, c2)] = *line;
        let owner = self.cells[r0][c0]?;
        (self.cells[r1][c1] == Some(owner) && self.cells[r2][c2] == Some(owner)).then_some(owner)
    }

    fn has_line(&self, player: Player) -> bool {
        LINES
            .iter()
            .any(|line| self.line_owner(line) == Some(player))
    }

    fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c == Some(player))
            .count()
    }
}

impl fmt::Display for Board {
    /// Writes one line per row, `X`, `O` or `.` per cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let c = cell.map_or('.', Player::to_char);
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parses nine cells written row by row. Whitespace and `/` are ignored,
    /// so `"XX./OO./..."` and the [`Display`](fmt::Display) form both parse.
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = [[None; SIZE]; SIZE];
        let mut index = 0;

        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            let cell = match c {
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                '.' | '_' | '-' => None,
                other => {
                    return Err(GameError::InvalidBoard(format!(
                        "unexpected character '{}' in '{}'",
                        other, s
                    )));
                }
            };
            if index < SIZE * SIZE {
                cells[index / SIZE][index % SIZE] = cell;
            }
            index += 1;
        }

        if index != SIZE * SIZE {
            return Err(GameError::InvalidBoard(format!(
                "expected {} cells, got {} in '{}'",
                SIZE * SIZE,
                index,
                s
            )));
        }

        Board::from_rows(cells)
    }
}
