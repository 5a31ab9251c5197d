//! Board model for 3x3 tic-tac-toe
//!
//! A [`Position`] stores, for every cell, either nothing or the move-order
//! number of the move that filled it. The parity of that number tells which
//! player made the move: even numbers belong to X, odd numbers to O. Because
//! moves are only ever added through [`apply_move`], the occupied cells always
//! hold exactly `0..k` for some `k`.

use std::fmt;

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first; owns even move-order numbers
    X,
    /// Moves second; owns odd move-order numbers
    O,
}

impl Player {
    /// Returns the player owning the given move-order number
    pub fn from_move_order(order: u8) -> Self {
        if order % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Returns the other player
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// An immutable snapshot of the board
///
/// Equality and hashing are by cell values, so a `Position` can key the
/// search tree's lookup table directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    cells: [Option<u8>; BOARD_CELLS],
}

impl Position {
    /// Creates the empty board
    pub fn new() -> Self {
        Position {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Builds a position from raw cell values.
    ///
    /// No validation is performed. Callers outside of tests should reach
    /// positions through [`apply_move`] so the move-order invariant holds.
    pub fn from_cells(cells: [Option<u8>; BOARD_CELLS]) -> Self {
        Position { cells }
    }

    /// Replays a sequence of cell indices from the empty board
    pub fn from_moves(moves: &[usize]) -> Self {
        moves
            .iter()
            .fold(Position::new(), |position, &cell| apply_move(&position, cell))
    }

    /// Returns the raw cell values
    pub fn cells(&self) -> &[Option<u8>; BOARD_CELLS] {
        &self.cells
    }

    /// Returns the value of a single cell, or `None` if out of bounds or empty
    pub fn cell(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied().flatten()
    }

    /// Returns the player occupying a cell
    pub fn owner(&self, index: usize) -> Option<Player> {
        self.cell(index).map(Player::from_move_order)
    }

    /// Number of occupied cells
    pub fn moves_played(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns true when every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The player whose turn it is, derived from the number of moves played
    pub fn player_to_move(&self) -> Player {
        if self.moves_played() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    fn next_move_order(&self) -> u8 {
        self.cells
            .iter()
            .flatten()
            .max()
            .map_or(0, |&highest| highest + 1)
    }
}

/// Returns true iff `cell` is on the board and empty
pub fn is_legal(position: &Position, cell: usize) -> bool {
    cell < BOARD_CELLS && position.cells[cell].is_none()
}

/// Plays the next move at `cell`, returning the new position.
///
/// The cell receives the next sequential move-order number. An illegal cell
/// leaves the position unchanged; use [`is_legal`] to tell the two apart.
pub fn apply_move(position: &Position, cell: usize) -> Position {
    let mut next = *position;
    if is_legal(position, cell) {
        next.cells[cell] = Some(position.next_move_order());
    }
    next
}

/// Iterates the empty cells in ascending index order
pub fn legal_moves(position: &Position) -> impl Iterator<Item = usize> + '_ {
    (0..BOARD_CELLS).filter(move |&cell| is_legal(position, cell))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "---------")?;
            }
            let symbols: Vec<String> = (0..3)
                .map(|col| match self.owner(row * 3 + col) {
                    Some(player) => player.to_string(),
                    None => " ".to_string(),
                })
                .collect();
            writeln!(f, "{}", symbols.join(" | "))?;
        }
        Ok(())
    }
}
