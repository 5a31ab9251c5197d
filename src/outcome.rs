//! Terminal evaluation of tic-tac-toe positions

use crate::board::{Player, Position};

/// Classification of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// At least one empty cell and no completed line
    InProgress,
    /// X owns a complete line
    XWins,
    /// O owns a complete line
    OWins,
    /// Every cell filled with no complete line
    Draw,
}

impl GameStatus {
    /// Returns true for every status other than [`GameStatus::InProgress`]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Returns the winning player, if any
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::XWins => Some(Player::X),
            GameStatus::OWins => Some(Player::O),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    fn won_by(player: Player) -> Self {
        match player {
            Player::X => GameStatus::XWins,
            Player::O => GameStatus::OWins,
        }
    }
}

/// The eight winning lines, in evaluation order: rows, columns, then the
/// `\` diagonal before the `/` diagonal.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Classifies `position`.
///
/// A line wins when all three cells are occupied by moves of the same parity.
/// The first winning line in [`LINES`] order decides the result.
pub fn evaluate(position: &Position) -> GameStatus {
    for line in LINES.iter() {
        let owners = [
            position.owner(line[0]),
            position.owner(line[1]),
            position.owner(line[2]),
        ];
        if let [Some(a), Some(b), Some(c)] = owners {
            if a == b && b == c {
                return GameStatus::won_by(a);
            }
        }
    }

    if position.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

/// Reward of a status from `perspective`'s point of view:
/// +1 for a win, -1 for a loss, 0 for a draw or an unfinished game.
pub fn reward_for(status: GameStatus, perspective: Player) -> f64 {
    match status.winner() {
        Some(winner) if winner == perspective => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}
