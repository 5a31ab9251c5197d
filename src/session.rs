//! Whole games between the search and a [`MoveSource`]
//!
//! Training is nothing more than many games played through the same
//! [`MCTS`]: its tree keeps every statistic gathered along the way.

use log::{info, warn};

use crate::{
    agent::MoveSource,
    board::{apply_move, Player, Position},
    mcts::MCTS,
    outcome::{evaluate, GameStatus},
    Result,
};

/// How often training logs its progress
const PROGRESS_INTERVAL: usize = 100;

/// Positions of a finished game
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Every position from the empty board to the final one
    pub positions: Vec<Position>,

    /// Final classification
    pub status: GameStatus,
}

impl GameRecord {
    /// The final position
    pub fn final_position(&self) -> Position {
        self.positions.last().copied().unwrap_or_default()
    }

    /// Returns the winner, if any
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }
}

/// Tally of a self-play run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfPlayReport {
    /// Games played
    pub games: usize,

    /// Moves made over all games
    pub moves: usize,

    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,

    /// Nodes in the shared tree afterwards
    pub tree_size: usize,
}

impl SelfPlayReport {
    fn record(&mut self, record: &GameRecord) {
        self.games += 1;
        self.moves += record.positions.len() - 1;
        match record.winner() {
            Some(Player::X) => self.x_wins += 1,
            Some(Player::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
    }
}

/// Tally of a training run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingReport {
    /// Games played
    pub games: usize,

    /// Games won by the search
    pub wins: usize,

    /// Games won by the opponent
    pub losses: usize,

    /// Drawn games
    pub draws: usize,

    /// Nodes in the shared tree after training
    pub tree_size: usize,
}

impl TrainingReport {
    fn record(&mut self, status: GameStatus, ai: Player) {
        self.games += 1;
        match status.winner() {
            Some(winner) if winner == ai => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.draws += 1,
        }
    }
}

/// Plays one game from the empty board.
///
/// X moves first. On `ai`'s turns the move comes from
/// [`MCTS::recommend_move`]; otherwise from `opponent`. The turn passes even
/// if the opponent's move was illegal and left the board unchanged.
/// `observer` sees every position before a move is made and the final one.
pub fn play_game<F>(
    mcts: &mut MCTS,
    ai: Player,
    opponent: &mut dyn MoveSource,
    observer: F,
) -> Result<GameRecord>
where
    F: FnMut(&Position, Player),
{
    play_out(
        |position, turn| {
            if turn == ai {
                return mcts.recommend_move(position, ai);
            }
            let cell = opponent.choose_move(position)?;
            let next = apply_move(position, cell);
            if next == *position {
                warn!("{} played illegal cell {}; turn passes", opponent.name(), cell);
            }
            Ok(next)
        },
        observer,
    )
}

/// Plays one game in which the search makes every move, each one searched on
/// behalf of the player whose turn it is.
pub fn play_self_game<F>(mcts: &mut MCTS, observer: F) -> Result<GameRecord>
where
    F: FnMut(&Position, Player),
{
    play_out(|position, turn| mcts.recommend_move(position, turn), observer)
}

fn play_out<M, F>(mut next_position: M, mut observer: F) -> Result<GameRecord>
where
    M: FnMut(&Position, Player) -> Result<Position>,
    F: FnMut(&Position, Player),
{
    let mut position = Position::new();
    let mut positions = vec![position];
    let mut turn = Player::X;
    let mut status = evaluate(&position);

    while status == GameStatus::InProgress {
        observer(&position, turn);

        position = next_position(&position, turn)?;

        positions.push(position);
        turn = turn.opponent();
        status = evaluate(&position);
    }

    observer(&position, turn);
    Ok(GameRecord { positions, status })
}

/// Plays `games` games with the search as `ai` against `opponent`
pub fn train(
    mcts: &mut MCTS,
    games: usize,
    ai: Player,
    opponent: &mut dyn MoveSource,
) -> Result<TrainingReport> {
    let mut report = TrainingReport::default();

    for game in 0..games {
        let record = play_game(mcts, ai, opponent, |_, _| {})?;
        report.record(record.status, ai);

        if (game + 1) % PROGRESS_INTERVAL == 0 {
            info!(
                "training game {}/{}: {} won, {} lost, {} drawn, {} nodes",
                game + 1,
                games,
                report.wins,
                report.losses,
                report.draws,
                mcts.tree().len()
            );
        }
    }

    report.tree_size = mcts.tree().len();
    Ok(report)
}

/// Plays `games` games of the search against itself over the shared tree
pub fn self_play(mcts: &mut MCTS, games: usize) -> Result<SelfPlayReport> {
    let mut report = SelfPlayReport::default();

    for game in 0..games {
        let record = play_self_game(mcts, |_, _| {})?;
        report.record(&record);

        if (game + 1) % PROGRESS_INTERVAL == 0 {
            info!(
                "self-play game {}/{}: X {} O {} drawn {}, {} nodes",
                game + 1,
                games,
                report.x_wins,
                report.o_wins,
                report.draws,
                mcts.tree().len()
            );
        }
    }

    report.tree_size = mcts.tree().len();
    Ok(report)
}
