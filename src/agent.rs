//! Move sources for the side not played by the search
//!
//! A move source only has to produce a cell index. An illegal index is
//! harmless: [`apply_move`](crate::board::apply_move) leaves the position
//! unchanged.

use std::io::{BufRead, Write};

use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};

use crate::{
    board::{is_legal, legal_moves, Position, BOARD_CELLS},
    MCTSError, Result,
};

/// Anything that can choose a move for one side of the game
pub trait MoveSource {
    /// Chooses a cell to play in `position`
    fn choose_move(&mut self, position: &Position) -> Result<usize>;

    /// Short name used in logs and reports
    fn name(&self) -> &str;
}

/// Picks a legal move uniformly at random
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    /// Creates a mover seeded from entropy
    pub fn new() -> Self {
        RandomMover {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible mover
    pub fn with_seed(seed: u64) -> Self {
        RandomMover {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for RandomMover {
    fn choose_move(&mut self, position: &Position) -> Result<usize> {
        legal_moves(position)
            .choose(&mut self.rng)
            .ok_or(MCTSError::NoLegalActions)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Reads cell indices from a text stream, re-prompting on bad input
pub struct HumanMover<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanMover<R, W> {
    /// Creates a mover reading from `input` and prompting on `output`
    pub fn new(input: R, output: W) -> Self {
        HumanMover { input, output }
    }

    /// Parses one line into a cell index
    pub fn parse_move(line: &str) -> Result<usize> {
        let trimmed = line.trim();
        let cell: usize = trimmed
            .parse()
            .map_err(|_| MCTSError::InvalidMove(format!("'{}' is not a number", trimmed)))?;
        if cell >= BOARD_CELLS {
            return Err(MCTSError::InvalidMove(format!(
                "cell {} is outside 0-{}",
                cell,
                BOARD_CELLS - 1
            )));
        }
        Ok(cell)
    }
}

impl<R: BufRead, W: Write> MoveSource for HumanMover<R, W> {
    fn choose_move(&mut self, position: &Position) -> Result<usize> {
        loop {
            write!(self.output, "your move (0-{}): ", BOARD_CELLS - 1)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(MCTSError::InvalidMove("input closed".to_string()));
            }

            match Self::parse_move(&line) {
                Ok(cell) if is_legal(position, cell) => return Ok(cell),
                Ok(cell) => writeln!(self.output, "cell {} is already taken", cell)?,
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn name(&self) -> &str {
        "human"
    }
}
