//! ttt-mcts: tic-tac-toe against Monte Carlo Tree Search.
//!
//! ## Usage
//!
//! - `ttt-mcts` - Train against a random opponent, then play a human
//! - `ttt-mcts play --human o` - Same, with explicit options
//! - `ttt-mcts train` - Train only and report the tally
//! - `ttt-mcts selfplay` - Let the search play itself and report the tally

use std::io;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use ttt_mcts::agent::{HumanMover, RandomMover};
use ttt_mcts::session::{play_game, self_play, train, TrainingReport};
use ttt_mcts::{MCTSConfig, Player, MCTS};

/// Tic-tac-toe played by Monte Carlo Tree Search
#[derive(Parser)]
#[command(name = "ttt-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Train against a random opponent, then play against a human
    Play {
        /// Side the human plays
        #[arg(long, value_enum, default_value_t = Side::O)]
        human: Side,
    },
    /// Train against a random opponent and print the results
    Train,
    /// Play the search against itself over one shared tree
    #[command(name = "selfplay")]
    SelfPlay,
}

#[derive(Args, Clone)]
struct SearchArgs {
    /// Simulation cycles per move
    #[arg(long, global = true, default_value_t = 100)]
    iterations: usize,

    /// UCT exploration constant
    #[arg(long, global = true, default_value_t = std::f64::consts::SQRT_2)]
    exploration: f64,

    /// Seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Games played against a random opponent before anything else
    #[arg(long, global = true, default_value_t = 1000)]
    training_games: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    X,
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = MCTSConfig::default()
        .with_iterations(cli.search.iterations)
        .with_exploration_constant(cli.search.exploration);
    if let Some(seed) = cli.search.seed {
        config = config.with_seed(seed);
    }
    config.validate().context("bad search settings")?;

    let mut mcts = MCTS::new(config);

    match cli.command {
        Some(Commands::Train) => {
            let report = run_training(&mut mcts, &cli.search, Player::X)?;
            print_report(&report);
        }
        Some(Commands::SelfPlay) => {
            info!("self-play over {} games", cli.search.training_games);
            let report =
                self_play(&mut mcts, cli.search.training_games).context("self-play failed")?;
            println!(
                "Played {} games ({} moves): X won {}, O won {}, {} drawn ({} nodes in tree)",
                report.games,
                report.moves,
                report.x_wins,
                report.o_wins,
                report.draws,
                report.tree_size
            );
        }
        Some(Commands::Play { human }) => run_play(&mut mcts, &cli.search, human.into())?,
        None => run_play(&mut mcts, &cli.search, Player::O)?,
    }

    Ok(())
}

fn run_training(mcts: &mut MCTS, args: &SearchArgs, ai: Player) -> anyhow::Result<TrainingReport> {
    let mut opponent = match args.seed {
        Some(seed) => RandomMover::with_seed(seed.wrapping_add(1)),
        None => RandomMover::new(),
    };

    info!("training {} games as {}", args.training_games, ai);
    let report = train(mcts, args.training_games, ai, &mut opponent).context("training failed")?;
    Ok(report)
}

fn run_play(mcts: &mut MCTS, args: &SearchArgs, human: Player) -> anyhow::Result<()> {
    let ai = human.opponent();
    let report = run_training(mcts, args, ai)?;
    print_report(&report);

    println!("\nYou are {}. Cells are numbered 0-8, left to right, top to bottom.\n", human);

    let stdin = io::stdin();
    let mut human_mover = HumanMover::new(stdin.lock(), io::stdout());
    let record = play_game(mcts, ai, &mut human_mover, |position, _| {
        println!("{}", position);
    })
    .context("game aborted")?;

    match record.winner() {
        Some(winner) if winner == human => println!("You win!"),
        Some(winner) => println!("Player {} wins!", winner),
        None => println!("The game is a draw!"),
    }
    Ok(())
}

fn print_report(report: &TrainingReport) {
    println!(
        "Trained {} games: {} won, {} lost, {} drawn ({} nodes in tree)",
        report.games, report.wins, report.losses, report.draws, report.tree_size
    );
}
