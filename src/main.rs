//! HyperChess command-line front end.
//!
//! ## Usage
//!
//! - `hyperchess` - Watch two agents play each other
//! - `hyperchess protocol` - Serve the text protocol on stdin/stdout
//! - `hyperchess decide --snapshot pos.json` - Print the agent's choice for a saved position

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use hyperchess::agent::Agent;
use hyperchess::board::Side;
use hyperchess::constants::BOARD_SIZE;
use hyperchess::game::{Game, GameSnapshot};
use hyperchess::protocol::Engine;

/// HyperChess: five in a row with chess pieces
#[derive(Parser)]
#[command(name = "hyperchess")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the line-oriented text protocol on stdin/stdout
    Protocol {
        /// Seed for reproducible agent choices
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let two agents play a game and print every move
    Selfplay {
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many actions if nobody has won
        #[arg(long, default_value_t = 200)]
        max_moves: usize,
    },
    /// Read a JSON game snapshot and print the agent's chosen action
    Decide {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Protocol { seed }) => {
            let mut engine = Engine::new(seed);
            engine.run(io::stdin().lock(), io::stdout().lock())?;
        }
        Some(Commands::Selfplay { seed, max_moves }) => selfplay(seed, max_moves)?,
        Some(Commands::Decide { snapshot, seed }) => decide(&snapshot, seed)?,
        None => selfplay(None, 200)?,
    }
    Ok(())
}

fn agent_for(side: Side, seed: Option<u64>) -> Agent {
    match seed {
        // One stream per side.
        Some(seed) => Agent::with_seed(side, seed.wrapping_add(side as u64)),
        None => Agent::new(side),
    }
}

fn selfplay(seed: Option<u64>, max_moves: usize) -> Result<()> {
    let mut game = Game::new(BOARD_SIZE);
    let mut black = agent_for(Side::Black, seed);
    let mut white = agent_for(Side::White, seed);

    while !game.is_over() && game.moves() < max_moves {
        let agent = match game.turn() {
            Side::Black => &mut black,
            Side::White => &mut white,
        };
        let Some(decision) = agent.decide(&game.snapshot()) else {
            println!("{} has no action", game.turn());
            break;
        };
        let applied = game.apply(decision.action)?;
        println!(
            "{:>3}. {} {} ({})",
            game.moves(),
            applied.side,
            applied.action,
            decision.stage
        );
        for (at, piece) in &applied.captured {
            info!("captured {:?} of {} at {at:?}", piece.kind, piece.owner);
        }
    }

    println!("\n{}", game.board());
    let score = game.score();
    println!("Score: black {} white {}", score.black, score.white);
    match game.winner() {
        Some(side) => println!("Winner: {side}"),
        None => println!("No winner after {} moves", game.moves()),
    }
    Ok(())
}

fn decide(path: &Path, seed: Option<u64>) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let snap: GameSnapshot =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    let mut agent = agent_for(snap.turn, seed);
    match agent.decide(&snap) {
        Some(decision) => println!("{} ({})", decision.action, decision.stage),
        None => println!("none"),
    }
    Ok(())
}
