//! Terminal gomoku against the engine
//!
//! Moves are typed as `x y` (0-based, x across, y down). With `--human none`
//! two engines play each other.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use gomoku::eval::VectorEvaluator;
use gomoku::worker::{EngineWorker, Outcome, Table};
use gomoku::{Engine, EngineConfig, GameError, Randomness, Result, Stone, Variant};

#[derive(Parser, Debug)]
#[command(author, version, about = "Gomoku against a vector-guided alpha-beta engine", long_about = None)]
struct Args {
    /// Search depth in plies (4 or more recommended)
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Move generator used by the engines
    #[arg(long, value_enum, default_value_t = VariantArg::Vector)]
    variant: VariantArg,

    /// Margin around the stones searched by the brute-force generator
    #[arg(long, default_value_t = 1)]
    buffer: usize,

    /// Color played from the terminal
    #[arg(long, value_enum, default_value_t = HumanArg::Black)]
    human: HumanArg,

    /// RNG seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Disable evaluation noise, exploratory openings and random tie-breaks
    #[arg(long)]
    deterministic: bool,

    /// Engine poll interval in milliseconds
    #[arg(long, default_value_t = 50)]
    poll_ms: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Vector,
    Brute,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HumanArg {
    Black,
    White,
    None,
}

impl HumanArg {
    fn stone(self) -> Option<Stone> {
        match self {
            HumanArg::Black => Some(Stone::Black),
            HumanArg::White => Some(Stone::White),
            HumanArg::None => None,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(&args) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

fn engine_config(args: &Args, side: Stone) -> EngineConfig {
    let mut config = EngineConfig::default()
        .with_side(side)
        .with_depth(args.depth)
        .with_buffer(args.buffer)
        .with_variant(match args.variant {
            VariantArg::Vector => Variant::Vector,
            VariantArg::Brute => Variant::BruteForce,
        });
    if args.deterministic {
        config = config.with_randomness(Randomness::NONE);
    }
    if let Some(seed) = args.seed {
        // Distinct streams for the two sides of a self-play game
        let offset = if side == Stone::Black { 0 } else { 1 };
        config = config.with_seed(seed.wrapping_add(offset));
    }
    config
}

fn run(args: &Args) -> Result<()> {
    let poll = Duration::from_millis(args.poll_ms.max(1));
    let human = args.human.stone();
    let table = Arc::new(Table::new());

    let mut workers = Vec::new();
    for side in [Stone::Black, Stone::White] {
        if human != Some(side) {
            let engine = Engine::new(engine_config(args, side))?;
            workers.push(EngineWorker::spawn(Arc::clone(&table), engine, poll));
        }
    }

    let outcome = match human {
        Some(side) => play_from_terminal(&table, side, poll),
        None => table.wait_for_end(poll),
    };

    table.end();
    for worker in workers {
        let side = worker.side();
        if worker.join().is_err() {
            log::error!("engine thread for {side:?} panicked");
        }
    }

    print_summary(&table);
    match outcome {
        Some(Outcome::Win(winner)) => println!("{winner:?} wins"),
        Some(Outcome::Draw) => println!("Draw: the board is full"),
        None => println!("Game abandoned"),
    }
    Ok(())
}

/// Read the human's moves until the game is decided or stdin closes.
fn play_from_terminal(table: &Table, side: Stone, poll: Duration) -> Option<Outcome> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while table.wait_for_turn(side, poll).is_some() {
        println!("{}", table.board());
        print!("{side:?} to move (x y, or q): ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            return None;
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return None;
        }
        let Some((x, y)) = parse_move(line) else {
            println!("expected two numbers, e.g. `9 9`");
            continue;
        };
        match table.play_xy(x, y, side) {
            Ok(Some(outcome)) => return Some(outcome),
            Ok(None) => {}
            Err(e @ (GameError::Occupied { .. } | GameError::OutOfBoard { .. })) => {
                println!("{e}");
            }
            Err(e) => {
                log::warn!("move rejected: {e}");
                break;
            }
        }
    }
    table.outcome()
}

fn parse_move(line: &str) -> Option<(i32, i32)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<i32>);
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    parts.next().is_none().then_some((x, y))
}

/// Final board and the longest runs on it.
fn print_summary(table: &Table) {
    println!("{}", table.board());

    let mut eval = VectorEvaluator::new();
    for (pos, player) in table.history() {
        eval.play(pos, player);
    }
    for run in eval.vectors_at_least(4) {
        println!("  {run} (length {})", run.len());
    }
}
