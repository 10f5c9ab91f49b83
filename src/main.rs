//! CLI for maze generation

use clap::Parser;
use maze_carver::render::{self, Symbols};
use maze_carver::MazeSession;
use tracing_subscriber::EnvFilter;

/// Perfect maze generator using randomized backtracking
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Only advance this many single steps and show the unfinished maze
    #[arg(long)]
    steps: Option<usize>,

    /// Mark the path from the entrance to the exit
    #[arg(short, long)]
    solve: bool,

    /// Draw with ASCII characters instead of emojis
    #[arg(long)]
    ascii: bool,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut session = MazeSession::init(args.width, args.height, args.seed)?;
    match args.steps {
        Some(steps) => (0..steps).for_each(|_| {
            session.step();
        }),
        None => session.run_to_completion(),
    }

    let path = if args.solve {
        session.solution().unwrap_or_default()
    } else {
        Vec::new()
    };
    let symbols = if args.ascii {
        Symbols::ASCII
    } else {
        Symbols::EMOJI
    };
    println!(
        "{}",
        render::to_text(
            session.grid(),
            Some(session.start()),
            session.end(),
            &path,
            &symbols,
        )
    );
    Ok(())
}
