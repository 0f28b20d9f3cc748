//! chess-annotate - Labels every move of a chess game with its quality.
//!
//! Reads a PGN file (or a plain list of SAN moves), judges each ply against
//! the best move found by a two-ply search and prints the result as text or
//! JSON.

mod report;

use anyhow::{bail, Context};
use chess_analysis::{AnalysisConfig, AnalysisError, GameAnnotator};
use chess_rules::{parse_pgn, read_pgn, GameRecord};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Annotates chess games with move quality labels.
#[derive(Parser)]
#[command(name = "chess-annotate")]
#[command(about = "Annotates chess games with move quality labels")]
struct Args {
    /// PGN file to annotate, or `-` to read standard input
    #[arg(conflicts_with = "moves")]
    pgn: Option<PathBuf>,

    /// SAN moves to annotate instead of a PGN file, e.g. "e4 e5 Nf3"
    #[arg(long)]
    moves: Option<String>,

    /// Start position for --moves (defaults to the standard position)
    #[arg(long, requires = "moves")]
    fen: Option<String>,

    /// Configuration file (defaults to annotate.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Classify plies on all cores
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::load_default().context("Failed to load annotate.toml")?,
    };
    let game = load_game(&args)?;
    tracing::info!(plies = game.moves.len(), parallel = args.parallel, "Annotating game");

    let annotator = GameAnnotator::new(config);
    let result = if args.parallel {
        annotator.annotate_parallel(&game)
    } else {
        annotator.annotate(&game)
    };
    let annotation = result.map_err(describe_failure)?;

    match args.format {
        Format::Text => print!("{}", report::Report(&annotation)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&annotation)?),
    }
    Ok(())
}

fn load_game(args: &Args) -> anyhow::Result<GameRecord> {
    if let Some(moves) = &args.moves {
        let parsed = parse_pgn(moves);
        return Ok(GameRecord::new(args.fen.as_deref(), parsed.moves));
    }

    match &args.pgn {
        Some(path) if path.as_os_str() == "-" => {
            read_pgn(std::io::stdin().lock()).context("Failed to read PGN from stdin")
        }
        Some(path) => File::open(path)
            .and_then(read_pgn)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => bail!("Provide a PGN file, `-` for stdin, or --moves"),
    }
}

/// Adds a hint for games that cannot be replayed.
fn describe_failure(err: AnalysisError) -> anyhow::Error {
    if err.is_illegal_move() {
        anyhow::Error::new(err).context("The game does not replay from its start position")
    } else {
        err.into()
    }
}
