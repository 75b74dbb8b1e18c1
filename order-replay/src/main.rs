//! Order replay binary
//!
//! Reads newline-delimited JSON orders from a file or stdin, runs them through
//! a single matching engine in arrival order and prints one JSON result per
//! order on stdout. Logs go to stderr.

mod config;
mod replay;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;
use matching_engine::MatchingEngine;
use tracing::{debug, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::ReplayConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// File of JSON orders, one per line; reads stdin when omitted
    input: Option<PathBuf>,

    /// Print aggregated book depth after the replay
    #[clap(short, long)]
    print_book: bool,

    /// Price levels per side when printing the book
    #[clap(short, long)]
    depth: Option<usize>,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let mut config = ReplayConfig::from_env()?;
    config.print_book |= args.print_book;
    config.debug |= args.debug;
    if let Some(depth) = args.depth {
        config.depth_levels = depth;
    }

    let log_level = if config.debug { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        debug!("Tracing initialized with {:?}", config);
    }

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            info!("Replaying orders from {}", path.display());
            Box::new(BufReader::new(File::open(path)?))
        }
        None => {
            info!("Replaying orders from stdin");
            Box::new(io::stdin().lock())
        }
    };

    let mut engine = MatchingEngine::new();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let summary = replay::replay(&mut engine, input, &mut output)?;
    if config.print_book {
        replay::write_book(&engine, config.depth_levels, &mut output)?;
    }

    info!(
        "Replay finished: {} orders processed, {} rejected, {} trades worth {}",
        summary.processed, summary.rejected, summary.trades, summary.notional
    );
    Ok(())
}
