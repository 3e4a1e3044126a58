//! `snakes`: search for long induced paths on the d-cube.
//!
//! Two modes:
//!   `snakes search` — independent episodes (exhaustive by default,
//!   randomized with `-r`, learning rounds with `-l`)
//!   `snakes guided` — persistent guided exploration
//!
//! Exit status is nonzero only for configuration failures (e.g. the
//! dimension constraint); a short best path is still a successful run.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use snakes_harness::config::RunConfig;
use snakes_harness::progress::ConsoleProgress;
use snakes_harness::runner;
use snakes_search::report::render_report;

#[derive(Parser)]
#[command(name = "snakes")]
#[command(version)]
#[command(about = "Snake-in-the-box search on the d-dimensional hypercube")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Independent exploration episodes from the origin
    Search(SearchArgs),
    /// Persistent guided exploration with memoized completeness
    Guided(GuidedArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Cube dimension (min 3)
    #[arg(short, long, default_value_t = 3)]
    dimension: usize,

    /// Print the full best path, edge by edge
    #[arg(short, long)]
    print: bool,

    /// Seed the random source for a reproducible run
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Write the report as pretty JSON to this file
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Print a progress line every N episodes
    #[arg(long, default_value_t = 1000, value_name = "N")]
    progress_every: u64,
}

#[derive(Args)]
struct SearchArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Randomize the walk instead of recursing exhaustively
    #[arg(short, long)]
    randomized: bool,

    /// Number of episodes per learning round
    #[arg(short = 'i', long, default_value_t = 1, value_name = "N")]
    iterations: u64,

    /// Number of learning rounds
    #[arg(short = 'l', long, default_value_t = 1, value_name = "N")]
    learn: u64,

    /// Penalize a learning round that does not improve the best result
    #[arg(long)]
    penalize: bool,

    /// Penalty term for unproductive rounds (clamped to <= 0 at use)
    #[arg(long, value_name = "F", allow_hyphen_values = true)]
    penalty: Option<f64>,

    /// Keep accumulating statistics across learning rounds
    #[arg(short = 'm', long)]
    remember: bool,

    /// Depth cap for the exhaustive recursion
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,
}

#[derive(Args)]
struct GuidedArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Total rollout episodes
    #[arg(short = 'i', long, default_value_t = 10_000, value_name = "N")]
    iterations: u64,

    /// Pick the next node by weighted draw instead of top rank
    #[arg(short, long)]
    weighted: bool,
}

fn main() {
    let cli = Cli::parse();

    let (config, common) = match cli.command {
        Command::Search(args) => {
            let mut config = RunConfig::plain(args.common.dimension);
            config.episodes = args.iterations;
            config.learning_rounds = args.learn;
            config.randomized = args.randomized;
            config.penalize = args.penalize;
            if let Some(penalty) = args.penalty {
                config.penalty = penalty;
            }
            config.forget = !args.remember;
            config.max_depth = args.max_depth;
            config.seed = args.common.seed;
            (config, args.common)
        }
        Command::Guided(args) => {
            let mut config = RunConfig::guided(args.common.dimension);
            config.episodes = args.iterations;
            config.weighted_pick = args.weighted;
            config.seed = args.common.seed;
            (config, args.common)
        }
    };

    let mut sink = ConsoleProgress::new(common.progress_every);
    let report = match runner::run(&config, &mut sink) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if common.print {
        match serde_json::to_string_pretty(&render_report(&report)) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error rendering report: {e}");
                process::exit(1);
            }
        }
    }

    if let Some(out) = &common.out {
        if let Err(e) = runner::write_report(&report, out) {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }

    println!(
        "Largest path found was: {} edges ({} vertices)",
        report.edge_count(),
        report.best_len
    );
}
