#![forbid(unsafe_code)]

mod cmd;
mod output;
mod report;

use clap::{Parser, Subcommand};
use linkrank_core::timing;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "linkrank: HITS link analysis over edge-list datasets",
    long_about = None
)]
struct Cli {
    /// Log at debug level unless `LINKRANK_LOG` says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print per-stage timings to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Output format (defaults to pretty on a TTY, text otherwise).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (default: `linkrank.toml` in the working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Summarize a dataset",
        long_about = "Load an edge list and report its node range, edge count and degree extremes.",
        after_help = "EXAMPLES:\n    linkrank stats data/web-Stanford.txt\n\n    # Machine-readable output\n    linkrank stats data/web-Stanford.txt --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Run HITS on one dataset",
        long_about = "Build the co-citation and co-reference matrices, iterate HITS to convergence and print the top authorities and hubs.",
        after_help = "EXAMPLES:\n    linkrank hits data/cycle.txt -k 10\n\n    # Several k values\n    linkrank hits data/cycle.txt -k 10,20,50 --json"
    )]
    Hits(cmd::hits::HitsArgs),

    #[command(
        about = "Compare HITS, PageRank and in-degree rankings",
        long_about = "Rank every dataset with in-degree, PageRank and HITS, then report the Jaccard similarity of each method pair's top-k lists.",
        after_help = "EXAMPLES:\n    linkrank compare data/\n\n    # Write rankings.csv and jaccard.csv\n    linkrank compare data/ -k 10,20 --out results/"
    )]
    Compare(cmd::compare::CompareArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("LINKRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "linkrank=debug,info"
        } else {
            "linkrank=info,warn"
        })
    });

    let format = env::var("LINKRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let timing_enabled = cli.timing || timing::timing_enabled_from_env();
    timing::set_timing_enabled(timing_enabled);
    timing::clear_timings();

    let output = cli.output_mode();
    let ctx = cmd::Context {
        cwd: env::current_dir()?,
        config_path: cli.config.clone(),
    };
    debug!(?output, cwd = %ctx.cwd.display(), "starting");

    let command_result = match &cli.command {
        Commands::Stats(args) => {
            timing::timed("cmd.stats", || cmd::stats::run_stats(args, output, &ctx))
        }
        Commands::Hits(args) => timing::timed("cmd.hits", || cmd::hits::run_hits(args, output, &ctx)),
        Commands::Compare(args) => {
            timing::timed("cmd.compare", || cmd::compare::run_compare(args, output, &ctx))
        }
    };

    if timing_enabled {
        let report = timing::collect_report();
        if report.is_empty() {
            eprintln!("timing report: no samples recorded");
        } else {
            eprintln!("timing report:");
            eprintln!("{}", report.display_table());
            eprintln!("timing report (json):");
            eprintln!("{}", serde_json::to_string_pretty(&report.to_json())?);
        }
    }

    if let Err(err) = command_result {
        render_error(output, &CliError::from_anyhow(&err))?;
        std::process::exit(1);
    }
    Ok(())
}
