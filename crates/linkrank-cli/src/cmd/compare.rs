//! `linkrank compare` — rank every dataset with all methods and compare
//! their top-k lists.
//!
//! A dataset that fails to load or rank is reported and skipped; the
//! command only fails when no dataset succeeds.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::Args;
use linkrank_core::datasets::{dataset_name, discover};
use linkrank_rank::compare::PAIRS;
use linkrank_rank::pipeline::{DatasetReport, rank_dataset};
use serde::Serialize;
use tracing::{error, info};

use super::Context;
use crate::output::{CliError, OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};
use crate::report::write_reports;

/// Arguments for `linkrank compare`.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Dataset file or directory of `.txt` edge lists. Defaults to
    /// `datasets` from the config file.
    pub path: Option<PathBuf>,

    /// k values (repeatable or comma-separated); overrides config and env.
    #[arg(short = 'k', long = "top-k", value_delimiter = ',')]
    pub top_k: Vec<usize>,

    /// Directory receiving `rankings.csv` and `jaccard.csv`. Defaults to
    /// `output_dir` from the config file; no CSV is written if neither is set.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DatasetFailure {
    dataset: String,
    path: PathBuf,
    #[serde(flatten)]
    error: CliError,
}

#[derive(Debug, Serialize)]
struct ComparePayload {
    datasets: Vec<DatasetReport>,
    failures: Vec<DatasetFailure>,
    written: Vec<PathBuf>,
}

/// Execute `linkrank compare`.
pub fn run_compare(args: &CompareArgs, output: OutputMode, ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.run_config(&args.top_k)?;

    let Some(root) = args.path.as_ref().or(config.datasets.as_ref()) else {
        bail!("no dataset path given and no `datasets` entry in the config file");
    };
    let root = ctx.resolve(root);
    let paths = discover(&root)?;
    if paths.is_empty() {
        bail!("no .txt datasets found in {}", root.display());
    }
    info!(count = paths.len(), root = %root.display(), "comparing datasets");

    let mut datasets = Vec::new();
    let mut failures = Vec::new();
    for path in paths {
        match rank_dataset(&path, &config) {
            Ok(report) => datasets.push(report),
            Err(err) => {
                error!(dataset = %path.display(), "{err:#}");
                failures.push(DatasetFailure {
                    dataset: dataset_name(&path),
                    path,
                    error: CliError::from_anyhow(&err),
                });
            }
        }
    }

    let out_dir = args.out.as_ref().or(config.output_dir.as_ref());
    let written = match out_dir {
        Some(dir) if !datasets.is_empty() => write_reports(&ctx.resolve(dir), &datasets)
            .context("Failed to write CSV reports")?,
        _ => Vec::new(),
    };

    let payload = ComparePayload {
        datasets,
        failures,
        written,
    };
    render_mode(output, &payload, render_compare_text, render_compare_pretty)?;

    if payload.datasets.is_empty() {
        bail!("all {} datasets failed", payload.failures.len());
    }
    Ok(())
}

fn render_compare_text(p: &ComparePayload, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "dataset\tk\tpair\tjaccard")?;
    for report in &p.datasets {
        for row in &report.jaccard {
            for score in &row.pairs {
                writeln!(w, "{}\t{}\t{}\t{}", report.name, row.k, score.pair, score.score)?;
            }
        }
    }
    for failure in &p.failures {
        writeln!(w, "{}\tfailed\t{}", failure.dataset, failure.error.message)?;
    }
    Ok(())
}

fn render_compare_pretty(p: &ComparePayload, w: &mut dyn Write) -> std::io::Result<()> {
    for report in &p.datasets {
        pretty_section(w, &format!("Dataset {}", report.name))?;
        pretty_kv(w, "nodes", report.stats.node_count.to_string())?;
        pretty_kv(w, "edges", report.stats.edge_count.to_string())?;
        pretty_kv(
            w,
            "hits",
            format!("{} steps, {:.3} ms", report.hits.steps, report.hits.elapsed_ms),
        )?;
        pretty_kv(
            w,
            "pagerank",
            format!(
                "{} iterations{}",
                report.pagerank.iterations,
                if report.pagerank.converged { "" } else { " (not converged)" }
            ),
        )?;
        for rejected in &report.rejected {
            pretty_kv(w, "skipped", format!("{} k={}", rejected.method.slug(), rejected.k))?;
        }

        for row in &report.jaccard {
            writeln!(w)?;
            writeln!(w, "k = {}", row.k)?;
            for pair in PAIRS {
                if let Some(score) = row.pairs.iter().find(|s| s.pair == pair) {
                    writeln!(w, "  {:<34} {:.4}", pair.label(), score.score)?;
                }
            }
        }
        pretty_rule(w)?;
    }

    for failure in &p.failures {
        match &failure.error.error_code {
            Some(code) => writeln!(w, "FAILED {} [{code}]: {}", failure.dataset, failure.error.message)?,
            None => writeln!(w, "FAILED {}: {}", failure.dataset, failure.error.message)?,
        }
    }
    for path in &p.written {
        pretty_kv(w, "wrote", path.display().to_string())?;
    }
    Ok(())
}
