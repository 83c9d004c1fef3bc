//! `linkrank stats` — load a dataset and summarize its shape.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use linkrank_core::GraphStats;
use linkrank_core::datasets::dataset_name;
use linkrank_core::loader::load_path;
use linkrank_core::timing::timed;
use serde::Serialize;

use super::Context;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `linkrank stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Edge-list file.
    pub dataset: PathBuf,
}

#[derive(Debug, Serialize)]
struct StatsPayload {
    dataset: String,
    #[serde(flatten)]
    stats: GraphStats,
}

/// Execute `linkrank stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode, ctx: &Context) -> anyhow::Result<()> {
    let path = ctx.resolve(&args.dataset);
    let list = timed("load", || load_path(&path))
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;

    let stats = timed("stats", || GraphStats::from_edges(&list))
        .with_context(|| format!("Failed to summarize dataset {}", path.display()))?;
    let payload = StatsPayload {
        dataset: dataset_name(&path),
        stats,
    };

    render_mode(output, &payload, render_stats_text, render_stats_pretty)
}

fn render_stats_text(p: &StatsPayload, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &p.stats;
    writeln!(w, "dataset\tnodes\tedges\tmin\tmax\tisolated\tmax_in\tmax_out")?;
    writeln!(
        w,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        p.dataset,
        s.node_count,
        s.edge_count,
        s.min_node_id,
        s.max_node_id,
        s.isolated_nodes,
        s.max_in_degree,
        s.max_out_degree
    )
}

fn render_stats_pretty(p: &StatsPayload, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &p.stats;
    pretty_section(w, &format!("Dataset {}", p.dataset))?;
    pretty_kv(w, "nodes", s.node_count.to_string())?;
    pretty_kv(w, "edges", s.edge_count.to_string())?;
    pretty_kv(w, "id range", format!("{}..={}", s.min_node_id, s.max_node_id))?;
    pretty_kv(w, "isolated", s.isolated_nodes.to_string())?;
    pretty_kv(w, "max in", s.max_in_degree.to_string())?;
    pretty_kv(w, "max out", s.max_out_degree.to_string())
}
