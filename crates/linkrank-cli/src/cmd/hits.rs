//! `linkrank hits` — run HITS on one dataset and print the top nodes.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use linkrank_core::Vector;
use linkrank_core::datasets::dataset_name;
use linkrank_core::loader::load_path;
use linkrank_core::timing::timed;
use linkrank_rank::metrics::hits::HitsSession;
use linkrank_rank::topk::Ranked;
use serde::Serialize;
use tracing::warn;

use super::Context;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `linkrank hits`.
#[derive(Args, Debug)]
pub struct HitsArgs {
    /// Edge-list file.
    pub dataset: PathBuf,

    /// k values (repeatable or comma-separated); overrides config and env.
    #[arg(short = 'k', long = "top-k", value_delimiter = ',')]
    pub top_k: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct HitsPayload {
    dataset: String,
    nodes: usize,
    edges: usize,
    steps: usize,
    elapsed_ms: f64,
    authority: BTreeMap<usize, Vec<Ranked>>,
    hub: BTreeMap<usize, Vec<Ranked>>,
    rejected_k: Vec<usize>,
}

impl HitsPayload {
    /// Widest accepted k; its lists contain every smaller one as a prefix.
    fn widest(&self) -> Option<(usize, &[Ranked], &[Ranked])> {
        let (&k, authority) = self.authority.last_key_value()?;
        let hub = self.hub.get(&k)?;
        Some((k, authority.as_slice(), hub.as_slice()))
    }
}

/// Execute `linkrank hits`.
#[allow(clippy::cast_precision_loss)]
pub fn run_hits(args: &HitsArgs, output: OutputMode, ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.run_config(&args.top_k)?;
    let path = ctx.resolve(&args.dataset);

    let list = timed("load", || load_path(&path))
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;
    let (nodes, edges) = (list.node_count, list.edge_count);

    let mut session = HitsSession::new(list)
        .with_context(|| format!("Failed to build matrices for {}", path.display()))?;
    let outcome = session
        .run()
        .with_context(|| format!("HITS failed on {}", path.display()))?;

    let authority = outcome.top_k_all(Vector::Authority, &config.top_k);
    let hub = outcome.top_k_all(Vector::Hub, &config.top_k);
    let rejected_k: Vec<usize> = authority.rejected.iter().map(|(k, _)| *k).collect();
    for (k, err) in &authority.rejected {
        warn!(k, "{err}");
    }

    let payload = HitsPayload {
        dataset: dataset_name(&path),
        nodes,
        edges,
        steps: outcome.steps,
        elapsed_ms: outcome.elapsed.as_secs_f64() * 1000.0,
        authority: authority.ranked,
        hub: hub.ranked,
        rejected_k,
    };

    render_mode(output, &payload, render_hits_text, render_hits_pretty)
}

fn render_hits_text(p: &HitsPayload, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "rank\tauthority\tauthority_score\thub\thub_score")?;
    if let Some((_, authority, hub)) = p.widest() {
        for (i, (a, h)) in authority.iter().zip(hub).enumerate() {
            writeln!(w, "{}\t{}\t{}\t{}\t{}", i + 1, a.node, a.score, h.node, h.score)?;
        }
    }
    Ok(())
}

fn render_hits_pretty(p: &HitsPayload, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("HITS {}", p.dataset))?;
    pretty_kv(w, "nodes", p.nodes.to_string())?;
    pretty_kv(w, "edges", p.edges.to_string())?;
    pretty_kv(w, "steps", p.steps.to_string())?;
    pretty_kv(w, "elapsed", format!("{:.3} ms", p.elapsed_ms))?;
    if !p.rejected_k.is_empty() {
        let ks: Vec<String> = p.rejected_k.iter().map(ToString::to_string).collect();
        pretty_kv(w, "skipped k", ks.join(", "))?;
    }

    let Some((k, authority, hub)) = p.widest() else {
        return Ok(());
    };
    writeln!(w)?;
    pretty_section(w, &format!("Top {k}"))?;
    writeln!(w, "{:>5}  {:>10}  {:>12}  {:>10}  {:>12}", "rank", "authority", "score", "hub", "score")?;
    for (i, (a, h)) in authority.iter().zip(hub).enumerate() {
        writeln!(
            w,
            "{:>5}  {:>10}  {:>12.6e}  {:>10}  {:>12.6e}",
            i + 1,
            a.node,
            a.score,
            h.node,
            h.score
        )?;
    }
    Ok(())
}
