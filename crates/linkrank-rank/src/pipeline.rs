//! Per-dataset ranking pipeline.
//!
//! `load → stats → adjacency → co-relations → in-degree, PageRank, HITS →
//! top-k → Jaccard`. Every stage runs under [`timed`], so `--timing`
//! reports where a dataset spent its time.
//!
//! Construction failures (unreadable file, malformed edges, allocation
//! failure, degenerate HITS vector) abort the dataset and are returned to
//! the caller. An oversized k only removes that k from the report.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use linkrank_core::config::RunConfig;
use linkrank_core::datasets::dataset_name;
use linkrank_core::loader::load_path;
use linkrank_core::timing::timed;
use linkrank_core::{EdgeList, GraphStats, RankError};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::compare::{JaccardTable, Method, MethodPair, MethodRankings, compare};
use crate::metrics::hits::HitsSession;
use crate::metrics::indegree::in_degree_scores;
use crate::metrics::pagerank::{PageRankConfig, pagerank};
use crate::scores::ScoreVector;
use crate::topk::{Ranked, top_k_all};

/// Everything computed for one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub name: String,
    pub path: PathBuf,
    pub stats: GraphStats,
    pub hits: HitsSummary,
    pub pagerank: PageRankSummary,
    /// Top-k lists per method and k.
    pub rankings: BTreeMap<Method, BTreeMap<usize, Vec<Ranked>>>,
    pub jaccard: Vec<JaccardRow>,
    /// k values dropped because they exceed the node count.
    pub rejected: Vec<RejectedK>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HitsSummary {
    pub steps: usize,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageRankSummary {
    pub iterations: usize,
    pub converged: bool,
}

/// Jaccard scores of every method pair at one k.
#[derive(Debug, Clone, Serialize)]
pub struct JaccardRow {
    pub k: usize,
    pub pairs: Vec<PairScore>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PairScore {
    pub pair: MethodPair,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedK {
    pub method: Method,
    pub k: usize,
    pub message: String,
}

impl DatasetReport {
    /// Top-k list of `method` at `k`, if computed.
    #[must_use]
    pub fn ranking(&self, method: Method, k: usize) -> Option<&[Ranked]> {
        self.rankings
            .get(&method)
            .and_then(|lists| lists.get(&k))
            .map(Vec::as_slice)
    }

    /// Jaccard score of `pair` at `k`, if computed.
    #[must_use]
    pub fn jaccard_score(&self, k: usize, pair: MethodPair) -> Option<f64> {
        self.jaccard
            .iter()
            .find(|row| row.k == k)?
            .pairs
            .iter()
            .find(|p| p.pair == pair)
            .map(|p| p.score)
    }
}

/// Load and rank the dataset at `path`.
///
/// # Errors
///
/// Fails if the file cannot be loaded or a ranking cannot be built; the
/// error carries the dataset path as context.
#[instrument(skip(path, config), fields(path = %path.display()))]
pub fn rank_dataset(path: &Path, config: &RunConfig) -> Result<DatasetReport> {
    let list = timed("load", || load_path(path))
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;

    let mut report = rank_edges(&dataset_name(path), list, config)
        .with_context(|| format!("Failed to rank dataset {}", path.display()))?;
    report.path = path.to_path_buf();
    Ok(report)
}

/// Rank an edge list that is already in memory.
///
/// # Errors
///
/// [`RankError::MalformedEdgeList`], [`RankError::AllocationFailure`] or
/// [`RankError::DegenerateVector`].
#[allow(clippy::cast_precision_loss)]
pub fn rank_edges(name: &str, list: EdgeList, config: &RunConfig) -> Result<DatasetReport, RankError> {
    let stats = timed("stats", || GraphStats::from_edges(&list))?;
    info!(
        dataset = name,
        nodes = stats.node_count,
        edges = stats.edge_count,
        "ranking dataset"
    );

    let mut session = HitsSession::new(list)?;
    let indegree = timed("indegree", || in_degree_scores(session.adjacency()))?;
    let pr_config = PageRankConfig::from(config.pagerank);
    let pr = timed("pagerank", || pagerank(session.adjacency(), &pr_config))?;
    let outcome = session.run()?;

    let ks = &config.top_k;
    let mut rankings = MethodRankings::new();
    let mut rejected = Vec::new();
    let scored: [(Method, &ScoreVector); 4] = [
        (Method::InDegree, &indegree),
        (Method::PageRank, &pr.scores),
        (Method::HitsAuthority, &outcome.authority),
        (Method::HitsHub, &outcome.hub),
    ];
    timed("top-k", || {
        for (method, scores) in scored {
            let mut set = top_k_all(scores, ks);
            for (k, err) in std::mem::take(&mut set.rejected) {
                warn!(dataset = name, method = method.slug(), k, "{err}");
                rejected.push(RejectedK {
                    method,
                    k,
                    message: err.to_string(),
                });
            }
            rankings.insert(method, set);
        }
    });

    let table = timed("jaccard", || compare(&rankings, ks));

    Ok(DatasetReport {
        name: name.to_string(),
        path: PathBuf::new(),
        stats,
        hits: HitsSummary {
            steps: outcome.steps,
            elapsed_ms: outcome.elapsed.as_secs_f64() * 1000.0,
        },
        pagerank: PageRankSummary {
            iterations: pr.iterations,
            converged: pr.converged,
        },
        rankings: rankings
            .iter()
            .map(|(method, set)| (method, set.ranked.clone()))
            .collect(),
        jaccard: jaccard_rows(table),
        rejected,
    })
}

fn jaccard_rows(table: JaccardTable) -> Vec<JaccardRow> {
    table
        .into_iter()
        .map(|(k, pairs)| JaccardRow {
            k,
            pairs: pairs
                .into_iter()
                .map(|(pair, score)| PairScore { pair, score })
                .collect(),
        })
        .collect()
}
