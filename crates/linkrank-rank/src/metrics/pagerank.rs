//! PageRank over the transpose adjacency.
//!
//! # Algorithm
//!
//! Power iteration:
//!
//! ```text
//! PR(v) = (1 - d) / N + d * (D / N + Σ PR(u) / out_degree(u))   for each u → v
//! ```
//!
//! where `d` is the damping factor and `D` the total rank held by dangling
//! nodes (no outgoing edges), which is spread evenly over all nodes.
//! Iteration stops when the L1 norm of the rank delta drops below the
//! tolerance, or after `max_iter` iterations.
//!
//! Each node pulls rank from its transpose row. Parallel edges count once
//! per occurrence, so a node linking twice to the same target passes it
//! twice the share.

use linkrank_core::RankError;
use linkrank_core::config::PageRankSettings;
use linkrank_core::error::filled;
use tracing::{debug, instrument, warn};

use crate::scores::{ScoreVector, l1_distance};
use crate::sparse::adjacency::Adjacency;

/// Configuration for PageRank computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankConfig {
    /// Probability of following a link rather than teleporting.
    /// Default: 0.85.
    pub damping: f64,
    /// Stop when the L1 norm of the rank delta falls below this.
    /// Default: 1e-6.
    pub tolerance: f64,
    /// Default: 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

impl From<PageRankSettings> for PageRankConfig {
    fn from(settings: PageRankSettings) -> Self {
        Self {
            damping: settings.damping,
            tolerance: settings.tolerance,
            max_iter: settings.max_iter,
        }
    }
}

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    pub scores: ScoreVector,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the delta fell below the tolerance within `max_iter`.
    pub converged: bool,
}

/// Compute PageRank for every node index of `adjacency`.
///
/// # Errors
///
/// [`RankError::AllocationFailure`] if the per-node rank or degree buffers
/// cannot be reserved.
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(adjacency, config), fields(nodes = adjacency.node_count()))]
pub fn pagerank(
    adjacency: &Adjacency,
    config: &PageRankConfig,
) -> Result<PageRankResult, RankError> {
    let n = adjacency.node_count();
    let min_node_id = adjacency.min_node_id();

    if n == 0 {
        return Ok(PageRankResult {
            scores: ScoreVector::new(min_node_id, Vec::new()),
            iterations: 0,
            converged: true,
        });
    }

    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;
    let transpose = adjacency.transpose();

    let mut out_degree = filled(n, 0_usize, "pagerank out-degrees")?;
    for (node, targets) in adjacency.forward().iter_rows() {
        out_degree[node as usize] = targets.len();
    }

    let mut ranks = filled(n, 1.0 / n_f64, "pagerank scores")?;
    let mut new_ranks = filled(n, 0.0_f64, "pagerank scores")?;

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        let dangling: f64 = ranks
            .iter()
            .zip(&out_degree)
            .filter(|&(_, &d)| d == 0)
            .map(|(r, _)| r)
            .sum();
        new_ranks.fill(base + config.damping * dangling / n_f64);

        for (node, sources) in transpose.iter_rows() {
            let pulled: f64 = sources
                .iter()
                .map(|&u| ranks[u as usize] / out_degree[u as usize] as f64)
                .sum();
            new_ranks[node as usize] += config.damping * pulled;
        }

        let delta = l1_distance(&ranks, &new_ranks);
        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, "pagerank converged");
    } else {
        warn!(iterations, "pagerank stopped at max_iter without converging");
    }

    Ok(PageRankResult {
        scores: ScoreVector::new(min_node_id, ranks),
        iterations,
        converged,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
