//! HITS (Hyperlink-Induced Topic Search).
//!
//! # Overview
//!
//! HITS assigns two scores to each node:
//!
//! - **Authority**: value as a link target; high when good hubs point here.
//! - **Hub**: value as a link source; high when it points at good
//!   authorities.
//!
//! # Algorithm
//!
//! Rather than alternating `a = Lᵀh`, `h = La`, each vector is iterated
//! on its own symmetric operator:
//!
//! 1. Initialize authority and hub to 1.0 for every node.
//! 2. `a' = (Lᵀ·L) a` using the co-reference matrix.
//! 3. `h' = (L·Lᵀ) h` using the co-citation matrix.
//! 4. Normalize each vector to sum to 1. A zero sum means no score can
//!    propagate and is reported as [`RankError::DegenerateVector`].
//! 5. A vector is settled when the L1 distance to its previous iterate is
//!    at most [`CONVERGENCE_THRESHOLD`]. The session converges only when
//!    **both** vectors settle in the same step (see [`is_converged`]).
//!
//! Nodes without a row in a co-relation matrix (no incoming edges for
//! authority, no outgoing edges for hub) score 0 after the first step.
//!
//! # State
//!
//! A [`HitsSession`] is `Running` until convergence, then `Converged`
//! (terminal). Scores change only at step boundaries, so a caller wanting
//! a time or step bound can drive [`HitsSession::step`] itself and stop
//! whenever it likes.

use std::time::{Duration, Instant};

use linkrank_core::error::filled;
use linkrank_core::timing::timed;
use linkrank_core::{EdgeList, RankError, Vector};
use tracing::{debug, info, instrument, trace};

use crate::scores::{ScoreVector, l1_distance};
use crate::sparse::adjacency::Adjacency;
use crate::sparse::corelation::{CoRelation, co_citation, co_reference};
use crate::topk::{Ranked, TopKSet, top_k, top_k_all};

/// L1 distance at or below which a vector counts as settled.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-6;

/// Iterator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterState {
    Running,
    Converged,
}

/// Whether a step with these distances ends the iteration.
///
/// Both vectors must be settled. Stopping as soon as either one settles
/// would leave the other short of its fixed point.
#[must_use]
pub fn is_converged(authority_distance: f64, hub_distance: f64) -> bool {
    authority_distance <= CONVERGENCE_THRESHOLD && hub_distance <= CONVERGENCE_THRESHOLD
}

/// Matrices and score state for one graph.
///
/// The adjacency and co-relation matrices are built in [`HitsSession::new`]
/// and never modified afterwards.
#[derive(Debug)]
pub struct HitsSession {
    adjacency: Adjacency,
    co_citation: CoRelation,
    co_reference: CoRelation,
    authority: Vec<f64>,
    hub: Vec<f64>,
    // Second buffer pair; swapped with the live pair at the end of a step.
    next_authority: Vec<f64>,
    next_hub: Vec<f64>,
    state: IterState,
    steps: usize,
    last_distances: Option<(f64, f64)>,
}

/// Final scores of a converged session.
#[derive(Debug, Clone)]
pub struct HitsOutcome {
    pub authority: ScoreVector,
    pub hub: ScoreVector,
    /// Steps taken, counting the converging step.
    pub steps: usize,
    /// Wall-clock time of the iteration loop.
    pub elapsed: Duration,
}

impl HitsOutcome {
    #[must_use]
    pub const fn vector(&self, which: Vector) -> &ScoreVector {
        match which {
            Vector::Authority => &self.authority,
            Vector::Hub => &self.hub,
        }
    }

    /// The `k` best nodes of one vector, highest score first.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InvalidK`] if `k` exceeds the node count.
    pub fn top_k(&self, which: Vector, k: usize) -> Result<Vec<Ranked>, RankError> {
        top_k(self.vector(which), k)
    }

    /// Top-k lists of one vector for several k values.
    #[must_use]
    pub fn top_k_all(&self, which: Vector, ks: &[usize]) -> TopKSet {
        top_k_all(self.vector(which), ks)
    }
}

impl HitsSession {
    /// Build the adjacency and co-relation matrices for `list` and
    /// initialize both score vectors to 1.0.
    ///
    /// # Errors
    ///
    /// [`RankError::MalformedEdgeList`] or [`RankError::AllocationFailure`]
    /// from matrix construction.
    pub fn new(list: EdgeList) -> Result<Self, RankError> {
        let adjacency = timed("adjacency", || Adjacency::build(list))?;
        Self::from_adjacency(adjacency)
    }

    /// Like [`HitsSession::new`] for an adjacency that is already built.
    ///
    /// # Errors
    ///
    /// [`RankError::AllocationFailure`] from co-relation construction or
    /// score buffer allocation.
    #[instrument(skip(adjacency), fields(nodes = adjacency.node_count()))]
    pub fn from_adjacency(adjacency: Adjacency) -> Result<Self, RankError> {
        let co_citation = timed("co-citation", || co_citation(&adjacency))?;
        let co_reference = timed("co-reference", || co_reference(&adjacency))?;

        let n = adjacency.node_count();
        let authority = score_buffer(n, 1.0)?;
        let hub = score_buffer(n, 1.0)?;
        let next_authority = score_buffer(n, 0.0)?;
        let next_hub = score_buffer(n, 0.0)?;

        debug!(
            co_citation_nnz = co_citation.nnz(),
            co_reference_nnz = co_reference.nnz(),
            "hits session ready"
        );

        Ok(Self {
            adjacency,
            co_citation,
            co_reference,
            authority,
            hub,
            next_authority,
            next_hub,
            state: IterState::Running,
            steps: 0,
            last_distances: None,
        })
    }

    /// Advance one step. A converged session stays converged and its
    /// scores are not touched.
    ///
    /// # Errors
    ///
    /// [`RankError::DegenerateVector`] if a fresh vector sums to zero. The
    /// session's scores and step count are left as they were before the
    /// failed step.
    pub fn step(&mut self) -> Result<IterState, RankError> {
        if self.state == IterState::Converged {
            return Ok(IterState::Converged);
        }

        self.next_authority.fill(0.0);
        self.co_reference
            .multiply_into(&self.authority, &mut self.next_authority);

        self.next_hub.fill(0.0);
        self.co_citation.multiply_into(&self.hub, &mut self.next_hub);

        normalize(&mut self.next_authority, Vector::Authority)?;
        normalize(&mut self.next_hub, Vector::Hub)?;

        let authority_distance = l1_distance(&self.authority, &self.next_authority);
        let hub_distance = l1_distance(&self.hub, &self.next_hub);

        std::mem::swap(&mut self.authority, &mut self.next_authority);
        std::mem::swap(&mut self.hub, &mut self.next_hub);
        self.steps += 1;
        self.last_distances = Some((authority_distance, hub_distance));

        trace!(
            step = self.steps,
            authority_distance, hub_distance, "hits step"
        );

        if is_converged(authority_distance, hub_distance) {
            self.state = IterState::Converged;
        }
        Ok(self.state)
    }

    /// Step until convergence and return the final scores.
    ///
    /// # Errors
    ///
    /// [`RankError::DegenerateVector`] as for [`HitsSession::step`].
    #[instrument(skip(self), fields(nodes = self.adjacency.node_count()))]
    pub fn run(&mut self) -> Result<HitsOutcome, RankError> {
        let started = Instant::now();
        timed("hits", || {
            while self.step()? == IterState::Running {}
            Ok::<(), RankError>(())
        })?;
        let elapsed = started.elapsed();

        info!(steps = self.steps, elapsed_ms = elapsed.as_millis(), "hits converged");

        Ok(HitsOutcome {
            authority: self.authority(),
            hub: self.hub(),
            steps: self.steps,
            elapsed,
        })
    }

    #[must_use]
    pub const fn state(&self) -> IterState {
        self.state
    }

    /// Completed steps.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// `(authority, hub)` L1 distances of the last completed step.
    #[must_use]
    pub const fn last_distances(&self) -> Option<(f64, f64)> {
        self.last_distances
    }

    /// Current authority scores.
    #[must_use]
    pub fn authority(&self) -> ScoreVector {
        ScoreVector::new(self.adjacency.min_node_id(), self.authority.clone())
    }

    /// Current hub scores.
    #[must_use]
    pub fn hub(&self) -> ScoreVector {
        ScoreVector::new(self.adjacency.min_node_id(), self.hub.clone())
    }

    #[must_use]
    pub const fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    #[must_use]
    pub const fn co_citation(&self) -> &CoRelation {
        &self.co_citation
    }

    #[must_use]
    pub const fn co_reference(&self) -> &CoRelation {
        &self.co_reference
    }
}

fn score_buffer(n: usize, value: f64) -> Result<Vec<f64>, RankError> {
    filled(n, value, "score vector")
}

/// Divide every entry by the vector's sum.
fn normalize(v: &mut [f64], vector: Vector) -> Result<(), RankError> {
    let sum: f64 = v.iter().sum();
    if sum == 0.0 {
        return Err(RankError::DegenerateVector { vector });
    }
    for x in v.iter_mut() {
        *x /= sum;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
