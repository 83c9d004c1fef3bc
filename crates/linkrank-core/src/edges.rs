//! Raw edge lists and their summary statistics.
//!
//! An [`EdgeList`] is what the loader hands to the ranking engine: ordered
//! `(source, destination)` pairs of raw node identifiers plus the counts
//! and id range observed while reading them.
//!
//! ## Node index space
//!
//! Identifiers need not be contiguous. The engine addresses nodes by
//! *node index* `id - min_node_id`, so `node_count` is the width of the
//! observed id range, not the number of distinct ids. Ids that never
//! appear in an edge occupy a slot and behave as isolated nodes.

use serde::Serialize;

use crate::error::{RankError, filled};

/// Raw node identifier as written in a dataset.
pub type NodeId = u32;

/// A directed edge `source → destination`.
///
/// Duplicates are meaningful: every copy counts towards degrees and
/// co-relation weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub destination: NodeId,
}

impl Edge {
    #[must_use]
    pub const fn new(source: NodeId, destination: NodeId) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((source, destination): (NodeId, NodeId)) -> Self {
        Self::new(source, destination)
    }
}

/// Edge list plus the statistics the loader reports alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    /// Edges in input order.
    pub edges: Vec<Edge>,
    /// Width of the node index space (`max_node_id - min_node_id + 1`).
    pub node_count: usize,
    /// Number of edges, duplicates included.
    pub edge_count: usize,
    /// Smallest identifier observed; node index 0.
    pub min_node_id: NodeId,
    /// Largest identifier observed.
    pub max_node_id: NodeId,
}

impl EdgeList {
    /// Build an edge list from raw pairs, deriving the id range and counts.
    ///
    /// An empty input yields `node_count == 0` with both id bounds at 0.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        let edges: Vec<Edge> = pairs.into_iter().map(Into::into).collect();

        let (min_node_id, max_node_id) = edges
            .iter()
            .flat_map(|e| [e.source, e.destination])
            .fold(None, |acc: Option<(NodeId, NodeId)>, id| match acc {
                None => Some((id, id)),
                Some((lo, hi)) => Some((lo.min(id), hi.max(id))),
            })
            .unwrap_or((0, 0));

        let node_count = if edges.is_empty() {
            0
        } else {
            (max_node_id - min_node_id) as usize + 1
        };

        Self {
            edge_count: edges.len(),
            edges,
            node_count,
            min_node_id,
            max_node_id,
        }
    }

    /// Check the loader contract.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::MalformedEdgeList`] if `edge_count` disagrees
    /// with the number of edges, or if any endpoint falls outside
    /// `[min_node_id, min_node_id + node_count)`.
    pub fn validate(&self) -> Result<(), RankError> {
        if self.edge_count != self.edges.len() {
            return Err(RankError::malformed(format!(
                "edge_count is {} but {} edges are present",
                self.edge_count,
                self.edges.len()
            )));
        }

        for (i, edge) in self.edges.iter().enumerate() {
            for id in [edge.source, edge.destination] {
                if self.index_of(id).is_none() {
                    return Err(RankError::malformed(format!(
                        "edge #{i} ({} -> {}) references id {id} outside [{}, {})",
                        edge.source,
                        edge.destination,
                        self.min_node_id,
                        u64::from(self.min_node_id) + self.node_count as u64,
                    )));
                }
            }
        }

        Ok(())
    }

    /// Node index of a raw identifier, if it lies in the index space.
    #[must_use]
    pub fn index_of(&self, id: NodeId) -> Option<u32> {
        let offset = id.checked_sub(self.min_node_id)?;
        ((offset as usize) < self.node_count).then_some(offset)
    }

    /// Whether the list holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics reported for a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Width of the node index space.
    pub node_count: usize,
    /// Number of edges, duplicates included.
    pub edge_count: usize,
    pub min_node_id: NodeId,
    pub max_node_id: NodeId,
    /// Slots in the index space with neither incoming nor outgoing edges.
    pub isolated_nodes: usize,
    /// Highest number of incoming edges on one node.
    pub max_in_degree: usize,
    /// Highest number of outgoing edges from one node.
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics for an edge list.
    ///
    /// Edges outside the index space are ignored; call
    /// [`EdgeList::validate`] first when that matters.
    ///
    /// # Errors
    ///
    /// [`RankError::AllocationFailure`] if the per-node degree counters
    /// cannot be reserved.
    pub fn from_edges(list: &EdgeList) -> Result<Self, RankError> {
        let mut in_degree = filled(list.node_count, 0usize, "in-degree counters")?;
        let mut out_degree = filled(list.node_count, 0usize, "out-degree counters")?;

        for edge in &list.edges {
            if let (Some(s), Some(d)) = (list.index_of(edge.source), list.index_of(edge.destination))
            {
                out_degree[s as usize] += 1;
                in_degree[d as usize] += 1;
            }
        }

        let isolated_nodes = in_degree
            .iter()
            .zip(&out_degree)
            .filter(|&(&i, &o)| i == 0 && o == 0)
            .count();

        Ok(Self {
            node_count: list.node_count,
            edge_count: list.edge_count,
            min_node_id: list.min_node_id,
            max_node_id: list.max_node_id,
            isolated_nodes,
            max_in_degree: in_degree.iter().copied().max().unwrap_or(0),
            max_out_degree: out_degree.iter().copied().max().unwrap_or(0),
        })
    }
}
