//! Forward adjacency and transpose construction.
//!
//! [`Adjacency::build`] takes the edge list by value: the buffer is sorted
//! in place twice (by source, then by destination) and dropped once both
//! matrices exist, so no caller ever observes the reordered edges.
//!
//! Both sorts are stable. Within a forward row, destinations keep input
//! order; within a transpose row, sources appear in the order the
//! by-source pass left them (ascending source, then input order).

use linkrank_core::{Edge, EdgeList, NodeId, RankError};
use tracing::{debug, instrument};

use super::{CompactRows, reserve};

/// The forward adjacency `L` (source → destinations) and its transpose
/// `Lᵀ` (destination → sources), both over node indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    forward: CompactRows,
    transpose: CompactRows,
    node_count: usize,
    min_node_id: NodeId,
}

impl Adjacency {
    /// Build both matrices from an edge list.
    ///
    /// An empty edge list produces two matrices with zero rows.
    ///
    /// # Errors
    ///
    /// - [`RankError::MalformedEdgeList`] if the list breaks the loader
    ///   contract (see [`EdgeList::validate`]).
    /// - [`RankError::AllocationFailure`] if a values buffer of
    ///   `edge_count` entries cannot be reserved.
    #[instrument(skip(list), fields(nodes = list.node_count, edges = list.edge_count))]
    pub fn build(list: EdgeList) -> Result<Self, RankError> {
        list.validate()?;

        let EdgeList {
            mut edges,
            node_count,
            min_node_id,
            ..
        } = list;

        edges.sort_by_key(|e| e.source);
        let forward = compact(
            &edges,
            |e| (e.source - min_node_id, e.destination - min_node_id),
            "forward adjacency",
        )?;

        edges.sort_by_key(|e| e.destination);
        let transpose = compact(
            &edges,
            |e| (e.destination - min_node_id, e.source - min_node_id),
            "transpose adjacency",
        )?;

        debug!(
            forward_rows = forward.rows(),
            transpose_rows = transpose.rows(),
            "adjacency built"
        );

        Ok(Self {
            forward,
            transpose,
            node_count,
            min_node_id,
        })
    }

    /// `L`: one row per node with outgoing edges.
    #[must_use]
    pub const fn forward(&self) -> &CompactRows {
        &self.forward
    }

    /// `Lᵀ`: one row per node with incoming edges.
    #[must_use]
    pub const fn transpose(&self) -> &CompactRows {
        &self.transpose
    }

    /// Width of the node index space.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    #[must_use]
    pub const fn min_node_id(&self) -> NodeId {
        self.min_node_id
    }

    /// Number of edges, duplicates included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.forward.nnz()
    }

    /// Outgoing edge count of node index `node`.
    #[must_use]
    pub fn out_degree(&self, node: u32) -> usize {
        self.forward.row_of(node).len()
    }

    /// Incoming edge count of node index `node`.
    #[must_use]
    pub fn in_degree(&self, node: u32) -> usize {
        self.transpose.row_of(node).len()
    }
}

/// Compact a sorted edge buffer into rows keyed by `key(edge).0`.
fn compact(
    edges: &[Edge],
    key: impl Fn(&Edge) -> (u32, u32),
    what: &'static str,
) -> Result<CompactRows, RankError> {
    let mut values = Vec::new();
    reserve(&mut values, edges.len(), what)?;

    let mut row_offsets = vec![0];
    let mut row_ids = Vec::new();

    for (i, edge) in edges.iter().enumerate() {
        let (row, column) = key(edge);
        if row_ids.last() != Some(&row) {
            if i > 0 {
                row_offsets.push(i);
            }
            row_ids.push(row);
        }
        values.push(column);
    }
    if !edges.is_empty() {
        row_offsets.push(edges.len());
    }

    Ok(CompactRows {
        values,
        row_offsets,
        row_ids,
    })
}
