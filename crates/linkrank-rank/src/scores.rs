//! Dense score vectors over the node index space.

use linkrank_core::NodeId;

/// One score per node index in `[0, node_count)`, isolated nodes included.
///
/// Scores are addressed by node index internally; [`ScoreVector::iter`]
/// and [`ScoreVector::get`] speak raw node ids (`index + min_node_id`).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVector {
    min_node_id: NodeId,
    values: Vec<f64>,
}

impl ScoreVector {
    #[must_use]
    pub const fn new(min_node_id: NodeId, values: Vec<f64>) -> Self {
        Self {
            min_node_id,
            values,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub const fn min_node_id(&self) -> NodeId {
        self.min_node_id
    }

    /// Score of a raw node id, `None` outside the index space.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<f64> {
        let idx = node.checked_sub(self.min_node_id)? as usize;
        self.values.get(idx).copied()
    }

    /// Scores by node index.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// `(raw node id, score)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let base = self.min_node_id;
        (0u32..).zip(&self.values).map(move |(i, &s)| (base + i, s))
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// L1 distance to another vector of the same length.
    #[must_use]
    pub fn l1_distance(&self, other: &[f64]) -> f64 {
        l1_distance(&self.values, other)
    }
}

/// Sum of absolute differences between two equally long slices.
#[must_use]
pub fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}
