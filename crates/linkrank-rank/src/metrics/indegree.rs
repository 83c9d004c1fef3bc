//! In-degree baseline: a node's score is its number of incoming edges,
//! duplicates included.

use linkrank_core::RankError;
use linkrank_core::error::filled;

use crate::scores::ScoreVector;
use crate::sparse::adjacency::Adjacency;

/// In-degree of every node index, as `f64` so it ranks like any other
/// score vector.
///
/// # Errors
///
/// [`RankError::AllocationFailure`] if the score vector cannot be reserved.
#[allow(clippy::cast_precision_loss)]
pub fn in_degree_scores(adjacency: &Adjacency) -> Result<ScoreVector, RankError> {
    let mut scores = filled(adjacency.node_count(), 0.0, "in-degree scores")?;
    for (node, sources) in adjacency.transpose().iter_rows() {
        scores[node as usize] = sources.len() as f64;
    }
    Ok(ScoreVector::new(adjacency.min_node_id(), scores))
}
