//! Top-k extraction.
//!
//! Nodes are ordered by score descending under [`f64::total_cmp`], ties
//! broken by ascending raw node id. The order is total, so the top-k list
//! for a smaller k is always a prefix of the list for a larger k.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use linkrank_core::{NodeId, RankError};
use serde::Serialize;

use crate::scores::ScoreVector;

/// One entry of a ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ranked {
    pub node: NodeId,
    pub score: f64,
}

/// Top-k lists for several k values over one score vector.
#[derive(Debug, Default)]
pub struct TopKSet {
    /// Accepted k values and their lists.
    pub ranked: BTreeMap<usize, Vec<Ranked>>,
    /// k values larger than the vector, with the error each produced.
    pub rejected: Vec<(usize, RankError)>,
}

impl TopKSet {
    /// Node ids of the list for `k`, if `k` was accepted.
    #[must_use]
    pub fn nodes(&self, k: usize) -> Option<Vec<NodeId>> {
        self.ranked
            .get(&k)
            .map(|list| list.iter().map(|r| r.node).collect())
    }
}

fn ranking_order(a: &Ranked, b: &Ranked) -> Ordering {
    b.score.total_cmp(&a.score).then(a.node.cmp(&b.node))
}

/// The best `k` entries in ranking order.
fn ordered_prefix(scores: &ScoreVector, k: usize) -> Vec<Ranked> {
    let mut all: Vec<Ranked> = scores
        .iter()
        .map(|(node, score)| Ranked { node, score })
        .collect();
    if k < all.len() {
        all.select_nth_unstable_by(k, ranking_order);
        all.truncate(k);
    }
    all.sort_unstable_by(ranking_order);
    all
}

fn check_k(scores: &ScoreVector, k: usize) -> Result<(), RankError> {
    if k > scores.len() {
        return Err(RankError::InvalidK {
            k,
            available: scores.len(),
        });
    }
    Ok(())
}

/// The `k` highest-scoring nodes, best first.
///
/// `k == 0` yields an empty list.
///
/// # Errors
///
/// Returns [`RankError::InvalidK`] if `k` exceeds the number of scored
/// nodes.
pub fn top_k(scores: &ScoreVector, k: usize) -> Result<Vec<Ranked>, RankError> {
    check_k(scores, k)?;
    Ok(ordered_prefix(scores, k))
}

/// Top-k lists for every value in `ks`, sharing one selection pass.
///
/// Invalid k values are collected in [`TopKSet::rejected`] rather than
/// aborting the others.
#[must_use]
pub fn top_k_all(scores: &ScoreVector, ks: &[usize]) -> TopKSet {
    let mut set = TopKSet::default();
    let mut accepted = Vec::new();
    for &k in ks {
        match check_k(scores, k) {
            Ok(()) => accepted.push(k),
            Err(err) => set.rejected.push((k, err)),
        }
    }

    let Some(&widest) = accepted.iter().max() else {
        return set;
    };
    let prefix = ordered_prefix(scores, widest);
    for k in accepted {
        set.ranked.insert(k, prefix[..k].to_vec());
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[f64]) -> ScoreVector {
        ScoreVector::new(10, values.to_vec())
    }

    #[test]
    fn highest_scores_first() {
        let s = scores(&[0.1, 0.4, 0.2, 0.3]);
        let top = top_k(&s, 2).expect("k fits");
        assert_eq!(top[0], Ranked { node: 11, score: 0.4 });
        assert_eq!(top[1], Ranked { node: 13, score: 0.3 });
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let s = scores(&[0.5, 0.25, 0.5, 0.25]);
        let nodes: Vec<NodeId> = top_k(&s, 4)
            .expect("k fits")
            .iter()
            .map(|r| r.node)
            .collect();
        assert_eq!(nodes, vec![10, 12, 11, 13]);
    }

    #[test]
    fn zero_and_full_k() {
        let s = scores(&[0.1, 0.2]);
        assert!(top_k(&s, 0).expect("k = 0").is_empty());
        assert_eq!(top_k(&s, 2).expect("k = n").len(), 2);
    }

    #[test]
    fn k_beyond_node_count_is_invalid() {
        let s = scores(&[0.1, 0.2]);
        assert!(matches!(
            top_k(&s, 3),
            Err(RankError::InvalidK { k: 3, available: 2 })
        ));
    }

    #[test]
    fn smaller_k_is_prefix() {
        let s = scores(&[0.3, 0.1, 0.3, 0.05, 0.2, 0.05]);
        let full = top_k(&s, 6).expect("k = n");
        for k in 0..=6 {
            assert_eq!(top_k(&s, k).expect("k fits"), full[..k]);
        }
    }

    #[test]
    fn batch_keeps_valid_and_reports_invalid() {
        let s = scores(&[0.3, 0.1, 0.6]);
        let set = top_k_all(&s, &[1, 5, 3]);
        assert_eq!(set.nodes(1), Some(vec![12]));
        assert_eq!(set.nodes(3), Some(vec![12, 10, 11]));
        assert_eq!(set.rejected.len(), 1);
        assert_eq!(set.rejected[0].0, 5);
    }
}
