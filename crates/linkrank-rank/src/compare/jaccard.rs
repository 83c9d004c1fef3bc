//! Jaccard similarity of node-id lists.

use linkrank_core::NodeId;

/// `|A ∩ B| / |A ∪ B|` of two top-k lists, treated as sets.
///
/// Both inputs are copied and sorted, then intersected with a linear
/// merge; duplicates within one list count once. Two empty lists are
/// identical and score 1.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn jaccard(a: &[NodeId], b: &[NodeId]) -> f64 {
    let a = sorted_unique(a);
    let b = sorted_unique(b);
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let common = intersection_size(&a, &b);
    let union = a.len() + b.len() - common;
    common as f64 / union as f64
}

fn sorted_unique(list: &[NodeId]) -> Vec<NodeId> {
    let mut v = list.to_vec();
    v.sort_unstable();
    v.dedup();
    v
}

/// Size of the intersection of two sorted, deduplicated slices.
fn intersection_size(a: &[NodeId], b: &[NodeId]) -> usize {
    let (mut i, mut j, mut common) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                common += 1;
                i += 1;
                j += 1;
            }
        }
    }
    common
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_lists_score_one() {
        assert!((jaccard(&[3, 1, 2], &[1, 2, 3]) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disjoint_lists_score_zero() {
        assert!(jaccard(&[1, 2], &[3, 4]).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_overlap() {
        // {1,2,3} ∩ {2,3,4} = {2,3}; union has 4.
        assert!((jaccard(&[1, 2, 3], &[4, 3, 2]) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_lists() {
        assert!((jaccard(&[], &[]) - 1.0).abs() < f64::EPSILON);
        assert!(jaccard(&[], &[1]).abs() < f64::EPSILON);
    }

    #[test]
    fn symmetric() {
        let a = [9, 4, 7, 1];
        let b = [4, 2, 9];
        assert!((jaccard(&a, &b) - jaccard(&b, &a)).abs() < f64::EPSILON);
    }
}
