//! HITS on graphs with known answers.
//!
//! Each scenario builds the full session (adjacency, co-relations, score
//! buffers) from an explicit edge list and checks matrix shape as well as
//! the converged scores.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use linkrank_core::{EdgeList, NodeId, RankError, Vector};
use linkrank_rank::metrics::hits::{CONVERGENCE_THRESHOLD, HitsSession, IterState};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const EPSILON: f64 = 1e-9;

fn session(pairs: &[(NodeId, NodeId)]) -> HitsSession {
    HitsSession::new(EdgeList::from_pairs(pairs.iter().copied())).expect("valid graph")
}

/// `i → i + 1` and `i → i + 2` (mod n): every node has in- and out-degree 2.
fn circulant(n: NodeId) -> Vec<(NodeId, NodeId)> {
    (0..n)
        .flat_map(|i| [(i, (i + 1) % n), (i, (i + 2) % n)])
        .collect()
}

fn assert_uniform(values: &[f64]) {
    #[allow(clippy::cast_precision_loss)]
    let expected = 1.0 / values.len() as f64;
    for (i, v) in values.iter().enumerate() {
        assert!(
            (v - expected).abs() < EPSILON,
            "slot {i}: {v} != {expected}"
        );
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn four_cycle_matrices_and_scores() {
    let mut s = session(&[(0, 1), (1, 2), (2, 3), (3, 0)]);

    let forward = s.adjacency().forward();
    assert_eq!(forward.rows(), 4);
    assert!(forward.iter_rows().all(|(_, row)| row.len() == 1));

    for m in [s.co_citation(), s.co_reference()] {
        assert_eq!(m.rows(), 4);
        assert_eq!(m.nnz(), 4);
        for node in 0..4 {
            assert_eq!(m.get(node, node), 1);
        }
    }

    let out = s.run().expect("converges");
    assert_uniform(out.authority.as_slice());
    assert_uniform(out.hub.as_slice());
}

#[test]
fn uniform_degree_graph_converges_to_uniform() {
    let mut s = session(&circulant(7));
    let out = s.run().expect("converges");
    assert_uniform(out.authority.as_slice());
    assert_uniform(out.hub.as_slice());
    assert_eq!(out.steps, 2);
}

#[test]
fn complete_graph_is_uniform() {
    let pairs: Vec<(NodeId, NodeId)> = (0..5)
        .flat_map(|i| (0..5).filter(move |&j| j != i).map(move |j| (i, j)))
        .collect();
    let mut s = session(&pairs);
    let out = s.run().expect("converges");
    assert_uniform(out.authority.as_slice());
    assert_uniform(out.hub.as_slice());
}

#[test]
fn bipartite_hubs_and_authorities_separate() {
    // Hubs 0..=3 all cite 10 and 11; only 0 and 1 also cite 12.
    let mut pairs = Vec::new();
    for h in 0..4 {
        pairs.push((h, 10));
        pairs.push((h, 11));
    }
    pairs.push((0, 12));
    pairs.push((1, 12));
    let mut s = session(&pairs);
    let out = s.run().expect("converges");

    for hub in 0..4 {
        assert_eq!(out.authority.get(hub), Some(0.0));
    }
    for authority in 10..13 {
        assert_eq!(out.hub.get(authority), Some(0.0));
    }
    // Unused ids in between score nothing.
    assert_eq!(out.authority.get(7), Some(0.0));

    // 10 and 11 tie exactly; the lower id wins.
    let top_authority = out.top_k(Vector::Authority, 3).expect("k = 3");
    let ids: Vec<NodeId> = top_authority.iter().map(|r| r.node).collect();
    assert_eq!(ids, vec![10, 11, 12]);
    let top_hub = out.top_k(Vector::Hub, 2).expect("k = 2");
    let ids: Vec<NodeId> = top_hub.iter().map(|r| r.node).collect();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn single_self_loop() {
    let mut s = session(&[(4, 4)]);
    let out = s.run().expect("converges");
    assert_eq!(out.authority.as_slice(), &[1.0]);
    assert_eq!(out.hub.as_slice(), &[1.0]);
    assert_eq!(out.authority.min_node_id(), 4);
}

#[test]
fn top_k_over_node_count_is_invalid() {
    let mut s = session(&[(0, 1), (1, 0)]);
    let out = s.run().expect("converges");
    assert!(matches!(
        out.top_k(Vector::Hub, 3),
        Err(RankError::InvalidK { k: 3, available: 2 })
    ));
    assert_eq!(out.top_k(Vector::Hub, 2).expect("k = n").len(), 2);
}

#[test]
fn random_graphs_end_with_both_vectors_settled() {
    for seed in 0..20_u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let n: NodeId = rng.gen_range(3..40);
        let edges = rng.gen_range(1..120);
        let pairs: Vec<(NodeId, NodeId)> = (0..edges)
            .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
            .collect();

        let mut s = session(&pairs);
        s.run().expect("non-empty graphs converge");
        assert_eq!(s.state(), IterState::Converged);
        let (a, h) = s.last_distances().expect("at least one step");
        assert!(a <= CONVERGENCE_THRESHOLD, "seed {seed}: authority {a}");
        assert!(h <= CONVERGENCE_THRESHOLD, "seed {seed}: hub {h}");
    }
}

#[test]
fn caller_can_bound_steps() {
    let mut s = session(&[(0, 1), (0, 2), (1, 2), (2, 0), (3, 1)]);
    let mut taken = 0;
    while taken < 3 && s.step().expect("step") == IterState::Running {
        taken += 1;
    }
    assert!(s.steps() <= 3);
    assert!((s.authority().sum() - 1.0).abs() < EPSILON);
}
