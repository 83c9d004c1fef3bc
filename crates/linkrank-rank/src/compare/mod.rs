//! Pairwise comparison of ranking methods.
//!
//! For each k, the top-k node sets of every method pair are compared with
//! [`jaccard`]. Pairs are always reported in [`PAIRS`] order.

mod jaccard;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::topk::TopKSet;

pub use jaccard::jaccard;

/// A ranking method whose top-k lists take part in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    #[serde(rename = "indegree")]
    InDegree,
    #[serde(rename = "pagerank")]
    PageRank,
    HitsAuthority,
    HitsHub,
}

impl Method {
    pub const ALL: [Self; 4] = [
        Self::InDegree,
        Self::PageRank,
        Self::HitsAuthority,
        Self::HitsHub,
    ];

    /// Human-readable label used in comparison headers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InDegree => "InDegree",
            Self::PageRank => "PageRank",
            Self::HitsAuthority => "HITS (authority)",
            Self::HitsHub => "HITS (hub)",
        }
    }

    /// Machine-friendly name used in CSV and JSON output.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::InDegree => "indegree",
            Self::PageRank => "pagerank",
            Self::HitsAuthority => "hits_authority",
            Self::HitsHub => "hits_hub",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An ordered pair of methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodPair {
    pub left: Method,
    pub right: Method,
}

impl MethodPair {
    #[must_use]
    pub const fn new(left: Method, right: Method) -> Self {
        Self { left, right }
    }

    /// `"<left> VS <right>"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} VS {}", self.left.label(), self.right.label())
    }
}

impl fmt::Display for MethodPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} VS {}", self.left.label(), self.right.label())
    }
}

impl Serialize for MethodPair {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Every compared pair, in report order.
pub const PAIRS: [MethodPair; 6] = [
    MethodPair::new(Method::InDegree, Method::HitsAuthority),
    MethodPair::new(Method::InDegree, Method::HitsHub),
    MethodPair::new(Method::InDegree, Method::PageRank),
    MethodPair::new(Method::PageRank, Method::HitsAuthority),
    MethodPair::new(Method::PageRank, Method::HitsHub),
    MethodPair::new(Method::HitsAuthority, Method::HitsHub),
];

/// Top-k lists of each method.
#[derive(Debug, Default)]
pub struct MethodRankings {
    lists: BTreeMap<Method, TopKSet>,
}

impl MethodRankings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, method: Method, set: TopKSet) {
        self.lists.insert(method, set);
    }

    #[must_use]
    pub fn get(&self, method: Method) -> Option<&TopKSet> {
        self.lists.get(&method)
    }

    /// `(method, lists)` in [`Method::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Method, &TopKSet)> + '_ {
        self.lists.iter().map(|(&m, set)| (m, set))
    }
}

/// Jaccard scores per k, each row in [`PAIRS`] order.
pub type JaccardTable = BTreeMap<usize, Vec<(MethodPair, f64)>>;

/// Compare every method pair at every k.
///
/// A pair is left out at a k where either method has no list (the method
/// is missing or rejected that k); a k with no comparable pair is left
/// out entirely.
#[must_use]
pub fn compare(rankings: &MethodRankings, ks: &[usize]) -> JaccardTable {
    let mut table = JaccardTable::new();
    for &k in ks {
        let row: Vec<(MethodPair, f64)> = PAIRS
            .iter()
            .filter_map(|&pair| {
                let left = rankings.get(pair.left)?.nodes(k)?;
                let right = rankings.get(pair.right)?.nodes(k)?;
                Some((pair, jaccard(&left, &right)))
            })
            .collect();
        if !row.is_empty() {
            table.insert(k, row);
        }
    }
    table
}
