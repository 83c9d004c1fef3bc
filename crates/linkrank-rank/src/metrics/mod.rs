//! Ranking methods.
//!
//! # Overview
//!
//! Every method scores every slot of the node index space and returns a
//! [`crate::ScoreVector`], so results from different methods can be cut
//! into top-k lists and compared directly:
//!
//! - **HITS** (`hits`): authority and hub scores from the co-reference
//!   and co-citation matrices, iterated to a fixed point.
//! - **In-degree** (`indegree`): number of incoming edges.
//! - **PageRank** (`pagerank`): damped random-surfer stationary
//!   distribution.
//!
//! # Usage
//!
//! ```rust,ignore
//! use linkrank_rank::metrics::hits::HitsSession;
//! use linkrank_rank::metrics::indegree::in_degree_scores;
//! use linkrank_rank::metrics::pagerank::{PageRankConfig, pagerank};
//!
//! let mut session = HitsSession::new(edge_list)?;
//! let indegree = in_degree_scores(session.adjacency())?;
//! let pr = pagerank(session.adjacency(), &PageRankConfig::default())?;
//! let outcome = session.run()?;
//! ```

pub mod hits;
pub mod indegree;
pub mod pagerank;
