#![forbid(unsafe_code)]
//! linkrank-rank library.
//!
//! The ranking engine: compacted sparse adjacency, co-citation and
//! co-reference matrices, the HITS iterator, in-degree and PageRank
//! baselines, top-k extraction and Jaccard comparison of top-k sets.
//!
//! # Conventions
//!
//! - **Errors**: engine operations return `linkrank_core::RankError`;
//!   the dataset pipeline uses `anyhow::Result` at its boundary.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod compare;
pub mod metrics;
pub mod pipeline;
pub mod scores;
pub mod sparse;
pub mod topk;

pub use scores::ScoreVector;
