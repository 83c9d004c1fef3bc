#![forbid(unsafe_code)]
//! linkrank-core library.
//!
//! Everything the ranking engine needs before the first matrix is built:
//! the edge-list model and its loader, dataset discovery, the error model
//! shared by every crate, run configuration and stage timing.
//!
//! # Conventions
//!
//! - **Errors**: library operations return [`error::RankError`]; binaries
//!   wrap them in `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod datasets;
pub mod edges;
pub mod error;
pub mod loader;
pub mod timing;

pub use edges::{Edge, EdgeList, GraphStats, NodeId};
pub use error::{ErrorCode, RankError, Vector};
