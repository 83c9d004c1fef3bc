//! Subcommand handlers.

pub mod compare;
pub mod hits;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::Result;
use linkrank_core::ErrorCode;
use linkrank_core::config::{RunConfig, TOP_K_ENV, load_config, resolve_top_k};

/// Configuration shared by every command: the working directory and an
/// optional explicit `--config` file.
#[derive(Debug, Clone)]
pub struct Context {
    pub cwd: PathBuf,
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load the run configuration and apply `-k` / `LINKRANK_TOP_K`.
    ///
    /// Failures carry [`ErrorCode::ConfigParseError`] as outer context.
    pub fn run_config(&self, cli_k: &[usize]) -> Result<RunConfig> {
        let env_k = std::env::var(TOP_K_ENV).ok();
        load_config(&self.cwd, self.config_path.as_deref())
            .and_then(|config| resolve_top_k(config, cli_k, env_k.as_deref()))
            .map_err(|err| err.context(ErrorCode::ConfigParseError))
    }

    /// Resolve a possibly relative path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
