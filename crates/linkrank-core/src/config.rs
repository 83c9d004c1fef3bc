//! Run configuration.
//!
//! Settings come from `linkrank.toml` (or the file passed with `--config`),
//! every field optional:
//!
//! ```toml
//! top_k = [10, 20, 50]
//! datasets = "data/"
//! output_dir = "results/"
//!
//! [pagerank]
//! damping = 0.85
//! tolerance = 1e-6
//! max_iter = 100
//! ```
//!
//! The HITS convergence threshold is not configurable.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "linkrank.toml";

/// Environment variable holding a comma-separated list of k values.
pub const TOP_K_ENV: &str = "LINKRANK_TOP_K";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// k values for top-k extraction and comparison.
    #[serde(default = "default_top_k")]
    pub top_k: Vec<usize>,
    /// Dataset file or directory used when a command is given no path.
    #[serde(default)]
    pub datasets: Option<PathBuf>,
    /// Directory receiving CSV reports.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub pagerank: PageRankSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            datasets: None,
            output_dir: None,
            pagerank: PageRankSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRankSettings {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

fn default_top_k() -> Vec<usize> {
    vec![10, 20, 50]
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

/// Load configuration from `explicit` if given, else from
/// [`CONFIG_FILE_NAME`] in `dir`. A missing default file yields defaults;
/// a missing explicit file is an error.
///
/// # Errors
///
/// Fails when the file cannot be read or parsed, or holds invalid values.
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<RunConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = dir.join(CONFIG_FILE_NAME);
            if !path.exists() {
                return Ok(RunConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<RunConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    validate(config).with_context(|| format!("Invalid settings in {}", path.display()))
}

/// Apply the k-value precedence: CLI flags, then `LINKRANK_TOP_K`, then
/// whatever the file or defaults provided.
///
/// # Errors
///
/// Fails if the env value cannot be parsed or the result is invalid.
pub fn resolve_top_k(
    config: RunConfig,
    cli_k: &[usize],
    env_k: Option<&str>,
) -> Result<RunConfig> {
    let mut config = config;
    if !cli_k.is_empty() {
        config.top_k = cli_k.to_vec();
    } else if let Some(raw) = env_k {
        config.top_k = parse_k_list(raw).with_context(|| format!("Invalid {TOP_K_ENV}"))?;
    }
    validate(config)
}

/// Parse a comma-separated list of k values.
///
/// # Errors
///
/// Fails on any entry that is not an unsigned integer.
pub fn parse_k_list(raw: &str) -> Result<Vec<usize>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .with_context(|| format!("{s:?} is not a valid k"))
        })
        .collect()
}

fn validate(mut config: RunConfig) -> Result<RunConfig> {
    if config.top_k.is_empty() {
        bail!("top_k must list at least one value");
    }
    if config.top_k.contains(&0) {
        bail!("top_k values must be positive");
    }
    config.top_k.sort_unstable();
    config.top_k.dedup();

    let pr = &config.pagerank;
    if !(pr.damping > 0.0 && pr.damping < 1.0) {
        bail!("pagerank.damping must lie in (0, 1), got {}", pr.damping);
    }
    if pr.tolerance <= 0.0 {
        bail!("pagerank.tolerance must be positive, got {}", pr.tolerance);
    }
    if pr.max_iter == 0 {
        bail!("pagerank.max_iter must be positive");
    }

    Ok(config)
}
