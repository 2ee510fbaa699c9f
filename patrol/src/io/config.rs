//! Patrol configuration stored in `patrol.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::budget::deadline_after;
use crate::core::search::{CandidateStrategy, SearchOptions};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "patrol.toml";

/// Patrol configuration (TOML).
///
/// Missing fields default to the values in [`PatrolConfig::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatrolConfig {
    pub search: SearchConfig,
    pub simulator: SimulatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Candidate cells to try (`exhaustive` or `on_path`).
    pub strategy: CandidateStrategy,

    /// Spread trials across the rayon thread pool.
    pub parallel: bool,

    /// Wall-clock limit for the obstruction search; `0` disables it.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: CandidateStrategy::OnPath,
            parallel: true,
            timeout_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Override for the per-walk step budget. Unset derives
    /// `width * height * 4 + 1` from the grid.
    pub step_budget: Option<usize>,
}

impl PatrolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.simulator.step_budget == Some(0) {
            return Err(anyhow!("simulator.step_budget must be > 0"));
        }
        Ok(())
    }

    /// Build search options; the deadline clock starts now.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            strategy: self.search.strategy,
            parallel: self.search.parallel,
            deadline: deadline_after(self.search.timeout_secs),
            step_budget: self.simulator.step_budget,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `PatrolConfig::default()`.
pub fn load_config(path: &Path) -> Result<PatrolConfig> {
    if !path.exists() {
        let cfg = PatrolConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PatrolConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &PatrolConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
