//! Harness configuration stored under the per-user config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::types::FIRST_YEAR;

/// Directory name under the platform config dir (`~/.config` on Linux).
pub const APP_DIR: &str = "aoc-harness";
pub const CONFIG_FILE: &str = "config.toml";
pub const RESULTS_FILE: &str = "results.txt";

/// Harness configuration (TOML).
///
/// Missing fields fall back to defaults, so an empty or absent file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Root of the input store (`<data_dir>/<examples|puzzles>/<year>/`).
    pub data_dir: PathBuf,

    /// Results cache file. Defaults to `results.txt` next to the config file.
    pub results_file: Option<PathBuf>,

    /// Year used when a command does not name one.
    pub default_year: u16,

    /// Emit human-readable status lines while running.
    pub print_progress: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            results_file: None,
            default_year: 2023,
            print_progress: true,
        }
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(anyhow!("data_dir must be non-empty"));
        }
        if self.default_year < FIRST_YEAR {
            return Err(anyhow!("default_year must be >= {FIRST_YEAR}"));
        }
        if let Some(results_file) = &self.results_file
            && results_file.as_os_str().is_empty()
        {
            return Err(anyhow!("results_file must be non-empty when set"));
        }
        Ok(())
    }

    /// Resolve the results cache path relative to the directory holding the config.
    pub fn results_path(&self, config_dir: &Path) -> PathBuf {
        match &self.results_file {
            Some(path) => path.clone(),
            None => config_dir.join(RESULTS_FILE),
        }
    }
}

/// Per-user directory holding the config and the results cache.
pub fn default_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("no per-user config directory on this platform")?;
    Ok(base.join(APP_DIR))
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `HarnessConfig::default()`.
pub fn load_config(path: &Path) -> Result<HarnessConfig> {
    if !path.exists() {
        let cfg = HarnessConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HarnessConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &HarnessConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
