// src/config.rs
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const DEFAULT_PROMPT: &str = "> ";
pub const DEFAULT_JOB_CAPACITY: usize = 512;
pub const DEFAULT_READ_UNIT: usize = 1024;

/// Optional settings read from `<config_dir>/tinysh/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Printed before every read.
    pub prompt: String,
    /// Maximum number of tracked background jobs.
    pub job_capacity: usize,
    /// Initial size of the line buffer, in bytes.
    pub read_unit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: DEFAULT_PROMPT.to_string(),
            job_capacity: DEFAULT_JOB_CAPACITY,
            read_unit: DEFAULT_READ_UNIT,
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tinysh").join("config.toml"))
    }

    /// Load the config file if there is one, defaults otherwise.
    pub fn load() -> Result<Self> {
        let path = match Self::path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.job_capacity == 0 {
            bail!("job_capacity must be at least 1");
        }
        if config.read_unit == 0 {
            bail!("read_unit must be at least 1");
        }
        Ok(config)
    }
}
