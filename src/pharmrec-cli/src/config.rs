//! Persisted CLI defaults
//!
//! Stored as TOML under the platform config directory. A missing file
//! means defaults; a configured master table that has since disappeared
//! from disk is reported here, at load time, not when `parse` first
//! reaches for it.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = "pharmrec";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default drug master table used by `parse` when --master is absent
    pub master_db: Option<PathBuf>,
}

impl Config {
    /// Where the defaults live on this platform.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("No config directory on this platform")?;
        Ok(dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Read the persisted defaults.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Malformed config file {}", path.display()))?;

        if let Some(master) = &config.master_db {
            if !master.exists() {
                eprintln!(
                    "warning: configured master table {} does not exist",
                    master.display()
                );
            }
        }

        Ok(config)
    }

    /// Persist the defaults, creating the config directory on first save.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }
}
