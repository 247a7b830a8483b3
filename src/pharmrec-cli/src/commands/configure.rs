//! Configure command handler

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;

pub fn handle(master_db: Option<PathBuf>, show: bool) -> Result<()> {
    let mut config = Config::load()?;
    let updated = master_db.is_some();

    if let Some(path) = master_db {
        config.master_db = Some(path);
        config.save()?;
        println!("Default master table updated");
    }

    // Bare `configure` behaves like --show
    if show || !updated {
        println!("Config file: {}", Config::config_path()?.display());
        match &config.master_db {
            Some(path) => println!("master_db = {}", path.display()),
            None => println!("master_db = (not set)"),
        }
    }

    Ok(())
}
