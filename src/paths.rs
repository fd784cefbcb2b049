//! Common paths for tarihte
//!
//! tarihte keeps no data of its own; the only file is
//! ~/.config/tarihte/config.toml on all platforms.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the tarihte directory (~/.config/tarihte/)
///
/// Not created here; `Config::save_to` creates it on first write.
pub fn tarihte_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("tarihte"))
}

/// Get the config file path (~/.config/tarihte/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(tarihte_dir()?.join("config.toml"))
}
