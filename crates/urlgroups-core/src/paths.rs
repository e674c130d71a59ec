//! Per-user config and state locations.
//!
//! XDG base directories on Unix, the platform's roaming/local app dirs elsewhere.

use anyhow::Result;
use std::path::PathBuf;

const APP_DIR: &str = "urlgroups";

/// Path of `config.toml` (parent directory is not created here).
#[cfg(unix)]
pub fn config_file() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::new()?;
    Ok(xdg_dirs.get_config_home().join(APP_DIR).join("config.toml"))
}

/// Directory holding the log file: `~/.local/state/urlgroups`.
#[cfg(unix)]
pub fn state_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::new()?;
    Ok(xdg_dirs.get_state_home().join(APP_DIR))
}

#[cfg(not(unix))]
pub fn config_file() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("no config directory"))?;
    Ok(base.join(APP_DIR).join("config.toml"))
}

#[cfg(not(unix))]
pub fn state_dir() -> Result<PathBuf> {
    let base =
        dirs::data_local_dir().ok_or_else(|| anyhow::anyhow!("no local data directory"))?;
    Ok(base.join(APP_DIR))
}
