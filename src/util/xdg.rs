use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "desktop";

fn home_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .context("Failed to get home directory")
        .map(|bd| bd.home_dir().to_path_buf())
}

fn xdg_base(var: &str, fallback: &str) -> Result<PathBuf> {
    match env::var_os(var) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Ok(home_dir()?.join(fallback)),
    }
}

/// Get the XDG config directory for desktop
///
/// Returns `$XDG_CONFIG_HOME/desktop` or `~/.config/desktop` if not set
pub fn config_dir() -> Result<PathBuf> {
    Ok(xdg_base("XDG_CONFIG_HOME", ".config")?.join(APP_DIR))
}

/// Get the XDG state directory for desktop
///
/// Returns `$XDG_STATE_HOME/desktop` or `~/.local/state/desktop` if not set
pub fn state_dir() -> Result<PathBuf> {
    Ok(xdg_base("XDG_STATE_HOME", ".local/state")?.join(APP_DIR))
}

/// Settings file inside [`config_dir`]
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
