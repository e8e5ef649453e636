use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::util::xdg;

const DEFAULT_VARIANT: &str = "default";
const DEFAULT_SHELL: &str = "bash";
const STORE_FILE: &str = "desktop.toml";

/// User settings from `$XDG_CONFIG_HOME/desktop/config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Shell started by `desktop go`; must accept `--init-file`
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Variant activated when `desktop go` is not given one
    #[serde(default = "default_variant")]
    pub default_variant: String,
    /// Where workspaces and tags are kept; `~` and `$VARS` are expanded
    #[serde(default)]
    pub store_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            default_variant: DEFAULT_VARIANT.to_string(),
            store_path: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Load from the XDG config location
    pub fn load_default() -> Result<Self> {
        Self::load(&xdg::config_file()?)
    }

    /// Resolve the store file, defaulting to `$XDG_STATE_HOME/desktop/desktop.toml`
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(raw) => {
                let expanded = shellexpand::full(raw)
                    .with_context(|| format!("Failed to expand store path {:?}", raw))?;
                Ok(PathBuf::from(expanded.as_ref()))
            }
            None => Ok(xdg::state_dir()?.join(STORE_FILE)),
        }
    }
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

fn default_variant() -> String {
    DEFAULT_VARIANT.to_string()
}
