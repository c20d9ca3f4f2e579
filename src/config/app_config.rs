use serde::Deserialize;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::errors::{EncryptzError, Result};
use crate::core::models::algorithm::Algorithm;

/// Name of the per-project config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "encryptz.toml";

/// Optional user configuration, read from `encryptz.toml`.
///
/// Every field has a default, so a missing file or an empty `[encryptz]`
/// table both yield `AppConfig::default()`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub encryptz: EncryptzSection,
}

/// The `[encryptz]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncryptzSection {
    /// Algorithm used when `--algorithm` is not given.
    #[serde(default)]
    pub default_algorithm: Algorithm,
    /// Draw a progress bar for file and directory operations.
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for EncryptzSection {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::default(),
            progress: default_progress(),
        }
    }
}

fn default_progress() -> bool {
    true
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Otherwise `./encryptz.toml` and then
    /// `<config dir>/encryptz/config.toml` are tried; if neither exists the
    /// defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(EncryptzError::InvalidConfig {
                    detail: format!("config file not found: {}", path.display()),
                });
            }
            return Self::from_file(path);
        }

        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("encryptz").join("config.toml"));
        }
        paths
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EncryptzError::io_at(path, e))?;
        let config = Self::parse(&content).map_err(|e| EncryptzError::InvalidConfig {
            detail: format!("failed to parse {}: {e}", path.display()),
        })?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
