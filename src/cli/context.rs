use std::path::Path;

use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::algorithm::Algorithm;

/// Options shared by every command for one invocation.
///
/// Built once in `main` from the global flags and the config file, then
/// passed down explicitly.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub quiet: bool,
    pub json: bool,
    pub config: AppConfig,
}

impl RunContext {
    pub fn load(quiet: bool, json: bool, config_path: Option<&Path>) -> Result<Self> {
        Ok(Self {
            quiet,
            json,
            config: AppConfig::load(config_path)?,
        })
    }

    /// `--algorithm` if given, else the configured default.
    pub fn algorithm(&self, flag: Option<Algorithm>) -> Algorithm {
        flag.unwrap_or(self.config.encryptz.default_algorithm)
    }

    /// Whether styled, human-oriented output should be printed.
    pub fn styled(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Whether to draw a progress bar.
    pub fn show_progress(&self) -> bool {
        self.styled() && self.config.encryptz.progress
    }
}
