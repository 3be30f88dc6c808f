//! Configuration for the toolrack binary.
//!
//! Loaded from ./toolrack.yml or ~/.config/toolrack/toolrack.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{ControlMode, ToolProfile, is_flange};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub controller: ControllerConfig,
    /// Tools the simulated controller starts with, besides Flange
    pub tools: Vec<ToolProfile>,
    /// File this config was read from; `None` when defaults are used
    #[serde(skip)]
    pub source: Option<PathBuf>,
    /// Fallback files that existed but failed to load
    #[serde(skip)]
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub serial_number: String,
    pub request_timeout_ms: u64,
    pub mode: ControlMode,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            serial_number: "Simulator-000000".to_string(),
            request_timeout_ms: 5000,
            mode: ControlMode::Idle,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            controller: ControllerConfig::default(),
            tools: Vec::new(),
            source: None,
            skipped: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. toolrack.yml in current directory
    /// 3. ~/.config/toolrack/toolrack.yml
    /// 4. Defaults
    ///
    /// Runs before logging is set up, so nothing is logged here; the outcome
    /// is kept in `source` and `skipped` for the caller to report.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut skipped = Vec::new();

        let local_config = PathBuf::from(format!("{}.yml", project_name));
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config.with_skipped(skipped)),
                Err(e) => skipped.push(format!("{}: {:#}", local_config.display(), e)),
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config.with_skipped(skipped)),
                    Err(e) => skipped.push(format!("{}: {:#}", user_config.display(), e)),
                }
            }
        }

        Ok(Self::default().with_skipped(skipped))
    }

    fn with_skipped(mut self, skipped: Vec<String>) -> Self {
        self.skipped = skipped;
        self
    }

    /// Log where the config came from and which fallbacks failed.
    pub fn log_source(&self) {
        for entry in &self.skipped {
            log::warn!("Skipped config file {}", entry);
        }
        match &self.source {
            Some(path) => log::info!("Loaded config from: {}", path.display()),
            None => log::info!("No config file found, using defaults"),
        }
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        config.source = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.controller.request_timeout_ms == 0 {
            eyre::bail!("controller.request_timeout_ms must be > 0");
        }

        let mut seen = HashSet::new();
        for tool in &self.tools {
            if tool.name.is_empty() {
                eyre::bail!("tools: tool name must not be empty");
            }
            if is_flange(&tool.name) {
                eyre::bail!("tools: [{}] is built in and cannot be configured", tool.name);
            }
            if !seen.insert(tool.name.as_str()) {
                eyre::bail!("tools: duplicate tool name [{}]", tool.name);
            }
        }
        Ok(())
    }
}
