//! Configuration management for herakles-proc-tree.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat, LogLevel};
use herakles_proc_tree::DEFAULT_PROC_ROOT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Default configuration constants
pub const DEFAULT_PID: &str = "1";
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Warn;

/// Config file locations checked when no --config is given, in order.
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "/etc/herakles/proc-tree.yaml",
    "/etc/herakles/proc-tree.yml",
    "/etc/herakles/proc-tree.json",
    "/etc/herakles/proc-tree.toml",
    "./herakles-proc-tree.yaml",
    "./herakles-proc-tree.yml",
    "./herakles-proc-tree.json",
    "./herakles-proc-tree.toml",
];

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the process filesystem
    #[serde(alias = "proc-root", skip_serializing_if = "Option::is_none")]
    pub proc_root: Option<PathBuf>,

    /// Target PID when --pid is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,

    // Logging
    #[serde(alias = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// File the values were loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            pid: Some(DEFAULT_PID.to_string()),
            log_level: Some(DEFAULT_LOG_LEVEL),
            source: None,
        }
    }
}

impl Config {
    pub fn proc_root(&self) -> &Path {
        self.proc_root
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_PROC_ROOT))
    }

    pub fn pid(&self) -> &str {
        self.pid.as_deref().unwrap_or(DEFAULT_PID)
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // pid is an opaque string; one that matches nothing is a normal empty result
    if cfg.proc_root().as_os_str().is_empty() {
        return Err("proc_root must not be empty".into());
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(pid) = &args.pid {
        config.pid = Some(pid.clone());
    }
    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }
    if let Some(level) = args.log_level {
        config.log_level = Some(level);
    }

    Ok(config)
}

/// Configuration loading with multiple format support.
///
/// An explicit path must exist; without one the default locations are searched
/// and plain defaults are used when none is present.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(format!("Config file not found: {}", p.display()).into());
            }
            p.to_path_buf()
        }
        None => match DEFAULT_CONFIG_PATHS
            .iter()
            .map(|p| Path::new(*p))
            .find(|p| p.exists())
        {
            Some(p) => p.to_path_buf(),
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path)?;
    let loaded: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        // Default to YAML
        _ => serde_yaml::from_str(&content)?,
    };

    let mut config = merge_defaults(loaded);
    config.source = Some(path);
    Ok(config)
}

/// Fills unset fields of a loaded file with the built-in defaults.
fn merge_defaults(loaded: Config) -> Config {
    let defaults = Config::default();
    Config {
        proc_root: loaded.proc_root.or(defaults.proc_root),
        pid: loaded.pid.or(defaults.pid),
        log_level: loaded.log_level.or(defaults.log_level),
        source: None,
    }
}

/// Renders configuration in the requested format
pub fn render_config(config: &Config, format: ConfigFormat) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}
