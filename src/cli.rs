//! CLI arguments for herakles-proc-tree.
//!
//! This module defines the command-line interface structure using the clap library.
//! There are no subcommands: one invocation takes one snapshot and answers one query.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level options for CLI parsing and config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("VERGEN_BUILD_TIMESTAMP"),
    ")"
);

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "herakles-proc-tree",
    about = "Print the process tree below a PID as JSON",
    long_about = "Print the process tree below a PID as JSON.\n\n\
                  Reads every process from /proc once, links each process to its parent \
                  and writes the subtree rooted at the requested PID to stdout. \
                  An unknown PID produces empty output.",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version,
    long_version = LONG_VERSION
)]
pub struct Args {
    /// Target PID for the root of the tree [default: 1]
    #[arg(long)]
    pub pid: Option<String>,

    /// Root of the process filesystem [default: /proc]
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// Log level (logs are written to stderr) [default: warn]
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["herakles-proc-tree"]).expect("no args should parse");
        assert_eq!(args.pid, None);
        assert_eq!(args.proc_root, None);
        assert_eq!(args.log_level, None);
        assert!(!args.no_config);
        assert!(!args.show_config);
        assert!(!args.check_config);
    }

    #[test]
    fn test_args_pid_and_root() {
        let args = Args::try_parse_from([
            "herakles-proc-tree",
            "--pid",
            "45",
            "--proc-root",
            "/tmp/fake-proc",
            "--log-level",
            "debug",
        ])
        .expect("flags should parse");
        assert_eq!(args.pid.as_deref(), Some("45"));
        assert_eq!(args.proc_root, Some(PathBuf::from("/tmp/fake-proc")));
        assert_eq!(args.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_args_rejects_subcommand() {
        assert!(Args::try_parse_from(["herakles-proc-tree", "check"]).is_err());
    }
}
