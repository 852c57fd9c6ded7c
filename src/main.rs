//! herakles-proc-tree - version 0.1.0
//!
//! Snapshot the process table once and print the subtree of one PID as JSON.
//! This is the main entry point; it alone decides what reaches stdout and the exit code.

mod cli;
mod config;

use clap::Parser;
use herakles_proc_tree::ProcessSnapshot;
use std::fmt::Display;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, error, info, Level};

use cli::{Args, LogLevel};
use config::{render_config, resolve_config, validate_effective_config, Config};

/// Initializes tracing logging subsystem with configured log level.
///
/// stdout carries the JSON document, so log output goes to stderr.
fn setup_logging(config: &Config) {
    let log_level = match config.log_level() {
        LogLevel::Off => return,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    debug!("Logging initialized with level: {:?}", config.log_level());
}

/// Formats an error as the single-line JSON object written to stdout.
fn error_json(err: &dyn Display) -> String {
    let message = err.to_string();
    let quoted = serde_json::to_string(&message).unwrap_or_else(|_| format!("{message:?}"));
    format!("{{\"error\": {quoted}}}")
}

fn fail(err: &dyn Display) -> ExitCode {
    println!("{}", error_json(err));
    ExitCode::FAILURE
}

/// Takes the snapshot and renders the configured PID.
fn run(config: &Config) -> herakles_proc_tree::Result<Option<String>> {
    let start = Instant::now();
    let root = config.proc_root();

    let snapshot = ProcessSnapshot::capture(root)?;
    info!(
        "Captured {} processes from {} in {:.2?}",
        snapshot.len(),
        root.display(),
        start.elapsed()
    );

    snapshot.render(config.pid())
}

/// Main application entry point.
fn main() -> ExitCode {
    let args = Args::parse();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };

    if let Err(e) = validate_effective_config(&config) {
        return fail(&format!("Configuration invalid: {}", e));
    }

    if args.check_config {
        println!("✅ Configuration is valid");
        return ExitCode::SUCCESS;
    }

    if args.show_config {
        return match render_config(&config, args.config_format) {
            Ok(output) => {
                println!("{output}");
                ExitCode::SUCCESS
            }
            Err(e) => fail(&e),
        };
    }

    setup_logging(&config);
    if let Some(path) = &config.source {
        info!("Loaded configuration from: {}", path.display());
    }

    match run(&config) {
        Ok(output) => {
            // An unknown PID prints nothing and still succeeds
            print!("{}", output.unwrap_or_default());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Process tree snapshot failed: {}", e);
            fail(&e)
        }
    }
}
