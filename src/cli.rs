// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `taskresult`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskresult",
    version,
    about = "Run a list of tasks in order and report each result.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task file (TOML).
    ///
    /// Default: `Tasks.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Tasks.toml")]
    pub config: String,

    /// Abort on the first failing task and exit with its code.
    ///
    /// Overrides `[config].stop_on_fail` when set.
    #[arg(long)]
    pub stop_on_fail: bool,

    /// Do not print task results to stdout.
    #[arg(long)]
    pub quiet: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKRESULT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, list the tasks, but don't run any of them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
