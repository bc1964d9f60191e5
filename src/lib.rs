// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod printer;
pub mod result;
pub mod runner;
pub mod task;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::printer::ConsolePrinter;
use crate::result::{EXITCODE_ERROR, EXITCODE_OK, ExecutionContext};
use crate::runner::Runner;
use crate::task::TaskRegistry;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the task registry
/// - the execution context (printer + stop-on-fail policy)
/// - the sequential runner
///
/// Returns the exit status the process should end with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let registry = TaskRegistry::with_builtins();
    let tasks = cfg.build_tasks(&registry)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(EXITCODE_OK);
    }

    let ctx = build_context(&cfg, &args);
    info!(
        config = %config_path.display(),
        stop_on_fail = ctx.stop_on_fail_enabled(),
        "loaded task file"
    );

    let runner = Runner::new(ctx, tasks);
    let summary = runner.run().await?;

    debug!(
        exit_code = summary.exit_code,
        stopped = summary.stopped,
        results = summary.results.len(),
        "run summary"
    );
    Ok(process_exit_status(summary.exit_code))
}

/// Map a result exit code onto a process exit status.
///
/// The OS keeps only the low 8 bits of the status, so a nonzero code whose
/// low byte is zero (256, -512, ...) would read as success. Those become
/// [`EXITCODE_ERROR`]; every other code passes through unchanged.
pub fn process_exit_status(code: i32) -> i32 {
    if code != EXITCODE_OK && code & 0xff == 0 {
        EXITCODE_ERROR
    } else {
        code
    }
}

/// Merge `[config]` with CLI overrides into an execution context.
///
/// `--stop-on-fail` can only turn the policy on; `--quiet` only turns
/// printing off.
pub fn build_context(cfg: &ConfigFile, args: &CliArgs) -> ExecutionContext {
    let mut ctx = ExecutionContext::new()
        .with_stop_on_fail(cfg.config.stop_on_fail || args.stop_on_fail);
    if cfg.config.print_results && !args.quiet {
        ctx = ctx.with_printer(Arc::new(ConsolePrinter::stdout()));
    }
    ctx
}

/// Simple dry-run output: print settings and tasks.
fn print_dry_run(cfg: &ConfigFile) {
    println!("taskresult dry-run");
    println!("  config.stop_on_fail = {}", cfg.config.stop_on_fail);
    println!("  config.print_results = {}", cfg.config.print_results);
    println!();

    println!("tasks ({}):", cfg.task.len());
    for task in cfg.task.iter() {
        println!("  - {} ({})", task.name, task.kind);
        for (key, value) in task.args.iter() {
            println!("      {key}: {value}");
        }
    }

    debug!("dry-run complete (no execution)");
}
