// src/lib.rs

pub mod cli;
pub mod cmdline;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod params;
pub mod sink;
pub mod types;

use tracing::debug;

use crate::cli::CliArgs;
use crate::cmdline::CommandLine;
use crate::config::loader::load_and_validate;
use crate::config::InvocationConfig;
use crate::errors::Result;
use crate::exec::{ProcessExecutor, ProcessOutcome, StreamMultiplexer};
use crate::sink::TracingSink;
use crate::types::StreamChannel;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - invocation file loading and validation
/// - command-line assembly
/// - tracing-backed sinks for stdout and stderr
/// - the process executor
pub async fn run(args: CliArgs) -> Result<ProcessOutcome> {
    let cfg = load_and_validate(&args.config)?;
    let cmdline = cfg.command_line()?;

    if args.dry_run {
        print_dry_run(&cfg, &cmdline);
        return Ok(ProcessOutcome {
            exit_code: 0,
            failed: false,
        });
    }

    execute_invocation(&cfg, &cmdline).await
}

/// Run a validated invocation with tracing-backed sinks.
///
/// Embedders that build their own [`CommandLine`] and sinks can use
/// [`ProcessExecutor`] and [`StreamMultiplexer`] directly instead.
pub async fn execute_invocation(
    cfg: &InvocationConfig,
    cmdline: &CommandLine,
) -> Result<ProcessOutcome> {
    let mux = StreamMultiplexer::new(
        TracingSink::new(StreamChannel::Stdout),
        TracingSink::new(StreamChannel::Stderr),
        cfg.stdout_level,
        cfg.stderr_level,
    );

    let mut executor = ProcessExecutor::new(cfg.fail_on_error);
    if let Some(dur) = cfg.timeout {
        executor = executor.with_timeout(dur);
    }

    executor.execute(cmdline, mux).await
}

/// Simple dry-run output: print the rendered command line and policy.
fn print_dry_run(cfg: &InvocationConfig, cmdline: &CommandLine) {
    println!("runmux dry-run");
    println!("  command: {cmdline}");
    println!("  executable: {}", cmdline.executable());
    for arg in cmdline.args() {
        println!("  arg: {arg}");
    }
    println!("  fail_on_error = {}", cfg.fail_on_error);
    println!("  stdout_level = {}", cfg.stdout_level);
    println!("  stderr_level = {}", cfg.stderr_level);
    if let Some(dur) = cfg.timeout {
        println!("  timeout = {dur:?}");
    }

    debug!("dry-run complete (no execution)");
}
