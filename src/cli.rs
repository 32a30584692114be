// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `runmux`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runmux",
    version,
    about = "Run an external command and multiplex its output into leveled logs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the invocation file (TOML).
    ///
    /// Default: `Runmux.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Runmux.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNMUX_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the rendered command line, but don't spawn
    /// anything.
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
