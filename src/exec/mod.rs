// src/exec/mod.rs

//! Process execution layer.
//!
//! Spawns the external command with `tokio::process::Command`, drains its
//! stdout and stderr concurrently, and reports the exit status to the caller.
//!
//! - [`pump`] holds the per-stream worker that copies lines to a sink.
//! - [`multiplexer`] owns the two pumps and their join/teardown sequence.
//! - [`executor`] spawns the process, wires the multiplexer, and applies the
//!   fail-on-error policy.

pub mod executor;
pub mod multiplexer;
pub mod pump;

pub use executor::{ProcessExecutor, ProcessOutcome};
pub use multiplexer::{PumpSummary, StreamMultiplexer};
