// src/exec/multiplexer.rs

//! Coordinates the two stream pumps of one invocation.

use anyhow::anyhow;
use tokio::io::AsyncRead;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::{Result, RunmuxError};
use crate::exec::pump::spawn_pump;
use crate::sink::LogSink;
use crate::types::{Severity, StreamChannel};

type PumpHandle = JoinHandle<(Box<dyn LogSink>, Result<u64>)>;

/// Line counts reported by [`StreamMultiplexer::stop`] once both streams are
/// drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpSummary {
    pub stdout_lines: u64,
    pub stderr_lines: u64,
}

/// Owns the two pumps draining a child's stdout and stderr.
///
/// Lifecycle: construct with the two sinks and their severities, [`start`]
/// with the child's pipe handles once the process is spawned, then [`stop`]
/// exactly once. `stop` consumes the multiplexer, so a second stop cannot
/// compile. Instances live for a single invocation.
///
/// The two pumps run in parallel with each other and with the subprocess.
/// Draining stdout to EOF before touching stderr would deadlock as soon as
/// the process blocks writing to a full stderr pipe while we are still
/// reading stdout.
pub struct StreamMultiplexer {
    out_level: Severity,
    err_level: Severity,
    out_sink: Option<Box<dyn LogSink>>,
    err_sink: Option<Box<dyn LogSink>>,
    out_pump: Option<PumpHandle>,
    err_pump: Option<PumpHandle>,
}

impl StreamMultiplexer {
    pub fn new(
        out_sink: impl LogSink,
        err_sink: impl LogSink,
        out_level: Severity,
        err_level: Severity,
    ) -> Self {
        Self {
            out_level,
            err_level,
            out_sink: Some(Box::new(out_sink)),
            err_sink: Some(Box::new(err_sink)),
            out_pump: None,
            err_pump: None,
        }
    }

    /// Begin draining both streams concurrently.
    ///
    /// Generic over the readers so tests can drive the pumps from in-memory
    /// sources instead of real child pipes.
    pub fn start<O, E>(&mut self, stdout: O, stderr: E) -> Result<()>
    where
        O: AsyncRead + Unpin + Send + 'static,
        E: AsyncRead + Unpin + Send + 'static,
    {
        let (Some(out_sink), Some(err_sink)) = (self.out_sink.take(), self.err_sink.take())
        else {
            return Err(RunmuxError::ConfigError(
                "stream multiplexer already started".to_string(),
            ));
        };

        self.out_pump = Some(spawn_pump(
            StreamChannel::Stdout,
            self.out_level,
            stdout,
            out_sink,
        ));
        self.err_pump = Some(spawn_pump(
            StreamChannel::Stderr,
            self.err_level,
            stderr,
            err_sink,
        ));

        debug!("both stream pumps started");
        Ok(())
    }

    /// Wait until both pumps observed end-of-stream, then close both sinks.
    ///
    /// Both workers are joined before any failure is reported, so the
    /// surviving stream is always drained even when the other one failed.
    /// Pump failures take precedence over close failures; stdout is reported
    /// before stderr when both failed.
    pub async fn stop(mut self) -> Result<PumpSummary> {
        let (mut out_sink, out_res) =
            join_pump(self.out_pump.take(), StreamChannel::Stdout).await?;
        let (mut err_sink, err_res) =
            join_pump(self.err_pump.take(), StreamChannel::Stderr).await?;

        // Close both sinks before inspecting the pump results so teardown
        // always runs, even for a failed invocation.
        let out_close = out_sink.close();
        let err_close = err_sink.close();

        let stdout_lines = out_res?;
        let stderr_lines = err_res?;

        out_close.map_err(|source| RunmuxError::StreamClose {
            channel: StreamChannel::Stdout,
            source,
        })?;
        err_close.map_err(|source| RunmuxError::StreamClose {
            channel: StreamChannel::Stderr,
            source,
        })?;

        debug!(stdout_lines, stderr_lines, "streams drained and sinks closed");
        Ok(PumpSummary {
            stdout_lines,
            stderr_lines,
        })
    }
}

async fn join_pump(
    handle: Option<PumpHandle>,
    channel: StreamChannel,
) -> Result<(Box<dyn LogSink>, Result<u64>)> {
    let Some(handle) = handle else {
        return Err(RunmuxError::ConfigError(format!(
            "{channel} pump was never started"
        )));
    };

    handle
        .await
        .map_err(|err| RunmuxError::Other(anyhow!("{channel} pump task panicked: {err}")))
}
