// src/exec/executor.rs

//! Spawns the external process and drives one invocation to completion.

use std::process::Stdio;
use std::time::Duration;

use anyhow::anyhow;
use tokio::process::{Child, Command};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::cmdline::CommandLine;
use crate::errors::{Result, RunmuxError};
use crate::exec::multiplexer::StreamMultiplexer;

/// Exit status of a completed invocation.
///
/// `failed` mirrors the fail-on-error policy: it is only ever true when the
/// policy is enabled, and in that case the executor reports the failure
/// through the error path instead of returning an outcome. A nonzero exit
/// with the policy disabled therefore comes back as `failed: false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub exit_code: i32,
    pub failed: bool,
}

/// Runs one [`CommandLine`] with its output drained through a
/// [`StreamMultiplexer`].
///
/// One invocation walks through: spawn, pumps attached, process exited,
/// streams drained, done. The exit code is only inspected after both pumps
/// joined, so every line the process wrote has reached the sinks by the time
/// the caller observes completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor {
    fail_on_error: bool,
    timeout: Option<Duration>,
}

impl ProcessExecutor {
    pub fn new(fail_on_error: bool) -> Self {
        Self {
            fail_on_error,
            timeout: None,
        }
    }

    /// Kill the process and fail the invocation if it runs longer than `dur`.
    /// The drain-and-join sequence still runs after the kill, so output
    /// produced before the deadline is preserved.
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Run the process to completion.
    ///
    /// The multiplexer is wired immediately after spawn; OS pipe buffering
    /// holds any output produced in between, so no early output is lost. A
    /// launch failure (executable missing, spawn denied) is reported before a
    /// single sink write happens.
    pub async fn execute(
        &self,
        cmdline: &CommandLine,
        mut mux: StreamMultiplexer,
    ) -> Result<ProcessOutcome> {
        info!(
            executable = %cmdline.executable(),
            args = ?cmdline.args(),
            "starting process"
        );

        let mut cmd = Command::new(cmdline.executable());
        cmd.args(cmdline.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| RunmuxError::Launch {
            executable: cmdline.executable().to_string(),
            source,
        })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("child stdout pipe missing"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow!("child stderr pipe missing"))?;

        mux.start(stdout, stderr)?;

        let status = match self.timeout {
            Some(dur) => match wait_with_timeout(&mut child, dur).await? {
                Some(status) => status,
                None => {
                    // Killed on timeout; the pipes are closed now, so the
                    // pumps still drain whatever was produced before the kill.
                    mux.stop().await?;
                    return Err(RunmuxError::Timeout(dur));
                }
            },
            None => child.wait().await?,
        };

        let summary = mux.stop().await?;

        let exit_code = status.code().unwrap_or(-1);
        info!(
            exit_code,
            success = status.success(),
            stdout_lines = summary.stdout_lines,
            stderr_lines = summary.stderr_lines,
            "process exited"
        );

        if !status.success() && self.fail_on_error {
            return Err(RunmuxError::NonZeroExit(exit_code));
        }

        Ok(ProcessOutcome {
            exit_code,
            failed: false,
        })
    }
}

/// Wait for the child, racing against the deadline. Returns `None` when the
/// deadline won and the child was killed.
async fn wait_with_timeout(child: &mut Child, dur: Duration) -> Result<Option<std::process::ExitStatus>> {
    tokio::select! {
        status = child.wait() => Ok(Some(status?)),
        _ = sleep(dur) => {
            warn!(timeout = ?dur, "process exceeded timeout; killing");
            if let Err(err) = child.kill().await {
                warn!(error = %err, "failed to kill timed-out process");
            }
            Ok(None)
        }
    }
}
