// src/exec/pump.rs

//! Stream pump worker.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::{Result, RunmuxError};
use crate::sink::LogSink;
use crate::types::{Severity, StreamChannel};

/// Spawn a worker that copies lines from `reader` to `sink` until
/// end-of-stream or an I/O error.
///
/// - A trailing partial line (no terminating newline) is forwarded exactly
///   once before the worker finishes.
/// - A failed sink write stops the pump immediately; the failure is returned
///   rather than dropping data silently.
/// - The worker yields the sink back together with the number of lines it
///   forwarded, so the coordinator can close the sink after the join.
///
/// The worker runs to completion exactly once; it is not restartable.
pub(crate) fn spawn_pump<R, S>(
    channel: StreamChannel,
    level: Severity,
    reader: R,
    mut sink: S,
) -> JoinHandle<(S, Result<u64>)>
where
    R: AsyncRead + Unpin + Send + 'static,
    S: LogSink,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        let mut forwarded = 0u64;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Err(source) = sink.write(level, &line) {
                        return (sink, Err(RunmuxError::StreamIo { channel, source }));
                    }
                    forwarded += 1;
                }
                Ok(None) => break,
                Err(source) => {
                    return (sink, Err(RunmuxError::StreamIo { channel, source }));
                }
            }
        }

        debug!(channel = %channel, lines = forwarded, "pump reached end-of-stream");
        (sink, Ok(forwarded))
    })
}
