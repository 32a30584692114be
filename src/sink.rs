// src/sink.rs

//! Logging sink collaborators.
//!
//! Pumps forward subprocess output lines through the [`LogSink`] trait; the
//! core never formats or stores log entries itself. Production code uses
//! [`TracingSink`]; tests can provide their own implementation that records
//! lines in memory or injects write failures.

use std::io;

use tracing::{debug, error, info, trace, warn};

use crate::types::{Severity, StreamChannel};

/// Destination for forwarded subprocess output lines.
///
/// `write` is called once per complete line while the subprocess is running,
/// so implementations must be cheap and must not block on external I/O.
pub trait LogSink: Send + 'static {
    /// Forward one complete output line at the given severity.
    fn write(&mut self, level: Severity, line: &str) -> io::Result<()>;

    /// Flush and release the sink. Called exactly once, after the pump
    /// observed end-of-stream.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogSink for Box<dyn LogSink> {
    fn write(&mut self, level: Severity, line: &str) -> io::Result<()> {
        (**self).write(level, line)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Production sink: forwards lines to the `tracing` subscriber at the mapped
/// level, tagged with the originating channel.
#[derive(Debug, Clone)]
pub struct TracingSink {
    channel: StreamChannel,
}

impl TracingSink {
    pub fn new(channel: StreamChannel) -> Self {
        Self { channel }
    }
}

impl LogSink for TracingSink {
    fn write(&mut self, level: Severity, line: &str) -> io::Result<()> {
        match level {
            Severity::Error => error!(channel = %self.channel, "{}", line),
            Severity::Warn => warn!(channel = %self.channel, "{}", line),
            Severity::Info => info!(channel = %self.channel, "{}", line),
            Severity::Debug => debug!(channel = %self.channel, "{}", line),
            Severity::Trace => trace!(channel = %self.channel, "{}", line),
        }
        Ok(())
    }
}
