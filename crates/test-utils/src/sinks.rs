use std::io;
use std::sync::{Arc, Mutex};

use runmux::sink::LogSink;
use runmux::types::Severity;

/// Sink that records every forwarded line in memory.
///
/// Clones share the same backing storage, so a test can hand one clone to a
/// multiplexer and keep another for assertions.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(Severity, String)>>>,
    closes: Arc<Mutex<u32>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn line_count(&self) -> usize {
        self.lines.lock().unwrap().len()
    }

    /// How many times `close` was called on any clone.
    pub fn close_count(&self) -> u32 {
        *self.closes.lock().unwrap()
    }
}

impl LogSink for MemorySink {
    fn write(&mut self, level: Severity, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push((level, line.to_string()));
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        *self.closes.lock().unwrap() += 1;
        Ok(())
    }
}

/// Sink whose `write` starts failing after `ok_writes` successful writes.
///
/// Lines accepted before the failure are recorded, so tests can check that
/// partially forwarded output is preserved, not rolled back.
#[derive(Clone)]
pub struct FailingWriteSink {
    ok_writes: usize,
    written: Arc<Mutex<usize>>,
    lines: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl FailingWriteSink {
    pub fn new(ok_writes: usize) -> Self {
        Self {
            ok_writes,
            written: Arc::new(Mutex::new(0)),
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for FailingWriteSink {
    fn write(&mut self, level: Severity, line: &str) -> io::Result<()> {
        let mut written = self.written.lock().unwrap();
        if *written >= self.ok_writes {
            return Err(io::Error::other("sink write refused"));
        }
        *written += 1;
        self.lines.lock().unwrap().push((level, line.to_string()));
        Ok(())
    }
}

/// Sink that accepts every write but fails on `close`.
#[derive(Clone, Default)]
pub struct FailingCloseSink {
    lines: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl FailingCloseSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for FailingCloseSink {
    fn write(&mut self, level: Severity, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push((level, line.to_string()));
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        Err(io::Error::other("sink close refused"))
    }
}
