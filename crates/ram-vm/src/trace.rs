//! Trace side channel.
//!
//! The machine reports progress as plain text lines to an optional
//! [`TraceSink`]. What the sink does with them is up to the caller; nothing it
//! does can influence execution.

use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    /// Per-instruction and bookkeeping lines; only sent when verbose.
    Detail,
    Info,
    Warning,
}

pub trait TraceSink {
    fn emit(&mut self, level: TraceLevel, message: &str);
}

impl<F> TraceSink for F
where
    F: FnMut(TraceLevel, &str),
{
    fn emit(&mut self, level: TraceLevel, message: &str) {
        self(level, message)
    }
}

/// Writes each event as one line to any [`Write`] target, prefixing warnings.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn emit(&mut self, level: TraceLevel, message: &str) {
        // Trace is best effort; a failing writer must not stop the machine.
        let _ = match level {
            TraceLevel::Warning => writeln!(self.out, "WARNING {}", message),
            _ => writeln!(self.out, "{}", message),
        };
    }
}
