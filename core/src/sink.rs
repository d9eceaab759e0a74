use std::io::{self, Write};

/// Where result lines go. Each call is one complete line.
///
/// An error means the destination is gone for good; the pool stops on it.
pub trait Sink: Send + Sync {
    fn emit(&self, line: &str) -> io::Result<()>;
}

/// Writes lines to standard output, one locked write per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn emit(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")
    }
}
