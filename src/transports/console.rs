//! Console transport implementation

use crate::core::{Result, Transport};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

/// Writes each line to stdout or stderr
///
/// This is also the sink the logger uses for forced entries unless
/// [`LoggerBuilder::force_output`](crate::LoggerBuilder::force_output)
/// replaces it.
#[derive(Debug, Default)]
pub struct ConsoleTransport {
    stream: ConsoleStream,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stderr() -> Self {
        Self {
            stream: ConsoleStream::Stderr,
        }
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Transport for ConsoleTransport {
    fn send(&mut self, line: &str) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => writeln!(std::io::stdout().lock(), "{}", line)?,
            ConsoleStream::Stderr => writeln!(std::io::stderr().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => std::io::stdout().flush()?,
            ConsoleStream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
