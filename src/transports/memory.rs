//! In-memory transport that records every line it receives
//!
//! Clones share the same buffer, so a test can register one clone with the
//! logger and inspect another.

use crate::core::{Result, Transport};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
