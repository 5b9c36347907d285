//! Current execution context descriptor
//!
//! Identifies the thread a log call was issued from: whether it is the
//! process's foreground (main) thread and an opaque numeric id that stays
//! stable for the thread's lifetime.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

// Thread-local cache so the id is allocated once per thread
thread_local! {
    static THREAD_ID_CACHE: Cell<Option<u64>> = const { Cell::new(None) };
}

fn current_thread_id() -> u64 {
    THREAD_ID_CACHE.with(|cache| match cache.get() {
        Some(id) => id,
        None => {
            let id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
            cache.set(Some(id));
            id
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionMarker {
    Foreground,
    Background,
}

impl ExecutionMarker {
    pub fn to_str(&self) -> &'static str {
        match self {
            ExecutionMarker::Foreground => "main",
            ExecutionMarker::Background => "bg",
        }
    }
}

impl fmt::Display for ExecutionMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub marker: ExecutionMarker,
    pub thread_id: u64,
}

impl ExecutionContext {
    /// Describe the calling thread
    pub fn current() -> Self {
        let marker = if std::thread::current().name() == Some("main") {
            ExecutionMarker::Foreground
        } else {
            ExecutionMarker::Background
        };

        Self {
            marker,
            thread_id: current_thread_id(),
        }
    }
}
