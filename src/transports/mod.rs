//! Transport implementations

pub mod console;
pub mod memory;

pub use console::{ConsoleStream, ConsoleTransport};
pub use memory::MemoryTransport;

pub use crate::core::{FnTransport, Transport};
