//! # Tagged Logger
//!
//! An embeddable logging pipeline. Call sites emit tagged, leveled
//! messages; a single ordered worker filters them by tag, formats them and
//! hands the resulting line to every registered transport.
//!
//! ## Features
//!
//! - **Total order**: entries, settings changes and filter changes are all
//!   processed by one worker thread in submission order
//! - **Tag filtering**: an ignore list that always wins and an optional
//!   whitelist
//! - **Drain**: block until everything logged so far has been delivered
//! - **Force**: guarantee a console line for an entry regardless of
//!   transports or the enabled flag
//!
//! ```
//! use tagged_logger::prelude::*;
//! use tagged_logger::info;
//!
//! let capture = MemoryTransport::new();
//! let logger = Logger::new("Auth").unwrap();
//! logger.add_transport(capture.clone());
//! logger.suppress("secret");
//!
//! info!(logger, "user {} signed in", 7);
//! info!(logger, ["secret"]; "token {}", "abc");
//! logger.drain();
//!
//! assert_eq!(capture.len(), 1);
//! ```

pub mod core;
pub mod macros;
pub mod transports;

pub mod prelude {
    pub use crate::core::{
        BuildMode, CallSite, FnTransport, LogLevel, LogOptions, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Result, Transport,
    };
    pub use crate::transports::{ConsoleTransport, MemoryTransport};
}

pub use crate::core::{
    BuildMode, CallSite, ExecutionContext, ExecutionMarker, FnTransport, LogEntry, LogLevel,
    LogOptions, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Origin, Result,
    TagFilter, Transport, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use transports::{ConsoleStream, ConsoleTransport, MemoryTransport};
