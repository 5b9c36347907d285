//! Core pipeline types and traits

pub mod error;
pub mod execution;
pub mod filter;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod settings;
pub mod transport;
pub mod worker;

pub use error::{LoggerError, Result};
pub use execution::{ExecutionContext, ExecutionMarker};
pub use filter::TagFilter;
pub use log_entry::{CallSite, LogEntry, LogOptions, Origin};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use settings::{BuildMode, LoggerConfig, Settings};
pub use transport::{FnTransport, Transport, TransportRegistry};
pub use worker::{OrderedWorker, DEFAULT_SHUTDOWN_TIMEOUT};
