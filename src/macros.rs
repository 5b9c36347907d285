//! Logging macros that capture the call site and defer message formatting.
//!
//! Every macro wraps its `format!` arguments in a closure, so in a release
//! build debug-level messages are never formatted at all.
//!
//! # Examples
//!
//! ```
//! use tagged_logger::prelude::*;
//! use tagged_logger::{info, log, warn};
//!
//! let capture = MemoryTransport::new();
//! let logger = Logger::builder()
//!     .label("Auth")
//!     .transport(capture.clone())
//!     .build()
//!     .unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // Explicit tags
//! let user_id = 42;
//! warn!(logger, ["session", "retry"]; "Refreshing session for user {}", user_id);
//!
//! // Full options record
//! log!(logger, LogOptions::new(LogLevel::Error).context("SessionStore").force(true); "Lost session");
//!
//! logger.drain();
//! assert_eq!(capture.len(), 3);
//! ```

/// Name of the enclosing function, without its module path.
///
/// Inside closures this still names the function the closure is defined in.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __probe() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__probe);
        let name = name.strip_suffix("::__probe").unwrap_or(name);
        let name = name.trim_end_matches("::{{closure}}");
        match name.rfind("::") {
            Some(idx) => &name[idx + 2..],
            None => name,
        }
    }};
}

/// Capture the current file, function and line as a [`CallSite`](crate::CallSite).
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(file!(), $crate::function_name!(), line!())
    };
}

/// Log a message with automatic formatting.
///
/// Accepts either a level or a full [`LogOptions`](crate::LogOptions)
/// record followed by `;`.
///
/// # Examples
///
/// ```
/// # use tagged_logger::prelude::*;
/// # let logger = Logger::new("Demo").unwrap();
/// use tagged_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogOptions::new(LogLevel::Warn).tag("net"); "Retry {} of {}", 1, 3);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $options:expr; $($arg:tt)+) => {
        $logger.log(
            $crate::LogOptions::from($options),
            || format!($($arg)+),
            $crate::call_site!(),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogOptions::new($level); $($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, $logger:expr, [$($tag:expr),* $(,)?]; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogOptions::new($level)$(.tag($tag))*; $($arg)+)
    };
    ($level:expr, $logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, $($arg)+)
    };
}

/// Log a trace-level message.
///
/// ```
/// # use tagged_logger::prelude::*;
/// # let logger = Logger::new("Demo").unwrap();
/// use tagged_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, ["math"]; "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::LogLevel::Trace, $logger, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::LogLevel::Debug, $logger, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::LogLevel::Info, $logger, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::LogLevel::Warn, $logger, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::LogLevel::Error, $logger, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::LogLevel::Fatal, $logger, $($arg)+)
    };
}
