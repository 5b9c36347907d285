//! Log entry structure
//!
//! A [`LogEntry`] is captured on the calling thread and handed to the
//! ordered worker, which owns it until it is dispatched or dropped.

use super::execution::ExecutionContext;
use super::log_level::LogLevel;
use std::time::Instant;

/// Source location of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub function: &'static str,
    pub line: u32,
}

impl CallSite {
    pub const fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }
}

/// Metadata captured at the call site
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    pub file: String,
    pub function: String,
    pub line: u32,
    pub execution: ExecutionContext,
    /// Milliseconds since the owning logger was constructed
    pub elapsed_ms: f64,
}

impl Origin {
    pub fn capture(site: CallSite, started: Instant) -> Self {
        Self {
            file: site.file.to_string(),
            function: site.function.to_string(),
            line: site.line,
            execution: ExecutionContext::current(),
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

/// Per-call options: the named, defaultable half of a log call
///
/// # Example
///
/// ```
/// use tagged_logger::{LogLevel, LogOptions};
///
/// let options = LogOptions::new(LogLevel::Warn)
///     .tag("auth")
///     .context("SessionStore")
///     .force(true);
/// assert_eq!(options.tags, vec!["auth".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub level: LogLevel,
    pub tags: Vec<String>,
    pub force: bool,
    pub context: Option<String>,
}

impl LogOptions {
    #[must_use]
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Use the short name of `T` as the context
    #[must_use = "builder methods return a new value"]
    pub fn context_of<T: ?Sized>(self) -> Self {
        self.context(short_type_name::<T>())
    }
}

impl From<LogLevel> for LogOptions {
    fn from(level: LogLevel) -> Self {
        Self::new(level)
    }
}

/// Last path segment of a type name, generics included
///
/// `alloc::vec::Vec<u8>` becomes `Vec<u8>`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub explicit_tags: Vec<String>,
    pub context: Option<String>,
    pub force: bool,
    pub origin: Origin,
}

impl LogEntry {
    pub fn new(options: LogOptions, message: String, origin: Origin) -> Self {
        Self {
            level: options.level,
            message,
            explicit_tags: options.tags,
            context: options.context,
            force: options.force,
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SessionStore;

    #[test]
    fn test_options_builder() {
        let options = LogOptions::new(LogLevel::Error)
            .tag("a")
            .tags(["b", "c"])
            .force(true)
            .context("Billing");

        assert_eq!(options.level, LogLevel::Error);
        assert_eq!(options.tags, vec!["a", "b", "c"]);
        assert!(options.force);
        assert_eq!(options.context.as_deref(), Some("Billing"));
    }

    #[test]
    fn test_options_defaults() {
        let options = LogOptions::from(LogLevel::Info);
        assert!(options.tags.is_empty());
        assert!(!options.force);
        assert!(options.context.is_none());
    }

    #[test]
    fn test_context_of_type() {
        let options = LogOptions::new(LogLevel::Info).context_of::<SessionStore>();
        assert_eq!(options.context.as_deref(), Some("SessionStore"));
    }

    #[test]
    fn test_short_type_name_keeps_generics() {
        assert_eq!(short_type_name::<Vec<u8>>(), "Vec<u8>");
        assert_eq!(short_type_name::<u32>(), "u32");
    }

    #[test]
    fn test_origin_capture() {
        let started = Instant::now();
        let origin = Origin::capture(CallSite::new("src/auth/session.rs", "refresh", 42), started);

        assert_eq!(origin.file, "src/auth/session.rs");
        assert_eq!(origin.function, "refresh");
        assert_eq!(origin.line, 42);
        assert!(origin.elapsed_ms >= 0.0);
    }
}
