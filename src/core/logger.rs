//! Main logger implementation
//!
//! A [`Logger`] owns one [`OrderedWorker`] and the pipeline state that
//! lives on it: settings, tag filter, transport registry and the force
//! output sink. Every mutation, every read and every log entry is a unit of
//! work on that worker, so they are all processed in one total order.

use super::{
    error::{LoggerError, Result},
    filter::TagFilter,
    formatter::{derived_tags, format_line},
    log_entry::{CallSite, LogEntry, LogOptions, Origin},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    settings::{BuildMode, LoggerConfig, Settings},
    transport::{send_isolated, FnTransport, Transport, TransportRegistry},
    worker::OrderedWorker,
};
use crate::transports::ConsoleTransport;
use std::sync::Arc;
use std::time::Instant;

/// State owned by the worker thread
struct Pipeline {
    settings: Settings,
    filter: TagFilter,
    transports: TransportRegistry,
    force_output: Box<dyn Transport>,
    metrics: Arc<LoggerMetrics>,
}

impl Pipeline {
    fn process(&mut self, entry: LogEntry) {
        let deliverable = self.settings.enabled && !self.transports.is_empty();
        if !deliverable && !entry.force {
            self.metrics.record_dropped();
            return;
        }

        let permitted = self.filter.permits(&derived_tags(&entry));
        let line = format_line(self.settings.label(), &entry, self.settings.output_tags);

        // Forced lines reach the console even when the tag filter rejects them
        if entry.force {
            send_isolated(self.force_output.as_mut(), 0, &line);
            self.metrics.record_forced();
        }

        if !permitted {
            self.metrics.record_filtered();
        } else if !self.transports.is_empty() {
            self.transports.dispatch(&line, &self.metrics);
            self.metrics.record_delivered();
        }
    }

    fn flush(&mut self) {
        self.transports.flush();
        if let Err(e) = self.force_output.flush() {
            eprintln!("[LOGGER ERROR] Force output flush failed: {}", e);
        }
    }
}

pub struct Logger {
    worker: OrderedWorker<Pipeline>,
    metrics: Arc<LoggerMetrics>,
    started: Instant,
    build_mode: BuildMode,
    /// Construction-time settings, answered when the worker cannot be asked
    initial: Settings,
}

impl Logger {
    /// Create a logger with default settings and no transports
    pub fn new(label: impl Into<String>) -> Result<Self> {
        Self::builder().label(label).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use tagged_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .label("Auth")
    ///     .output_tags(true)
    ///     .suppress("secret")
    ///     .transport(MemoryTransport::new())
    ///     .build()
    ///     .unwrap();
    /// assert!(logger.output_tags());
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn submit(&self, operation: &str, job: impl FnOnce(&mut Pipeline) + Send + 'static) {
        if let Err(e) = self.worker.submit(job) {
            eprintln!("[LOGGER ERROR] Could not submit {}: {}", operation, e);
        }
    }

    fn read<R, F>(&self, operation: &str, f: F, fallback: R) -> R
    where
        R: Send + 'static,
        F: FnOnce(&mut Pipeline) -> R + Send + 'static,
    {
        match self.worker.query(f) {
            Ok(value) => value,
            Err(e) => {
                eprintln!(
                    "[LOGGER WARNING] Reading {} failed ({}); using the construction-time value",
                    operation, e
                );
                fallback
            }
        }
    }

    /// Log an entry
    ///
    /// In a release build, debug-only levels return before `message` is
    /// called. Otherwise the message and call-site metadata are captured
    /// here on the calling thread and the entry is queued for the worker.
    pub fn log<F, M>(&self, options: impl Into<LogOptions>, message: F, site: CallSite)
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        let options = options.into();
        if self.build_mode.rejects(options.level) {
            return;
        }

        let message = message().into();
        let origin = Origin::capture(site, self.started);
        let entry = LogEntry::new(options, message, origin);
        self.submit("log entry", move |pipeline| pipeline.process(entry));
    }

    /// Register a transport; registering the same sink twice delivers twice
    pub fn add_transport<T: Transport + 'static>(&self, transport: T) {
        let transport: Box<dyn Transport> = Box::new(transport);
        self.submit("add_transport", move |pipeline| pipeline.transports.add(transport));
    }

    /// Register a closure as a transport
    pub fn add_sink<F>(&self, sink: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.add_transport(FnTransport::new(sink));
    }

    pub fn remove_all_transports(&self) {
        self.submit("remove_all_transports", |pipeline| {
            pipeline.transports.remove_all()
        });
    }

    /// Number of registered transports
    pub fn transport_count(&self) -> usize {
        self.read("transport_count", |pipeline| pipeline.transports.len(), 0)
    }

    /// Only deliver entries carrying `tag` (or another restricted tag)
    pub fn restrict_to(&self, tag: impl Into<String>) {
        self.restrict_to_tags([tag.into()]);
    }

    pub fn restrict_to_tags<I, S>(&self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.submit("restrict_to", move |pipeline| pipeline.filter.restrict_to(tags));
    }

    /// Never deliver entries carrying `tag`
    pub fn suppress(&self, tag: impl Into<String>) {
        self.suppress_tags([tag.into()]);
    }

    pub fn suppress_tags<I, S>(&self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.submit("suppress", move |pipeline| pipeline.filter.suppress(tags));
    }

    pub fn enabled(&self) -> bool {
        self.read(
            "enabled",
            |pipeline| pipeline.settings.enabled,
            self.initial.enabled,
        )
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.submit("set_enabled", move |pipeline| {
            pipeline.settings.enabled = enabled
        });
    }

    pub fn output_tags(&self) -> bool {
        self.read(
            "output_tags",
            |pipeline| pipeline.settings.output_tags,
            self.initial.output_tags,
        )
    }

    pub fn set_output_tags(&self, output_tags: bool) {
        self.submit("set_output_tags", move |pipeline| {
            pipeline.settings.output_tags = output_tags
        });
    }

    pub fn label(&self) -> String {
        self.read(
            "label",
            |pipeline| pipeline.settings.label().to_string(),
            self.initial.label().to_string(),
        )
    }

    pub fn build_mode(&self) -> BuildMode {
        self.build_mode
    }

    /// Block until every unit of work submitted so far has been processed
    ///
    /// Called from inside a transport this returns immediately, since the
    /// worker cannot wait for itself.
    pub fn drain(&self) {
        if let Err(e) = self.worker.drain() {
            eprintln!("[LOGGER WARNING] drain skipped: {}", e);
        }
    }

    /// Flush every transport and wait for it
    pub fn flush(&self) {
        self.submit("flush", Pipeline::flush);
        self.drain();
    }

    /// Units of work queued but not yet processed
    pub fn outstanding(&self) -> usize {
        self.worker.outstanding()
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use tagged_logger::prelude::*;
    ///
    /// let logger = Logger::new("Demo").unwrap();
    /// tagged_logger::info!(logger, "nobody is listening");
    /// logger.drain();
    ///
    /// assert_eq!(logger.metrics().dropped(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>, site: CallSite) {
        self.log(LogLevel::Trace, || message, site);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>, site: CallSite) {
        self.log(LogLevel::Debug, || message, site);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>, site: CallSite) {
        self.log(LogLevel::Info, || message, site);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>, site: CallSite) {
        self.log(LogLevel::Warn, || message, site);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>, site: CallSite) {
        self.log(LogLevel::Error, || message, site);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>, site: CallSite) {
        self.log(LogLevel::Fatal, || message, site);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Pending entries still run; the worker drains its queue before exiting
        self.submit("shutdown flush", Pipeline::flush);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("label", &self.initial.label())
            .field("build_mode", &self.build_mode)
            .field("outstanding", &self.worker.outstanding())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use tagged_logger::prelude::*;
///
/// let capture = MemoryTransport::new();
/// let logger = Logger::builder()
///     .label("Payments")
///     .restrict_to("billing")
///     .transport(capture.clone())
///     .build()
///     .unwrap();
///
/// tagged_logger::log!(logger, LogOptions::new(LogLevel::Info).tag("billing"); "charged {}", 42);
/// tagged_logger::info!(logger, "not billing related");
/// logger.drain();
///
/// assert_eq!(capture.len(), 1);
/// assert!(capture.contains("charged 42"));
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    transports: Vec<Box<dyn Transport>>,
    force_output: Option<Box<dyn Transport>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            transports: Vec::new(),
            force_output: None,
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Prefix written at the start of every line
    #[must_use = "builder methods return a new value"]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_tags(mut self, output_tags: bool) -> Self {
        self.config.output_tags = output_tags;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn restrict_to(mut self, tag: impl Into<String>) -> Self {
        self.config.allowed_tags.push(tag.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn suppress(mut self, tag: impl Into<String>) -> Self {
        self.config.ignored_tags.push(tag.into());
        self
    }

    /// Override the build mode detected from `debug_assertions`
    #[must_use = "builder methods return a new value"]
    pub fn build_mode(mut self, build_mode: BuildMode) -> Self {
        self.config.build_mode = build_mode;
        self
    }

    /// Add a transport
    #[must_use = "builder methods return a new value"]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transports.push(Box::new(transport));
        self
    }

    /// Add a closure as a transport
    #[must_use = "builder methods return a new value"]
    pub fn sink<F>(self, sink: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.transport(FnTransport::new(sink))
    }

    /// Sink for forced entries; defaults to [`ConsoleTransport`] on stdout
    #[must_use = "builder methods return a new value"]
    pub fn force_output<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.force_output = Some(Box::new(transport));
        self
    }

    /// Build the Logger, spawning its worker thread
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;

        let metrics = Arc::new(LoggerMetrics::new());
        let settings = self.config.settings();

        let mut filter = TagFilter::new();
        filter.restrict_to(self.config.allowed_tags.iter().cloned());
        filter.suppress(self.config.ignored_tags.iter().cloned());

        let mut transports = TransportRegistry::new();
        for transport in self.transports {
            transports.add(transport);
        }

        let pipeline = Pipeline {
            settings: settings.clone(),
            filter,
            transports,
            force_output: self
                .force_output
                .unwrap_or_else(|| Box::new(ConsoleTransport::new())),
            metrics: Arc::clone(&metrics),
        };

        let worker_name = if self.config.label.is_empty() {
            "log-worker".to_string()
        } else {
            format!("{}-log-worker", self.config.label)
        };
        let worker = OrderedWorker::spawn(worker_name, pipeline)?;

        Ok(Logger {
            worker,
            metrics,
            started: Instant::now(),
            build_mode: self.config.build_mode,
            initial: settings,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<LoggerConfig> for LoggerBuilder {
    fn from(config: LoggerConfig) -> Self {
        Self::new().config(config)
    }
}

impl TryFrom<LoggerConfig> for Logger {
    type Error = LoggerError;

    fn try_from(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::from(config).build()
    }
}
