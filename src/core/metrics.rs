//! Logger metrics for observability
//!
//! Counters are written by the worker thread only and may be read from
//! anywhere. Read them after [`Logger::drain`](crate::Logger::drain) for
//! exact values.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use tagged_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_delivered();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.filtered(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries handed to the transport registry
    delivered: AtomicU64,

    /// Entries rejected by the tag filter
    filtered: AtomicU64,

    /// Entries rejected before formatting (disabled, no transports, build mode)
    dropped: AtomicU64,

    /// Entries written through the force console path
    forced: AtomicU64,

    /// Individual transport sends that returned an error or panicked
    transport_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            forced: AtomicU64::new(0),
            transport_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn forced(&self) -> u64 {
        self.forced.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn transport_failures(&self) -> u64 {
        self.transport_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_forced(&self) -> u64 {
        self.forced.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_transport_failure(&self) -> u64 {
        self.transport_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of processed entries that never reached a transport, as a
    /// percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been processed.
    pub fn drop_rate(&self) -> f64 {
        let lost = (self.dropped() + self.filtered()) as f64;
        let total = self.delivered() as f64 + lost;
        if total == 0.0 {
            0.0
        } else {
            (lost / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.forced.store(0, Ordering::Relaxed);
        self.transport_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            delivered: AtomicU64::new(self.delivered()),
            filtered: AtomicU64::new(self.filtered()),
            dropped: AtomicU64::new(self.dropped()),
            forced: AtomicU64::new(self.forced()),
            transport_failures: AtomicU64::new(self.transport_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.filtered(), 0);
        assert_eq!(metrics.dropped(), 0);
        assert_eq!(metrics.forced(), 0);
        assert_eq!(metrics.transport_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_dropped(), 0);
        assert_eq!(metrics.record_dropped(), 1);
        assert_eq!(metrics.dropped(), 2);
    }

    #[test]
    fn test_drop_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_delivered();
        }
        for _ in 0..5 {
            metrics.record_dropped();
            metrics.record_filtered();
        }

        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_delivered();
        metrics.record_forced();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.delivered(), 0);
        assert_eq!(snapshot.delivered(), 1);
        assert_eq!(snapshot.forced(), 1);
    }
}
