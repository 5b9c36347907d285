//! Transport trait for formatted log lines and the ordered registry that
//! dispatches to them

use super::error::Result;
use super::metrics::LoggerMetrics;

pub trait Transport: Send {
    fn send(&mut self, line: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Adapter turning a closure into a [`Transport`]
pub struct FnTransport<F> {
    sink: F,
}

impl<F> FnTransport<F>
where
    F: FnMut(&str) + Send,
{
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<F> Transport for FnTransport<F>
where
    F: FnMut(&str) + Send,
{
    fn send(&mut self, line: &str) -> Result<()> {
        (self.sink)(line);
        Ok(())
    }

    fn name(&self) -> &str {
        "fn"
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Send `line` to a single transport, containing errors and panics
///
/// Returns `true` when the transport accepted the line.
pub(crate) fn send_isolated(transport: &mut dyn Transport, idx: usize, line: &str) -> bool {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| transport.send(line)));

    match result {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            eprintln!(
                "[LOGGER ERROR] Transport #{} ({}) failed: {}",
                idx,
                transport.name(),
                e
            );
            false
        }
        Err(panic_info) => {
            eprintln!(
                "[LOGGER CRITICAL] Transport #{} ({}) panicked: {}. \
                 Other transports continue to function.",
                idx,
                transport.name(),
                panic_message(&*panic_info)
            );
            false
        }
    }
}

/// Transports in registration order
///
/// Duplicates are kept: a transport registered twice receives every line
/// twice.
#[derive(Default)]
pub struct TransportRegistry {
    transports: Vec<Box<dyn Transport>>,
}

impl TransportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, transport: Box<dyn Transport>) {
        self.transports.push(transport);
    }

    pub fn remove_all(&mut self) {
        self.transports.clear();
    }

    pub fn len(&self) -> usize {
        self.transports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    /// Hand `line` to every transport in order
    pub fn dispatch(&mut self, line: &str, metrics: &LoggerMetrics) {
        for (idx, transport) in self.transports.iter_mut().enumerate() {
            if !send_isolated(transport.as_mut(), idx, line) {
                metrics.record_transport_failure();
            }
        }
    }

    pub fn flush(&mut self) {
        for (idx, transport) in self.transports.iter_mut().enumerate() {
            let flush_result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| transport.flush()));

            match flush_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Transport #{} flush failed: {}", idx, e);
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Transport #{} panicked during flush: {}. \
                         Other transports continue to function.",
                        idx,
                        panic_message(&*panic_info)
                    );
                }
            }
        }
    }
}

impl std::fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.transports.iter().map(|t| t.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Failing;

    impl Transport for Failing {
        fn send(&mut self, _line: &str) -> Result<()> {
            Err(LoggerError::other("simulated failure"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Panicking;

    impl Transport for Panicking {
        fn send(&mut self, _line: &str) -> Result<()> {
            panic!("transport exploded");
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn recorder(seen: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Box<dyn Transport> {
        let seen = Arc::clone(seen);
        Box::new(FnTransport::new(move |line: &str| {
            seen.lock().push(format!("{}:{}", tag, line));
        }))
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TransportRegistry::new();
        registry.add(recorder(&seen, "a"));
        registry.add(recorder(&seen, "b"));

        registry.dispatch("hello", &LoggerMetrics::new());

        assert_eq!(*seen.lock(), vec!["a:hello", "b:hello"]);
    }

    #[test]
    fn test_failures_do_not_stop_later_transports() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let metrics = LoggerMetrics::new();
        let mut registry = TransportRegistry::new();
        registry.add(Box::new(Failing));
        registry.add(Box::new(Panicking));
        registry.add(recorder(&seen, "ok"));

        registry.dispatch("line", &metrics);

        assert_eq!(*seen.lock(), vec!["ok:line"]);
        assert_eq!(metrics.transport_failures(), 2);
    }

    #[test]
    fn test_remove_all() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TransportRegistry::new();
        registry.add(recorder(&seen, "a"));
        registry.add(recorder(&seen, "a"));
        assert_eq!(registry.len(), 2);

        registry.remove_all();
        registry.dispatch("dropped", &LoggerMetrics::new());

        assert!(registry.is_empty());
        assert!(seen.lock().is_empty());
    }
}
