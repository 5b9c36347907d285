//! Ordered worker
//!
//! A single named thread that owns a piece of state and runs submitted
//! units of work against it strictly in FIFO order. Every submission bumps
//! an outstanding counter that the unit decrements once it has run, which
//! is what [`OrderedWorker::drain`] waits on.

use super::error::{LoggerError, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

/// Default shutdown timeout for worker cleanup (5 seconds)
///
/// Used when the owner is dropped; pending work keeps running past it but
/// the owner stops waiting.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

type Job<S> = Box<dyn FnOnce(&mut S) + Send>;

#[derive(Debug, Default)]
struct Outstanding {
    count: Mutex<usize>,
    idle: Condvar,
}

impl Outstanding {
    fn begin(&self) {
        *self.count.lock() += 1;
    }

    fn complete(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.idle.notify_all();
        }
    }

    fn wait_idle(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.idle.wait(&mut count);
        }
    }

    fn get(&self) -> usize {
        *self.count.lock()
    }
}

pub struct OrderedWorker<S: Send + 'static> {
    sender: Option<Sender<Job<S>>>,
    handle: Option<JoinHandle<()>>,
    outstanding: Arc<Outstanding>,
    thread_id: ThreadId,
}

impl<S: Send + 'static> OrderedWorker<S> {
    /// Spawn the worker thread, moving `state` onto it
    pub fn spawn(name: impl Into<String>, state: S) -> Result<Self> {
        let name = name.into();
        let (sender, receiver) = unbounded::<Job<S>>();
        let outstanding = Arc::new(Outstanding::default());
        let outstanding_clone = Arc::clone(&outstanding);

        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || Self::run(receiver, state, &outstanding_clone))
            .map_err(|e| LoggerError::worker_spawn(name, e))?;

        Ok(Self {
            sender: Some(sender),
            thread_id: handle.thread().id(),
            handle: Some(handle),
            outstanding,
        })
    }

    fn run(receiver: Receiver<Job<S>>, mut state: S, outstanding: &Outstanding) {
        // Runs until every sender is gone and the queue is empty
        for job in receiver.iter() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| job(&mut state)));
            if result.is_err() {
                eprintln!(
                    "[LOGGER CRITICAL] Unit of work panicked on the log worker. \
                     Later work continues to run."
                );
            }
            outstanding.complete();
        }
    }

    /// True when called from the worker thread itself
    pub fn is_worker_thread(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    /// Enqueue a unit of work without blocking
    pub fn submit(&self, job: impl FnOnce(&mut S) + Send + 'static) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(LoggerError::WorkerUnavailable)?;

        self.outstanding.begin();
        if sender.send(Box::new(job)).is_err() {
            self.outstanding.complete();
            return Err(LoggerError::WorkerUnavailable);
        }
        Ok(())
    }

    /// Run `f` on the worker and wait for its result
    ///
    /// Observes every unit of work submitted before it from the calling
    /// thread.
    pub fn query<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut S) -> R + Send + 'static,
    {
        if self.is_worker_thread() {
            return Err(LoggerError::reentrant("query"));
        }

        let (reply, response) = bounded(1);
        self.submit(move |state| {
            let _ = reply.send(f(state));
        })?;
        response.recv().map_err(|_| LoggerError::WorkerUnavailable)
    }

    /// Block until every unit of work submitted so far has run
    pub fn drain(&self) -> Result<()> {
        if self.is_worker_thread() {
            return Err(LoggerError::reentrant("drain"));
        }
        self.outstanding.wait_idle();
        Ok(())
    }

    /// Units of work submitted but not yet finished
    pub fn outstanding(&self) -> usize {
        self.outstanding.get()
    }

    /// Close the queue and wait up to `timeout` for the worker to finish
    ///
    /// Returns `true` if the worker finished all pending work in time.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());

        let Some(handle) = self.handle.take() else {
            return true;
        };

        // Joining ourselves would never finish
        if self.is_worker_thread() {
            return false;
        }

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Log worker thread panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Log worker did not finish within {:?}. \
                     Pending lines may be lost.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl<S: Send + 'static> Drop for OrderedWorker<S> {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_run_in_submission_order() {
        let worker = OrderedWorker::spawn("order-test", Vec::new()).unwrap();
        for i in 0..100 {
            worker.submit(move |seen: &mut Vec<i32>| seen.push(i)).unwrap();
        }

        let seen = worker.query(|seen: &mut Vec<i32>| seen.clone()).unwrap();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_drain_waits_for_outstanding_work() {
        let worker = OrderedWorker::spawn("drain-test", 0u32).unwrap();
        for _ in 0..10 {
            worker
                .submit(|n: &mut u32| {
                    thread::sleep(Duration::from_millis(2));
                    *n += 1;
                })
                .unwrap();
        }

        worker.drain().unwrap();
        assert_eq!(worker.outstanding(), 0);
        assert_eq!(worker.query(|n: &mut u32| *n).unwrap(), 10);
    }

    #[test]
    fn test_panicking_unit_does_not_stop_worker() {
        let worker = OrderedWorker::spawn("panic-test", 0u32).unwrap();
        worker.submit(|_: &mut u32| panic!("boom")).unwrap();
        worker.submit(|n: &mut u32| *n += 1).unwrap();

        worker.drain().unwrap();
        assert_eq!(worker.query(|n: &mut u32| *n).unwrap(), 1);
    }

    #[test]
    fn test_reentrant_drain_is_rejected() {
        let worker = Arc::new(OrderedWorker::spawn("reentrant-test", None).unwrap());
        let inner = Arc::clone(&worker);
        let (tx, rx) = bounded(1);

        worker
            .submit(move |_: &mut Option<()>| {
                let _ = tx.send(inner.drain().is_err());
            })
            .unwrap();

        assert!(rx.recv().unwrap());
    }

    #[test]
    fn test_shutdown_runs_pending_work() {
        let counter = Arc::new(Mutex::new(0u32));
        let mut worker = OrderedWorker::spawn("shutdown-test", Arc::clone(&counter)).unwrap();
        for _ in 0..20 {
            worker.submit(|c: &mut Arc<Mutex<u32>>| *c.lock() += 1).unwrap();
        }

        assert!(worker.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));
        assert_eq!(*counter.lock(), 20);
        assert!(worker.submit(|_| {}).is_err());
    }
}
