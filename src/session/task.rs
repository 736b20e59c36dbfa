//! Cancellable repeating task.
//!
//! Runs a closure on a background thread at a fixed interval. The first
//! tick happens immediately. The task stops when `stop()` is called, when
//! it is dropped, or when the closure returns `ControlFlow::Break`.

use log::debug;
use std::ops::ControlFlow;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

pub struct RepeatingTask {
    name: String,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTask {
    /// Start ticking `tick` every `interval`
    pub fn start<F>(name: impl Into<String>, interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let name = name.into();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread_name = name.clone();

        let handle = std::thread::spawn(move || loop {
            if tick().is_break() {
                debug!("Task '{}' finished on its own", thread_name);
                break;
            }
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                // explicit stop, or the owner went away
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        debug!("Started task '{}' every {:?}", name, interval);

        Self {
            name,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Whether the background thread is still running
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the task to stop and wait for its thread to exit
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // the thread may already have exited on its own
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                debug!("Task '{}' panicked", self.name);
            }
            debug!("Stopped task '{}'", self.name);
        }
    }

    /// Block until the task ends on its own
    pub fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_first_tick_is_immediate() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        let task = RepeatingTask::start("probe", Duration::from_secs(60), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Break(())
        });
        task.wait();

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stop_halts_ticks() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        let mut task = RepeatingTask::start("poll", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        });
        std::thread::sleep(Duration::from_millis(30));
        task.stop();

        let after_stop = ticks.load(Ordering::SeqCst);
        assert!(after_stop >= 1);
        assert!(!task.is_running());

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_break_ends_task() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        let task = RepeatingTask::start("three", Duration::from_millis(1), move || {
            if counter.fetch_add(1, Ordering::SeqCst) + 1 >= 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        task.wait();

        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }
}
