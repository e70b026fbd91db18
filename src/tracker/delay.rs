//! One-shot pending-delay timer.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Owns at most one scheduled timer task.
///
/// Scheduling a new timer aborts the previous one, so only the most recently
/// scheduled callback can ever run. Dropping the timer aborts it as well.
#[derive(Debug, Default)]
pub struct DelayTimer {
    task: Option<JoinHandle<()>>,
}

impl DelayTimer {
    pub fn new() -> Self {
        Self { task: None }
    }

    /// Schedule `on_elapsed` to run once `delay` has passed.
    ///
    /// The deadline is fixed now, not when the spawned task is first polled.
    pub fn schedule<F>(&mut self, runtime: &Handle, delay: Duration, on_elapsed: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let deadline = Instant::now() + delay;
        self.task = Some(runtime.spawn(async move {
            sleep_until(deadline).await;
            on_elapsed();
        }));
    }

    /// Abort the scheduled timer. Returns whether one was held.
    pub fn cancel(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    /// A timer is held and has not finished yet.
    pub fn is_scheduled(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for DelayTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
