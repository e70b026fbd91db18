//! Builder for constructing promise trackers.

use crate::config::{delay_from_millis, TrackerConfig};
use crate::tracker::error::BuildError;
use crate::tracker::{Awaitable, PromiseTracker};
use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;

/// Builder for constructing trackers with a fluent API.
///
/// # Example
///
/// ```rust
/// use promised::tracker::TrackerBuilder;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let tracker = TrackerBuilder::<u32, String>::new()
///     .pending_delay(Duration::ZERO)
///     .promise(async { Ok(7) })
///     .build()
///     .unwrap();
///
/// assert!(tracker.snapshot().is_pending);
/// assert!(tracker.snapshot().is_delay_over);
/// # }
/// ```
pub struct TrackerBuilder<T, E> {
    pending_delay: Duration,
    history_limit: usize,
    runtime: Option<Handle>,
    promise: Option<Awaitable<T, E>>,
}

impl<T, E> TrackerBuilder<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::from_config(&TrackerConfig::default())
    }

    /// Create a builder seeded from a configuration.
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            pending_delay: config.pending_delay(),
            history_limit: config.history_limit,
            runtime: None,
            promise: None,
        }
    }

    /// Apply a configuration, replacing delay and history settings.
    pub fn config(mut self, config: &TrackerConfig) -> Self {
        self.pending_delay = config.pending_delay();
        self.history_limit = config.history_limit;
        self
    }

    /// Set the pending delay.
    pub fn pending_delay(mut self, delay: Duration) -> Self {
        self.pending_delay = delay;
        self
    }

    /// Set the pending delay in milliseconds; values `<= 0` disable it.
    pub fn pending_delay_millis(mut self, millis: i64) -> Self {
        self.pending_delay = delay_from_millis(millis);
        self
    }

    /// Bound the phase history. `0` disables recording.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Spawn timers and settlement tasks on this runtime.
    pub fn handle(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Start tracking this promise as soon as the tracker is built.
    pub fn promise<F>(mut self, promise: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.promise = Some(Box::pin(promise));
        self
    }

    /// Build the tracker.
    /// Returns an error if no runtime handle was given and none is current.
    pub fn build(self) -> Result<PromiseTracker<T, E>, BuildError> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| BuildError::NoRuntime)?,
        };

        let tracker = PromiseTracker::from_parts(runtime, self.pending_delay, self.history_limit);
        if let Some(promise) = self.promise {
            tracker.set(Some(promise));
        }

        Ok(tracker)
    }
}

impl<T, E> Default for TrackerBuilder<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> std::fmt::Debug for TrackerBuilder<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerBuilder")
            .field("pending_delay", &self.pending_delay)
            .field("history_limit", &self.history_limit)
            .field("has_runtime", &self.runtime.is_some())
            .field("has_promise", &self.promise.is_some())
            .finish()
    }
}
