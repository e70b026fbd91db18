//! The promise tracker: the imperative shell around [`crate::core`].
//!
//! A [`PromiseTracker`] owns one [`Snapshot`] and keeps it in step with the
//! promise it currently tracks:
//!
//! - **Generations**: every `set` bumps a counter. Settlement and timer tasks
//!   capture the generation they were started for and only write back if it
//!   is still current, so a slow promise can never overwrite a newer one.
//! - **Pending delay**: a one-shot [`DelayTimer`] flips `is_delay_over` once
//!   the configured delay has passed. Only the latest timer can fire.
//! - **Notification**: every mutation is published on a `tokio::sync::watch`
//!   channel returned by [`PromiseTracker::subscribe`].
//!
//! In-flight promises are never cancelled by `set`; their result is simply
//! discarded when they settle. Dropping the tracker aborts all of them.

mod builder;
mod delay;
mod error;

pub use builder::TrackerBuilder;
pub use delay::DelayTimer;
pub use error::BuildError;

use crate::core::{Phase, Snapshot, StateHistory, StateTransition};
use chrono::Utc;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// A snapshot taken under the state lock, sent once the lock is released.
struct Publication<T, E> {
    sequence: u64,
    snapshot: Snapshot<T, E>,
}

/// A boxed awaitable whose rejection reason is `E`.
pub type Awaitable<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

/// Tracks the lifecycle of one promise at a time.
///
/// # Example
///
/// ```rust
/// use promised::tracker::PromiseTracker;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let tracker = PromiseTracker::<String, String>::builder()
///     .pending_delay(Duration::ZERO)
///     .build()
///     .unwrap();
///
/// let mut updates = tracker.subscribe();
/// tracker.track(async { Ok("foo".to_string()) });
///
/// updates
///     .wait_for(|snapshot| !snapshot.is_pending)
///     .await
///     .unwrap();
///
/// let snapshot = tracker.snapshot();
/// assert_eq!(snapshot.data.as_deref(), Some("foo"));
/// assert!(snapshot.error.is_none());
/// # }
/// ```
pub struct PromiseTracker<T, E> {
    shared: Arc<Shared<T, E>>,
    runtime: Handle,
}

struct Shared<T, E> {
    inner: Mutex<Inner<T, E>>,
    notify: watch::Sender<Snapshot<T, E>>,
    // Sequence of the last snapshot handed to `notify`.
    delivered: Mutex<u64>,
}

struct Inner<T, E> {
    snapshot: Snapshot<T, E>,
    tracking: bool,
    generation: u64,
    pending_delay: Duration,
    timer: DelayTimer,
    settlements: Vec<JoinHandle<()>>,
    sequence: u64,
    phase: Phase,
    history: StateHistory<Phase>,
    history_limit: usize,
}

impl<T, E> PromiseTracker<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Start building a tracker.
    pub fn builder() -> TrackerBuilder<T, E> {
        TrackerBuilder::new()
    }

    /// Build a tracker with the default configuration on the current runtime.
    pub fn new() -> Result<Self, BuildError> {
        TrackerBuilder::new().build()
    }

    pub(crate) fn from_parts(runtime: Handle, pending_delay: Duration, history_limit: usize) -> Self {
        let (notify, _) = watch::channel(Snapshot::default());
        let inner = Inner {
            snapshot: Snapshot::default(),
            tracking: false,
            generation: 0,
            pending_delay,
            timer: DelayTimer::new(),
            settlements: Vec::new(),
            sequence: 0,
            phase: Phase::Idle,
            history: StateHistory::new(),
            history_limit,
        };

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(inner),
                notify,
                delivered: Mutex::new(0),
            }),
            runtime,
        }
    }

    /// Replace the tracked promise, or stop tracking with `None`.
    ///
    /// Always resets `is_pending` to `true` and clears `error`. With `None`
    /// the data is cleared and the delay timer cancelled. With a promise the
    /// delay restarts and the promise is awaited on the runtime; `data` keeps
    /// the previous value until the new promise resolves.
    pub fn set(&self, promise: Option<Awaitable<T, E>>) {
        let publication = {
            let mut inner = self.shared.lock();
            self.replace(&mut inner, promise);
            self.shared.publish(&mut inner)
        };
        self.shared.deliver(publication);
    }

    fn replace(&self, inner: &mut Inner<T, E>, promise: Option<Awaitable<T, E>>) {
        inner.generation += 1;
        let generation = inner.generation;

        inner.snapshot.is_pending = true;
        inner.snapshot.error = None;

        let Some(promise) = promise else {
            inner.tracking = false;
            inner.snapshot.data = None;
            inner.snapshot.is_delay_over = false;
            inner.timer.cancel();
            debug!(generation, "promise cleared");
            return;
        };

        inner.tracking = true;
        self.setup_delay(inner, generation);
        debug!(generation, delay = ?inner.pending_delay, "tracking new promise");

        let weak = Arc::downgrade(&self.shared);
        inner.settlements.retain(|task| !task.is_finished());
        inner.settlements.push(self.runtime.spawn(async move {
            let outcome = promise.await;
            if let Some(shared) = weak.upgrade() {
                shared.settle(generation, outcome);
            }
        }));
    }

    /// Track a future. Shorthand for `set(Some(Box::pin(future)))`.
    pub fn track<F>(&self, promise: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.set(Some(Box::pin(promise)));
    }

    /// Stop tracking. Shorthand for `set(None)`.
    pub fn clear(&self) {
        self.set(None);
    }

    /// Change the pending delay used by the next `set`.
    ///
    /// The current promise and a delay already running are left alone.
    pub fn set_pending_delay(&self, delay: Duration) {
        let mut inner = self.shared.lock();
        inner.pending_delay = delay;
        debug!(?delay, "pending delay updated");
    }

    fn setup_delay(&self, inner: &mut Inner<T, E>, generation: u64) {
        if inner.pending_delay.is_zero() {
            inner.timer.cancel();
            inner.snapshot.is_delay_over = true;
            return;
        }

        inner.snapshot.is_delay_over = false;
        let weak: Weak<Shared<T, E>> = Arc::downgrade(&self.shared);
        let delay = inner.pending_delay;
        inner.timer.schedule(&self.runtime, delay, move || {
            if let Some(shared) = weak.upgrade() {
                shared.delay_elapsed(generation);
            }
        });
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> Snapshot<T, E> {
        self.shared.lock().snapshot.clone()
    }

    /// Receive every published snapshot.
    ///
    /// Snapshots are sent after the tracker's state lock is released, so a
    /// receiver may call back into the tracker while it holds a borrow.
    /// Calling `set` while holding a borrow on the same thread still
    /// deadlocks, as with any `watch` sender.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T, E>> {
        self.shared.notify.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.shared.lock().phase
    }

    /// Phase changes observed so far, bounded by the history limit.
    pub fn history(&self) -> StateHistory<Phase> {
        self.shared.lock().history.clone()
    }

    /// Number of `set` calls so far.
    pub fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    pub fn pending_delay(&self) -> Duration {
        self.shared.lock().pending_delay
    }

    /// A promise is currently tracked (it may already have settled).
    pub fn is_tracking(&self) -> bool {
        self.shared.lock().tracking
    }

    /// A delay timer is scheduled and has not fired yet.
    pub fn is_delay_scheduled(&self) -> bool {
        self.shared.lock().timer.is_scheduled()
    }
}

impl<T, E> Shared<T, E> {
    fn lock(&self) -> MutexGuard<'_, Inner<T, E>> {
        // Every critical section leaves the record consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T, E> Shared<T, E>
where
    T: Clone,
    E: Clone,
{
    fn settle(&self, generation: u64, outcome: Result<T, E>) {
        let publication = {
            let mut inner = self.lock();
            if inner.generation != generation {
                debug!(generation, current = inner.generation, "discarding stale settlement");
                return;
            }
            Self::apply(&mut inner, generation, outcome);
            self.publish(&mut inner)
        };
        self.deliver(publication);
    }

    fn apply(inner: &mut Inner<T, E>, generation: u64, outcome: Result<T, E>) {
        match outcome {
            Ok(value) => {
                trace!(generation, "promise resolved");
                inner.snapshot.data = Some(value);
            }
            Err(reason) => {
                trace!(generation, "promise rejected");
                inner.snapshot.error = Some(reason);
            }
        }
        inner.snapshot.is_pending = false;
    }

    fn delay_elapsed(&self, generation: u64) {
        let publication = {
            let mut inner = self.lock();
            if inner.generation != generation {
                return;
            }

            trace!(generation, "pending delay elapsed");
            inner.snapshot.is_delay_over = true;
            self.publish(&mut inner)
        };
        self.deliver(publication);
    }

    /// Derive the phase, record the transition and stamp a new snapshot.
    fn publish(&self, inner: &mut Inner<T, E>) -> Publication<T, E> {
        let phase = Phase::derive(
            inner.tracking,
            inner.snapshot.is_pending,
            inner.snapshot.error.is_some(),
        );

        if phase != inner.phase {
            if inner.history_limit > 0 {
                let transition = StateTransition {
                    from: inner.phase,
                    to: phase,
                    timestamp: Utc::now(),
                    generation: inner.generation,
                };
                inner.history = inner
                    .history
                    .record(transition)
                    .retain_last(inner.history_limit);
            }
            inner.phase = phase;
        }

        inner.sequence += 1;
        Publication {
            sequence: inner.sequence,
            snapshot: inner.snapshot.clone(),
        }
    }

    /// Send a publication unless a newer one already went out.
    fn deliver(&self, publication: Publication<T, E>) {
        let mut delivered = self
            .delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if publication.sequence <= *delivered {
            trace!(sequence = publication.sequence, "skipping superseded snapshot");
            return;
        }
        *delivered = publication.sequence;
        self.notify.send_replace(publication.snapshot);
    }
}

impl<T, E> Drop for PromiseTracker<T, E> {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        inner.timer.cancel();
        for task in inner.settlements.drain(..) {
            task.abort();
        }
    }
}

impl<T, E> std::fmt::Debug for PromiseTracker<T, E>
where
    T: std::fmt::Debug,
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.lock();
        f.debug_struct("PromiseTracker")
            .field("snapshot", &inner.snapshot)
            .field("generation", &inner.generation)
            .field("phase", &inner.phase)
            .field("pending_delay", &inner.pending_delay)
            .finish()
    }
}
