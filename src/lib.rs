//! Promised: render pending, resolved and rejected states of an async value
//!
//! Promised tracks the lifecycle of one promise at a time and exposes it as a
//! small read-only record that a presentation layer can read on every render.
//! The tracker is the imperative shell (tasks, timers, notification); the
//! record, phases and view selection form a pure core.
//!
//! # Core Concepts
//!
//! - **Snapshot**: `{ is_pending, is_delay_over, data, error }`
//! - **Pending delay**: the pending view is suppressed until a delay elapsed,
//!   so fast promises do not flash a loading state
//! - **Generations**: a settlement only writes back if its promise is still
//!   the tracked one
//! - **Views**: a pure function picks `Pending`, `Resolved`, `Rejected` or
//!   `Suppressed` from a snapshot
//!
//! # Example
//!
//! ```rust
//! use promised::tracker::PromiseTracker;
//! use promised::view::{select_view, View};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let tracker = PromiseTracker::<u32, String>::builder()
//!     .pending_delay(Duration::from_millis(200))
//!     .build()
//!     .unwrap();
//!
//! tracker.track(std::future::pending());
//! assert_eq!(select_view(&tracker.snapshot()), View::Suppressed);
//!
//! let mut updates = tracker.subscribe();
//! updates.wait_for(|s| s.is_delay_over).await.unwrap();
//! assert_eq!(select_view(&tracker.snapshot()), View::Pending(None));
//! # }
//! ```

pub mod config;
pub mod core;
pub mod tracker;
pub mod view;

// Re-export commonly used types
pub use crate::config::TrackerConfig;
pub use crate::core::{Phase, Snapshot, State, StateHistory, StateTransition};
pub use crate::tracker::{Awaitable, BuildError, PromiseTracker, TrackerBuilder};
pub use crate::view::{select_view, Slots, View, ViewError};
