//! Core tracker types.
//!
//! This module contains the pure part of the crate:
//! - Lifecycle phases via the `State` trait and the `Phase` enum
//! - The `Snapshot` record consumers read
//! - Immutable phase history
//!
//! Nothing in here spawns tasks or touches timers; that lives in
//! [`crate::tracker`].

mod history;
mod snapshot;
mod state;

pub use history::{StateHistory, StateTransition};
pub use snapshot::Snapshot;
pub use state::{Phase, State};
