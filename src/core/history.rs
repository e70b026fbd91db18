//! Phase transition history.
//!
//! Immutable log of the phases a tracker went through. Every `record`
//! returns a new history; the tracker swaps it in under its lock.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single phase change.
///
/// # Example
///
/// ```rust
/// use promised::core::{Phase, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Phase::Pending,
///     to: Phase::Resolved,
///     timestamp: Utc::now(),
///     generation: 1,
/// };
/// assert_eq!(transition.generation, 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The phase being left
    pub from: S,
    /// The phase being entered
    pub to: S,
    /// When the change was observed
    pub timestamp: DateTime<Utc>,
    /// Tracker generation that caused the change
    pub generation: u64,
}

/// Ordered history of phase transitions.
///
/// # Example
///
/// ```rust
/// use promised::core::{Phase, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: Phase::Idle,
///         to: Phase::Pending,
///         timestamp: Utc::now(),
///         generation: 1,
///     })
///     .record(StateTransition {
///         from: Phase::Pending,
///         to: Phase::Resolved,
///         timestamp: Utc::now(),
///         generation: 1,
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Phase::Idle, &Phase::Pending, &Phase::Resolved]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Keep only the `limit` most recent transitions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use promised::core::{Phase, StateHistory, StateTransition};
    /// use chrono::Utc;
    ///
    /// let mut history = StateHistory::new();
    /// for generation in 1..=5 {
    ///     history = history.record(StateTransition {
    ///         from: Phase::Idle,
    ///         to: Phase::Pending,
    ///         timestamp: Utc::now(),
    ///         generation,
    ///     });
    /// }
    ///
    /// let trimmed = history.retain_last(2);
    /// assert_eq!(trimmed.transitions().len(), 2);
    /// assert_eq!(trimmed.transitions()[0].generation, 4);
    /// ```
    pub fn retain_last(&self, limit: usize) -> Self {
        let skip = self.transitions.len().saturating_sub(limit);
        Self {
            transitions: self.transitions[skip..].to_vec(),
        }
    }

    /// Get the path of phases traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
