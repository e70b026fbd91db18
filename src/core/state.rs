//! Lifecycle states of a tracked promise.
//!
//! The `State` trait describes any phase enum that can be logged in a
//! `StateHistory`; `Phase` is the one the tracker itself derives from its
//! snapshot.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle phases.
///
/// All methods are pure. Phases are plain values describing where the
/// current promise is in its lifecycle.
///
/// # Required Traits
///
/// - `Clone`: phases are copied into history records
/// - `PartialEq`: phase changes are detected by comparison
/// - `Debug`: phases are logged
/// - `Serialize` + `Deserialize`: histories can be persisted
///
/// # Example
///
/// ```rust
/// use promised::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum FetchPhase {
///     Waiting,
///     Done,
///     Failed,
/// }
///
/// impl State for FetchPhase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Waiting => "Waiting",
///             Self::Done => "Done",
///             Self::Failed => "Failed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Done | Self::Failed)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Failed)
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the phase's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this phase ends the lifecycle of the current promise.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this phase represents a rejection.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Phase of the promise currently held by a tracker.
///
/// `Resolved` and `Rejected` are final only for the current generation:
/// setting a new promise moves the tracker back to `Pending`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// No promise is tracked.
    Idle,
    /// The current promise has not settled yet.
    Pending,
    /// The current promise resolved.
    Resolved,
    /// The current promise rejected.
    Rejected,
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Phase::Idle => "Idle",
            Phase::Pending => "Pending",
            Phase::Resolved => "Resolved",
            Phase::Rejected => "Rejected",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Phase::Resolved | Phase::Rejected)
    }

    fn is_error(&self) -> bool {
        matches!(self, Phase::Rejected)
    }
}

impl Phase {
    /// Derive the phase from the raw tracker fields.
    ///
    /// A rejection wins over everything else, mirroring view selection.
    pub fn derive(tracking: bool, is_pending: bool, has_error: bool) -> Self {
        if !tracking {
            Phase::Idle
        } else if has_error {
            Phase::Rejected
        } else if !is_pending {
            Phase::Resolved
        } else {
            Phase::Pending
        }
    }
}
