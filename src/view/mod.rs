//! Choosing what to show for a snapshot.
//!
//! [`select_view`] is a pure function from a [`Snapshot`] to a [`View`].
//! [`Slots`] builds on it to dispatch to caller-supplied branches, reporting
//! a missing branch as a [`ViewError`] instead of showing nothing.

mod error;
mod slots;

pub use error::{SlotName, ViewError};
pub use slots::Slots;

use crate::core::Snapshot;

/// The branch a presentation layer should show.
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a, T, E> {
    /// Pending, but the delay has not elapsed: show nothing.
    Suppressed,
    /// Pending and the delay elapsed. Carries the previous data, if any.
    Pending(Option<&'a T>),
    /// The current promise resolved.
    Resolved(Option<&'a T>),
    /// The current promise rejected.
    Rejected(&'a E),
}

impl<T, E> Clone for View<'_, T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E> Copy for View<'_, T, E> {}

impl<T, E> View<'_, T, E> {
    /// The slot that renders this view, or `None` for `Suppressed`.
    pub fn slot(&self) -> Option<SlotName> {
        match self {
            View::Suppressed => None,
            View::Pending(_) => Some(SlotName::Pending),
            View::Resolved(_) => Some(SlotName::Resolved),
            View::Rejected(_) => Some(SlotName::Rejected),
        }
    }
}

/// Select the view for a snapshot.
///
/// Precedence: an error wins, then a settled value, then the pending view
/// once the delay is over. Otherwise the view is suppressed.
///
/// # Example
///
/// ```rust
/// use promised::core::Snapshot;
/// use promised::view::{select_view, View};
///
/// let snapshot: Snapshot<&str, &str> = Snapshot {
///     is_pending: false,
///     is_delay_over: true,
///     data: Some("foo"),
///     error: None,
/// };
/// assert_eq!(select_view(&snapshot), View::Resolved(Some(&"foo")));
/// ```
pub fn select_view<T, E>(snapshot: &Snapshot<T, E>) -> View<'_, T, E> {
    if let Some(error) = &snapshot.error {
        View::Rejected(error)
    } else if !snapshot.is_pending {
        View::Resolved(snapshot.data.as_ref())
    } else if snapshot.is_delay_over {
        View::Pending(snapshot.data.as_ref())
    } else {
        View::Suppressed
    }
}
