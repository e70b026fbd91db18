//! Branch dispatch over a snapshot.

use crate::core::Snapshot;
use crate::view::error::{SlotName, ViewError};
use crate::view::{select_view, View};

type CombinedSlot<T, E, V> = Box<dyn Fn(&Snapshot<T, E>) -> Option<V> + Send + Sync>;
type DataSlot<T, V> = Box<dyn Fn(Option<&T>) -> Option<V> + Send + Sync>;
type ErrorSlot<E, V> = Box<dyn Fn(&E) -> Option<V> + Send + Sync>;

/// Caller-supplied branches, each producing a `V`.
///
/// A `combined` branch takes precedence and sees the whole snapshot. Without
/// it, [`select_view`] picks a branch and that branch must be present. A
/// branch returning `None` rendered nothing, which is reported as
/// [`ViewError::EmptySlot`].
///
/// # Example
///
/// ```rust
/// use promised::core::Snapshot;
/// use promised::view::Slots;
///
/// let slots: Slots<String, String, String> = Slots::new()
///     .resolved(|data| data.cloned())
///     .pending(|_| Some("loading".to_string()))
///     .rejected(|error| Some(format!("failed: {error}")));
///
/// let snapshot = Snapshot {
///     is_pending: false,
///     is_delay_over: true,
///     data: Some("foo".to_string()),
///     error: None,
/// };
/// assert_eq!(slots.render(&snapshot).unwrap(), Some("foo".to_string()));
/// ```
pub struct Slots<T, E, V> {
    combined: Option<CombinedSlot<T, E, V>>,
    resolved: Option<DataSlot<T, V>>,
    pending: Option<DataSlot<T, V>>,
    rejected: Option<ErrorSlot<E, V>>,
}

impl<T, E, V> Slots<T, E, V> {
    pub fn new() -> Self {
        Self {
            combined: None,
            resolved: None,
            pending: None,
            rejected: None,
        }
    }

    /// Render every state with one branch.
    pub fn combined<F>(mut self, slot: F) -> Self
    where
        F: Fn(&Snapshot<T, E>) -> Option<V> + Send + Sync + 'static,
    {
        self.combined = Some(Box::new(slot));
        self
    }

    /// Branch for a resolved promise (the "default" slot).
    pub fn resolved<F>(mut self, slot: F) -> Self
    where
        F: Fn(Option<&T>) -> Option<V> + Send + Sync + 'static,
    {
        self.resolved = Some(Box::new(slot));
        self
    }

    /// Branch for a pending promise once the delay elapsed.
    pub fn pending<F>(mut self, slot: F) -> Self
    where
        F: Fn(Option<&T>) -> Option<V> + Send + Sync + 'static,
    {
        self.pending = Some(Box::new(slot));
        self
    }

    pub fn rejected<F>(mut self, slot: F) -> Self
    where
        F: Fn(&E) -> Option<V> + Send + Sync + 'static,
    {
        self.rejected = Some(Box::new(slot));
        self
    }

    /// Which branches are present.
    pub fn provided(&self) -> Vec<SlotName> {
        [
            (SlotName::Combined, self.combined.is_some()),
            (SlotName::Resolved, self.resolved.is_some()),
            (SlotName::Pending, self.pending.is_some()),
            (SlotName::Rejected, self.rejected.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Render the snapshot.
    ///
    /// Returns `Ok(None)` while the pending view is suppressed,
    /// `ViewError::MissingSlot` when the selected branch was not supplied and
    /// `ViewError::EmptySlot` when it rendered nothing.
    pub fn render(&self, snapshot: &Snapshot<T, E>) -> Result<Option<V>, ViewError> {
        if let Some(combined) = &self.combined {
            return Self::filled(SlotName::Combined, combined(snapshot));
        }

        let view = select_view(snapshot);
        let Some(name) = view.slot() else {
            return Ok(None);
        };
        let rendered = match view {
            View::Rejected(error) => {
                let slot = Self::require(&self.rejected, name)?;
                slot(error)
            }
            View::Resolved(data) => {
                let slot = Self::require(&self.resolved, name)?;
                slot(data)
            }
            View::Pending(data) => {
                let slot = Self::require(&self.pending, name)?;
                slot(data)
            }
            View::Suppressed => return Ok(None),
        };
        Self::filled(name, rendered)
    }

    fn require<S>(slot: &Option<S>, name: SlotName) -> Result<&S, ViewError> {
        slot.as_ref().ok_or(ViewError::MissingSlot { slot: name })
    }

    fn filled(name: SlotName, rendered: Option<V>) -> Result<Option<V>, ViewError> {
        match rendered {
            Some(output) => Ok(Some(output)),
            None => Err(ViewError::EmptySlot { slot: name }),
        }
    }
}

impl<T, E, V> Default for Slots<T, E, V> {
    fn default() -> Self {
        Self::new()
    }
}
