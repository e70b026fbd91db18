//! The read-only record consumers render from.

use serde::{Deserialize, Serialize};

/// Observable state of a promise tracker.
///
/// A snapshot is a plain value: cloning it or receiving it from a
/// subscription never gives write access to the tracker.
///
/// # Example
///
/// ```rust
/// use promised::core::Snapshot;
///
/// let snapshot: Snapshot<String, String> = Snapshot::default();
/// assert!(snapshot.is_pending);
/// assert!(!snapshot.is_delay_over);
/// assert!(snapshot.data.is_none());
/// assert!(snapshot.error.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<T, E> {
    /// The current promise has neither resolved nor rejected.
    pub is_pending: bool,
    /// The pending delay elapsed for the current promise.
    pub is_delay_over: bool,
    /// Last resolved value. Survives a new promise and a rejection.
    pub data: Option<T>,
    /// Rejection reason of the current promise.
    pub error: Option<E>,
}

impl<T, E> Default for Snapshot<T, E> {
    fn default() -> Self {
        Self {
            is_pending: true,
            is_delay_over: false,
            data: None,
            error: None,
        }
    }
}

impl<T, E> Snapshot<T, E> {
    /// The pending view may be shown: still pending and the delay elapsed.
    pub fn shows_pending(&self) -> bool {
        self.is_pending && self.is_delay_over && self.error.is_none()
    }

    /// Still pending but inside the delay window, so nothing should show.
    pub fn is_suppressed(&self) -> bool {
        self.is_pending && !self.is_delay_over && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending_without_delay() {
        let snapshot: Snapshot<u32, String> = Snapshot::default();
        assert!(snapshot.is_pending);
        assert!(!snapshot.is_delay_over);
        assert!(snapshot.is_suppressed());
        assert!(!snapshot.shows_pending());
    }

    #[test]
    fn shows_pending_after_delay() {
        let snapshot: Snapshot<u32, String> = Snapshot {
            is_delay_over: true,
            ..Snapshot::default()
        };
        assert!(snapshot.shows_pending());
        assert!(!snapshot.is_suppressed());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let snapshot: Snapshot<String, String> = Snapshot {
            is_pending: false,
            is_delay_over: true,
            data: Some("foo".to_string()),
            error: None,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["isPending"], false);
        assert_eq!(json["isDelayOver"], true);
        assert_eq!(json["data"], "foo");
        assert!(json["error"].is_null());

        let back: Snapshot<String, String> = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
