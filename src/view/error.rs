//! View dispatch errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Branches a view can be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotName {
    Combined,
    #[serde(rename = "default")]
    Resolved,
    Pending,
    Rejected,
}

impl SlotName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::Combined => "combined",
            SlotName::Resolved => "default",
            SlotName::Pending => "pending",
            SlotName::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract violations detected while dispatching a view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("No slot \"{slot}\" provided")]
    MissingSlot { slot: SlotName },

    #[error("Provided slot \"{slot}\" is empty")]
    EmptySlot { slot: SlotName },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_match_display() {
        assert_eq!(SlotName::Resolved.to_string(), "default");
        assert_eq!(SlotName::Rejected.to_string(), "rejected");
        assert_eq!(
            serde_json::to_string(&SlotName::Resolved).unwrap(),
            "\"default\""
        );
        assert_eq!(
            serde_json::to_string(&SlotName::Combined).unwrap(),
            "\"combined\""
        );
    }

    #[test]
    fn missing_slot_message_names_the_slot() {
        let err = ViewError::MissingSlot {
            slot: SlotName::Pending,
        };
        assert_eq!(err.to_string(), "No slot \"pending\" provided");
    }

    #[test]
    fn empty_slot_message_names_the_slot() {
        let err = ViewError::EmptySlot {
            slot: SlotName::Combined,
        };
        assert_eq!(err.to_string(), "Provided slot \"combined\" is empty");
    }
}
