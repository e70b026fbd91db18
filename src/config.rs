//! Tracker configuration.
//!
//! Configuration is plain serde data so it can be embedded in a host
//! application's own settings file. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PENDING_DELAY_MS: i64 = 200;
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid tracker configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings shared by every tracker built from it.
///
/// # Example
///
/// ```rust
/// use promised::config::TrackerConfig;
/// use std::time::Duration;
///
/// let config = TrackerConfig::from_json(r#"{ "pendingDelay": 50 }"#).unwrap();
/// assert_eq!(config.pending_delay(), Duration::from_millis(50));
/// assert_eq!(config.history_limit, 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Milliseconds before the pending view may show. Negative means zero.
    #[serde(alias = "pendingDelay")]
    pub pending_delay_ms: i64,

    /// Maximum number of phase transitions kept per tracker.
    #[serde(alias = "historyLimit")]
    pub history_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            pending_delay_ms: DEFAULT_PENDING_DELAY_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl TrackerConfig {
    /// Parse configuration from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The pending delay as a `Duration`, clamped at zero.
    pub fn pending_delay(&self) -> Duration {
        delay_from_millis(self.pending_delay_ms)
    }
}

/// Convert a signed millisecond count to a delay; anything `<= 0` is zero.
pub fn delay_from_millis(millis: i64) -> Duration {
    u64::try_from(millis)
        .map(Duration::from_millis)
        .unwrap_or(Duration::ZERO)
}
