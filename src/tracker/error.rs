//! Build errors for promise trackers.

use thiserror::Error;

/// Errors that can occur when building a tracker.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No tokio runtime available. Call .handle(runtime) or build inside a runtime")]
    NoRuntime,
}
