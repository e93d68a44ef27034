//! Error types for Prism

use thiserror::Error;

/// The main error type for Prism operations
///
/// Edge cases inside the command/playback flow (stale ids on revert,
/// scrubbing an empty timeline) stay silent no-ops. `PrismError` covers
/// faults at the editor's API boundary that a caller must be told
/// about: rejected physics attachment, export preconditions, snapshot
/// parsing.
#[derive(Debug, Error)]
pub enum PrismError {
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Physics service not ready")]
    PhysicsNotReady,

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Export error: {0}")]
    ExportError(String),
}

/// Result type alias for Prism operations
pub type Result<T> = std::result::Result<T, PrismError>;

impl From<serde_json::Error> for PrismError {
    fn from(err: serde_json::Error) -> Self {
        PrismError::SnapshotError(err.to_string())
    }
}
