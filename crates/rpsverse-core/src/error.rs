//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Classifier failures have no variant here: they degrade to "no play
/// detected" inside the detector and never reach callers.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No snapshot exists for the session.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// Optimistic concurrency conflict while saving a snapshot.
    #[error("concurrency conflict on session {session_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The session that had the conflict.
        session_id: Uuid,
        /// The expected version.
        expected: i64,
        /// The actual version found.
        actual: i64,
    },

    /// A snapshot failed validation at the deserialization boundary.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// A command was rejected by domain rules.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
