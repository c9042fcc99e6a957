//! Snapshot repository abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of a session snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    /// Session this snapshot belongs to.
    pub session_id: Uuid,
    /// Monotonically increasing version; the first save is version 1.
    pub version: i64,
    /// Serialized session state.
    pub state: serde_json::Value,
    /// When this version was written.
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for loading and saving the latest session snapshot.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Load the most recent snapshot for a session, if one exists.
    async fn load_snapshot(&self, session_id: Uuid) -> Result<Option<StoredSnapshot>, DomainError>;

    /// Save a snapshot with optimistic concurrency.
    /// `expected_version` is the version the caller loaded (0 for a new
    /// session); `snapshot.version` must be `expected_version + 1`.
    async fn save_snapshot(
        &self,
        snapshot: &StoredSnapshot,
        expected_version: i64,
    ) -> Result<(), DomainError>;
}
