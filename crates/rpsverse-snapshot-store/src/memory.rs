//! In-process snapshot store.
//!
//! Used when no database is configured. Snapshots do not survive a
//! restart.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rpsverse_core::error::DomainError;
use rpsverse_core::repository::{SnapshotRepository, StoredSnapshot};
use uuid::Uuid;

/// A `Mutex`-guarded map of the latest snapshot per session.
#[derive(Debug, Default)]
pub struct InMemorySnapshotRepository {
    snapshots: Mutex<HashMap<Uuid, StoredSnapshot>>,
}

impl InMemorySnapshotRepository {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, StoredSnapshot>>, DomainError> {
        self.snapshots
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("snapshot store mutex poisoned: {e}")))
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotRepository {
    async fn load_snapshot(&self, session_id: Uuid) -> Result<Option<StoredSnapshot>, DomainError> {
        Ok(self.lock()?.get(&session_id).cloned())
    }

    async fn save_snapshot(
        &self,
        snapshot: &StoredSnapshot,
        expected_version: i64,
    ) -> Result<(), DomainError> {
        let mut snapshots = self.lock()?;
        let actual = snapshots
            .get(&snapshot.session_id)
            .map_or(0, |current| current.version);
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                session_id: snapshot.session_id,
                expected: expected_version,
                actual,
            });
        }
        snapshots.insert(snapshot.session_id, snapshot.clone());
        Ok(())
    }
}
