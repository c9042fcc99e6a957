//! Mock `SnapshotRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rpsverse_core::error::DomainError;
use rpsverse_core::repository::{SnapshotRepository, StoredSnapshot};
use uuid::Uuid;

/// A snapshot repository backed by a map that records every save call.
/// Honors the optimistic-concurrency contract so handler tests exercise
/// the same version arithmetic as the real stores.
#[derive(Debug, Default)]
pub struct RecordingSnapshotRepository {
    snapshots: Mutex<HashMap<Uuid, StoredSnapshot>>,
    saved: Mutex<Vec<(StoredSnapshot, i64)>>,
}

impl RecordingSnapshotRepository {
    /// An empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-seeded with `snapshot`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_snapshot(snapshot: StoredSnapshot) -> Self {
        let repo = Self::default();
        repo.snapshots
            .lock()
            .unwrap()
            .insert(snapshot.session_id, snapshot);
        repo
    }

    /// Returns every `(snapshot, expected_version)` pair that was saved.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_snapshots(&self) -> Vec<(StoredSnapshot, i64)> {
        self.saved.lock().unwrap().clone()
    }

    /// Returns the snapshot currently held for `session_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn current(&self, session_id: Uuid) -> Option<StoredSnapshot> {
        self.snapshots.lock().unwrap().get(&session_id).cloned()
    }
}

#[async_trait]
impl SnapshotRepository for RecordingSnapshotRepository {
    async fn load_snapshot(&self, session_id: Uuid) -> Result<Option<StoredSnapshot>, DomainError> {
        Ok(self.current(session_id))
    }

    async fn save_snapshot(
        &self,
        snapshot: &StoredSnapshot,
        expected_version: i64,
    ) -> Result<(), DomainError> {
        let mut snapshots = self.snapshots.lock().unwrap();
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
        self.saved
            .lock()
            .unwrap()
            .push((snapshot.clone(), expected_version));
        Ok(())
    }
}

/// A snapshot repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingSnapshotRepository;

#[async_trait]
impl SnapshotRepository for FailingSnapshotRepository {
    async fn load_snapshot(&self, _session_id: Uuid) -> Result<Option<StoredSnapshot>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn save_snapshot(
        &self,
        _snapshot: &StoredSnapshot,
        _expected_version: i64,
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
