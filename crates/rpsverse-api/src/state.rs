//! Shared application state.

use std::sync::{Arc, Mutex};

use rpsverse_core::classifier::PlayClassifier;
use rpsverse_core::clock::Clock;
use rpsverse_core::repository::SnapshotRepository;
use rpsverse_core::rng::DeterministicRng;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for snapshot timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// RNG for the opposing party's draws.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Snapshot store.
    pub snapshot_repository: Arc<dyn SnapshotRepository>,
    /// Play classifier.
    pub classifier: Arc<dyn PlayClassifier>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        snapshot_repository: Arc<dyn SnapshotRepository>,
        classifier: Arc<dyn PlayClassifier>,
    ) -> Self {
        Self {
            clock,
            rng,
            snapshot_repository,
            classifier,
        }
    }
}
