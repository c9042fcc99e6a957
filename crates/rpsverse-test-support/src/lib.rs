//! Shared test doubles for the rpsverse workspace.

mod classifier;
mod clock;
mod repository;
mod rng;

pub use classifier::{FailingClassifier, ScriptedClassifier};
pub use clock::FixedClock;
pub use repository::{FailingSnapshotRepository, RecordingSnapshotRepository};
pub use rng::{MockRng, SequenceRng};
