//! Text-classification capability.
//!
//! The classifier is an unreliable remote oracle: it may be unreachable,
//! may answer with garbage, or may rank the candidate labels. Callers
//! receive a `Result` and decide how to degrade.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A zero-shot classification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// The text to classify.
    pub sequence: String,
    /// Candidate labels, in the order they should be offered.
    pub candidate_labels: Vec<String>,
    /// Hypothesis template; `{}` is the label slot.
    pub hypothesis_template: String,
    /// Whether labels are scored independently rather than as a softmax.
    pub multi_label: bool,
}

/// One ranked label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    /// The candidate label.
    pub label: String,
    /// Confidence in `[0.0, 1.0]`.
    pub score: f64,
}

/// Ranked classifier output, most confident first. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Labels ordered by descending confidence.
    pub ranked: Vec<ScoredLabel>,
}

impl ClassificationResult {
    /// Builds a result from labels already ordered by the classifier.
    #[must_use]
    pub fn from_ranked(ranked: Vec<ScoredLabel>) -> Self {
        Self { ranked }
    }

    /// The most confident label, if any.
    #[must_use]
    pub fn top(&self) -> Option<&ScoredLabel> {
        self.ranked.first()
    }

    /// Returns `true` when the classifier ranked nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Ways the classifier call can fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifierError {
    /// The service could not be reached or refused the request.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// The call exceeded its deadline.
    #[error("classifier timed out after {0} ms")]
    Timeout(u64),

    /// The service answered with an unparseable payload.
    #[error("malformed classifier response: {0}")]
    Malformed(String),
}

/// Capability interface for the remote classifier.
#[async_trait]
pub trait PlayClassifier: Send + Sync {
    /// Classifies `request.sequence` against the candidate labels.
    ///
    /// # Errors
    ///
    /// Returns a `ClassifierError` if the service is unreachable, times out,
    /// or returns a payload that cannot be interpreted.
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifierError>;
}
