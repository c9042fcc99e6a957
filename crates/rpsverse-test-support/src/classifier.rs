//! `PlayClassifier` doubles for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use rpsverse_core::classifier::{
    ClassificationRequest, ClassificationResult, ClassifierError, PlayClassifier, ScoredLabel,
};

/// A classifier that answers every call with the same ranked labels and
/// records each request it receives.
#[derive(Debug)]
pub struct ScriptedClassifier {
    result: ClassificationResult,
    requests: Mutex<Vec<ClassificationRequest>>,
}

impl ScriptedClassifier {
    /// Answers with `labels` in the given order, scores descending from 0.9.
    #[must_use]
    pub fn ranking(labels: &[&str]) -> Self {
        let ranked = labels
            .iter()
            .zip((0..).map(|i: u32| 0.9 - 0.1 * f64::from(i)))
            .map(|(label, score)| ScoredLabel {
                label: (*label).to_owned(),
                score,
            })
            .collect();
        Self::with_result(ClassificationResult::from_ranked(ranked))
    }

    /// Answers with an empty ranking.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_result(ClassificationResult::default())
    }

    /// Answers with an explicit result.
    #[must_use]
    pub fn with_result(result: ClassificationResult) -> Self {
        Self {
            result,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns every request received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<ClassificationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlayClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifierError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.result.clone())
    }
}

/// A classifier that fails every call with the configured error and counts
/// how often it was asked.
#[derive(Debug)]
pub struct FailingClassifier {
    error: ClassifierError,
    calls: Mutex<usize>,
}

impl FailingClassifier {
    /// Fails with `ClassifierError::Unavailable`.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::with_error(ClassifierError::Unavailable("connection refused".into()))
    }

    /// Fails with `ClassifierError::Timeout`.
    #[must_use]
    pub fn timing_out() -> Self {
        Self::with_error(ClassifierError::Timeout(10_000))
    }

    /// Fails with `ClassifierError::Malformed`.
    #[must_use]
    pub fn malformed() -> Self {
        Self::with_error(ClassifierError::Malformed("expected value at line 1".into()))
    }

    /// Fails with the given error.
    #[must_use]
    pub fn with_error(error: ClassifierError) -> Self {
        Self {
            error,
            calls: Mutex::new(0),
        }
    }

    /// Number of `classify` calls received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PlayClassifier for FailingClassifier {
    async fn classify(
        &self,
        _request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifierError> {
        *self.calls.lock().unwrap() += 1;
        Err(self.error.clone())
    }
}
