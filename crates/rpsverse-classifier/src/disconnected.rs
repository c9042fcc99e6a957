//! Classifier stand-in for sessions without a reachable service.

use async_trait::async_trait;
use rpsverse_core::classifier::{
    ClassificationRequest, ClassificationResult, ClassifierError, PlayClassifier,
};

/// Fails every call with `ClassifierError::Unavailable`.
#[derive(Debug, Clone)]
pub struct DisconnectedClassifier {
    reason: String,
}

impl DisconnectedClassifier {
    /// A classifier that reports `reason` on every call.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl PlayClassifier for DisconnectedClassifier {
    async fn classify(
        &self,
        _request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifierError> {
        Err(ClassifierError::Unavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_call_is_unavailable() {
        let classifier = DisconnectedClassifier::new("no endpoint configured");
        let request = ClassificationRequest {
            sequence: "rock".to_owned(),
            candidate_labels: vec!["rock".to_owned()],
            hypothesis_template: "{}".to_owned(),
            multi_label: true,
        };

        let result = classifier.classify(&request).await;

        assert_eq!(
            result,
            Err(ClassifierError::Unavailable("no endpoint configured".to_owned()))
        );
    }
}
