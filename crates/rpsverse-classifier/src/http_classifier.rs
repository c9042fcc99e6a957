//! HTTP implementation of the `PlayClassifier` capability.

use std::time::Duration;

use async_trait::async_trait;
use rpsverse_core::classifier::{
    ClassificationRequest, ClassificationResult, ClassifierError, PlayClassifier,
};
use tracing::{debug, instrument};

use crate::wire::{self, Envelope};

/// Default per-call deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts classification requests to a hosted prediction endpoint.
///
/// The underlying `reqwest::Client` is built once and reused for every
/// turn of every session.
#[derive(Debug, Clone)]
pub struct HttpPlayClassifier {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpPlayClassifier {
    /// Builds a classifier posting to `endpoint` with a per-call `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::Unavailable` if the HTTP client cannot be
    /// constructed (e.g. TLS backend initialisation fails).
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rpsverse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClassifierError::Unavailable(format!("client build failed: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// The endpoint requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, error: &reqwest::Error) -> ClassifierError {
        if error.is_timeout() {
            ClassifierError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else if error.is_decode() {
            ClassifierError::Malformed(error.to_string())
        } else {
            ClassifierError::Unavailable(error.to_string())
        }
    }
}

#[async_trait]
impl PlayClassifier for HttpPlayClassifier {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifierError> {
        let body = wire::encode_request(request)?;

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Unavailable(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| self.transport_error(&e))?;
        debug!(elements = envelope.data.len(), "classifier envelope received");

        wire::decode_response(envelope)
    }
}
