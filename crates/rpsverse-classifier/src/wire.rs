//! Wire format of the hosted classifier.
//!
//! Both directions wrap a JSON document, serialized to a string, as the
//! single element of a `data` array:
//!
//! ```text
//! → {"data": ["{\"sequence\":…,\"candidate_labels\":[…],\"hypothesis_template\":…,\"multi_label\":true}"]}
//! ← {"data": ["{\"labels\":[…],\"scores\":[…]}"]}
//! ```

use rpsverse_core::classifier::{
    ClassificationRequest, ClassificationResult, ClassifierError, ScoredLabel,
};
use serde::{Deserialize, Serialize};

/// The `{"data": [...]}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Positional payload; only the first element is used.
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    labels: Vec<String>,
    #[serde(default)]
    scores: Vec<f64>,
}

/// Wraps a request in the envelope.
///
/// # Errors
///
/// Returns `ClassifierError::Malformed` if the request cannot be serialized.
pub fn encode_request(request: &ClassificationRequest) -> Result<Envelope, ClassifierError> {
    let payload = serde_json::to_string(request)
        .map_err(|e| ClassifierError::Malformed(format!("request serialization failed: {e}")))?;
    Ok(Envelope {
        data: vec![serde_json::Value::String(payload)],
    })
}

/// Unwraps a response envelope into ranked labels, preserving the
/// service's order. Missing scores pair as `0.0`.
///
/// The first `data` element may be a JSON string or an inline object.
///
/// # Errors
///
/// Returns `ClassifierError::Malformed` if `data` is empty, the payload is
/// not valid JSON, or `labels` is missing.
pub fn decode_response(envelope: Envelope) -> Result<ClassificationResult, ClassifierError> {
    let first = envelope
        .data
        .into_iter()
        .next()
        .ok_or_else(|| ClassifierError::Malformed("empty data array".to_owned()))?;

    let raw: RawClassification = match first {
        serde_json::Value::String(text) => serde_json::from_str(&text),
        other => serde_json::from_value(other),
    }
    .map_err(|e| ClassifierError::Malformed(e.to_string()))?;

    let scores = raw.scores.into_iter().chain(std::iter::repeat(0.0));
    let ranked = raw
        .labels
        .into_iter()
        .zip(scores)
        .map(|(label, score)| ScoredLabel { label, score })
        .collect();

    Ok(ClassificationResult::from_ranked(ranked))
}
