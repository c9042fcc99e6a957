//! Play detection over the remote classifier.
//!
//! One classifier call per non-empty message, no retries. Every failure
//! mode (unreachable, timed out, malformed, empty ranking, unknown label)
//! degrades to "no play detected" for this turn only.

use std::collections::HashMap;

use rpsverse_core::classifier::{ClassificationRequest, PlayClassifier};
use tracing::{debug, info, warn};

use crate::domain::placeholders::replace_tags;
use crate::domain::play::Play;

/// Label the classifier returns when no throw is present.
pub const NOTHING: &str = "nothing";

/// Candidate labels, in the order offered to the classifier.
pub const CANDIDATE_LABELS: [&str; 4] = ["rock", "paper", "scissors", NOTHING];

/// Hypothesis template; `{}` is the label slot.
pub const PLAY_HYPOTHESIS: &str = "{{user}} is playing {}.";

/// Turns chat text into an optional play.
#[derive(Clone, Copy)]
pub struct PlayDetector<'a> {
    classifier: &'a dyn PlayClassifier,
}

impl std::fmt::Debug for PlayDetector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayDetector").finish_non_exhaustive()
    }
}

impl<'a> PlayDetector<'a> {
    /// Creates a detector over the given classifier.
    #[must_use]
    pub fn new(classifier: &'a dyn PlayClassifier) -> Self {
        Self { classifier }
    }

    /// Builds the classifier request for an already-substituted utterance.
    #[must_use]
    pub fn request_for(sequence: String) -> ClassificationRequest {
        ClassificationRequest {
            sequence,
            candidate_labels: CANDIDATE_LABELS.iter().map(|&l| l.to_owned()).collect(),
            hypothesis_template: PLAY_HYPOTHESIS.to_owned(),
            multi_label: true,
        }
    }

    /// Detects the play in `utterance` after substituting `names` into its
    /// `{{...}}` placeholders.
    pub async fn detect(&self, utterance: &str, names: &HashMap<String, String>) -> Option<Play> {
        if utterance.is_empty() {
            return None;
        }

        let request = Self::request_for(replace_tags(utterance, names));
        let result = match self.classifier.classify(&request).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "classifier call failed; no play detected");
                return None;
            }
        };

        debug!(
            sequence = %request.sequence,
            ranked = ?result.ranked,
            "classifier responded"
        );

        let Some(top) = result.top() else {
            debug!("classifier returned no labels; no play detected");
            return None;
        };

        match (top.label.as_str(), Play::from_label(&top.label)) {
            (_, Some(play)) => {
                info!(%play, score = top.score, "play detected");
                Some(play)
            }
            (NOTHING, None) => None,
            (label, None) => {
                warn!(label, "classifier returned an unknown label; no play detected");
                None
            }
        }
    }
}
