//! The three throws.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A rock-paper-scissors throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Play {
    /// Beats scissors.
    Rock,
    /// Beats rock.
    Paper,
    /// Beats paper.
    Scissors,
}

impl Play {
    /// Every play, in draw order.
    pub const ALL: [Play; 3] = [Play::Rock, Play::Paper, Play::Scissors];

    /// The lowercase label used in snapshots, classifier labels and
    /// stage directions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }

    /// Parses a classifier label. Matching is exact.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "rock" => Some(Self::Rock),
            "paper" => Some(Self::Paper),
            "scissors" => Some(Self::Scissors),
            _ => None,
        }
    }

    /// The play this one defeats.
    #[must_use]
    pub fn defeats(self) -> Self {
        match self {
            Self::Rock => Self::Scissors,
            Self::Scissors => Self::Paper,
            Self::Paper => Self::Rock,
        }
    }

    /// Returns `true` if `self` wins against `other`.
    #[must_use]
    pub fn beats(self, other: Self) -> bool {
        self.defeats() == other
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
