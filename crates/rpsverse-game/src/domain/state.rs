//! Session state and its snapshot form.

use rpsverse_core::error::DomainError;
use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use super::play::Play;

/// Cumulative record plus the plays of the current turn.
///
/// Invariant: `other_played` is present if and only if `user_played` is.
/// Snapshots violating it are rejected at deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSessionState")]
pub struct SessionState {
    pub(crate) wins: u32,
    pub(crate) losses: u32,
    pub(crate) ties: u32,
    pub(crate) user_played: Option<Play>,
    pub(crate) other_played: Option<Play>,
}

/// Lenient wire shape: missing counters and plays are coerced to their
/// defaults before the invariant check.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSessionState {
    wins: u32,
    losses: u32,
    ties: u32,
    user_played: Option<Play>,
    other_played: Option<Play>,
}

impl TryFrom<RawSessionState> for SessionState {
    type Error = String;

    fn try_from(raw: RawSessionState) -> Result<Self, Self::Error> {
        if raw.user_played.is_some() != raw.other_played.is_some() {
            return Err("userPlayed and otherPlayed must be both present or both absent".to_owned());
        }
        Ok(Self {
            wins: raw.wins,
            losses: raw.losses,
            ties: raw.ties,
            user_played: raw.user_played,
            other_played: raw.other_played,
        })
    }
}

impl SessionState {
    /// A fresh session: all counters zero, no plays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session resumed with an existing record and no plays this turn.
    #[must_use]
    pub fn with_record(wins: u32, losses: u32, ties: u32) -> Self {
        Self {
            wins,
            losses,
            ties,
            ..Self::default()
        }
    }

    /// Parses a snapshot emitted by [`SessionState::to_snapshot`] (or the
    /// host's equivalent camelCase shape).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedSnapshot` if the value is not an object,
    /// has negative or non-integer counters, names an unknown play, or breaks
    /// the paired-plays invariant.
    pub fn from_snapshot(snapshot: &serde_json::Value) -> Result<Self, DomainError> {
        Self::deserialize(snapshot).map_err(|e| DomainError::MalformedSnapshot(e.to_string()))
    }

    /// Serializes the state into its snapshot form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if serialization fails.
    pub fn to_snapshot(&self) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(self)
            .map_err(|e| DomainError::Infrastructure(format!("snapshot serialization failed: {e}")))
    }

    /// Starts a turn: both plays are cleared, counters are kept.
    #[must_use]
    pub fn begin_turn(self) -> Self {
        Self {
            user_played: None,
            other_played: None,
            ..self
        }
    }

    /// Records a resolved game, bumping exactly one counter. Counters
    /// saturate at `u32::MAX` instead of wrapping.
    #[must_use]
    pub(crate) fn record(self, user: Play, other: Play, outcome: Outcome) -> Self {
        let mut next = Self {
            user_played: Some(user),
            other_played: Some(other),
            ..self
        };
        match outcome {
            Outcome::Victory => next.wins = next.wins.saturating_add(1),
            Outcome::Defeat => next.losses = next.losses.saturating_add(1),
            Outcome::Stalemate => next.ties = next.ties.saturating_add(1),
        }
        next
    }

    /// User victories.
    #[must_use]
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// User defeats.
    #[must_use]
    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// Ties.
    #[must_use]
    pub fn ties(&self) -> u32 {
        self.ties
    }

    /// The user's play this turn, if one was detected.
    #[must_use]
    pub fn user_played(&self) -> Option<Play> {
        self.user_played
    }

    /// The opposing play this turn, drawn only when the user played.
    #[must_use]
    pub fn other_played(&self) -> Option<Play> {
        self.other_played
    }

    /// Total games played across the session.
    #[must_use]
    pub fn games_played(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses) + u64::from(self.ties)
    }
}
