//! Running record, shown to the user after each reply.

use std::fmt;

use serde::Serialize;

use super::rewriter::NOTE_SEPARATOR;
use super::state::SessionState;

/// Win/loss/tie totals for a session that has played at least once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    /// User victories.
    pub wins: u32,
    /// User defeats.
    pub losses: u32,
    /// Ties.
    pub ties: u32,
}

impl Scoreboard {
    /// Returns `None` until at least one game has been played.
    #[must_use]
    pub fn for_state(state: &SessionState) -> Option<Self> {
        (state.games_played() > 0).then(|| Self {
            wins: state.wins(),
            losses: state.losses(),
            ties: state.ties(),
        })
    }

    /// `record: W-L-T`.
    #[must_use]
    pub fn line(&self) -> String {
        self.to_string()
    }

    /// The out-of-band system note appended after the generated reply.
    #[must_use]
    pub fn system_note(&self) -> String {
        format!(
            "{NOTE_SEPARATOR}\n{{{{user}}}}'s record: {}-{}-{}.",
            self.wins, self.losses, self.ties
        )
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record: {}-{}-{}", self.wins, self.losses, self.ties)
    }
}
