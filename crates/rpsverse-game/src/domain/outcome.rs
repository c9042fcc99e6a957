//! Outcome resolution and stage directions.
//!
//! Given the play detected this turn (if any), the engine draws the
//! opposing play, applies precedence, bumps one counter, and writes the
//! stage direction that steers the next generated reply. The `{{user}}`
//! and `{{char}}` tokens in the text are left for the downstream
//! generator to substitute.

use rpsverse_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};

use super::play::Play;
use super::state::SessionState;

/// Opening line of every stage direction.
pub const PREAMBLE: &str =
    "This universe is secretly and tacitly ruled by the will of rock-paper-scissors.";

/// Result of one game, from the user's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The user's play beat the opposing play.
    Victory,
    /// The opposing play beat the user's play.
    Defeat,
    /// Both threw the same.
    Stalemate,
}

impl Outcome {
    /// Applies standard precedence to a pair of plays.
    #[must_use]
    pub fn between(user: Play, other: Play) -> Self {
        if user == other {
            Self::Stalemate
        } else if user.beats(other) {
            Self::Victory
        } else {
            Self::Defeat
        }
    }
}

/// What one resolved turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResolution {
    /// The next state snapshot.
    pub state: SessionState,
    /// Narrative instruction to prepend to the generation context.
    pub stage_directions: String,
    /// The game result, if a play was detected.
    pub outcome: Option<Outcome>,
}

/// Stateless resolver for a single turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeEngine;

impl OutcomeEngine {
    /// Resolves a turn. Consumes the prior state and returns the next one.
    ///
    /// With no detected play nothing is drawn and no counter changes. With a
    /// detected play, exactly one RNG draw picks the opposing play uniformly
    /// and independently of the user's play.
    #[must_use]
    pub fn resolve(
        state: SessionState,
        user_played: Option<Play>,
        rng: &mut dyn DeterministicRng,
    ) -> TurnResolution {
        let state = state.begin_turn();

        let Some(user) = user_played else {
            return TurnResolution {
                state,
                stage_directions: idle_directions(),
                outcome: None,
            };
        };

        let other = Self::draw(rng);
        let outcome = Outcome::between(user, other);

        TurnResolution {
            state: state.record(user, other, outcome),
            stage_directions: game_directions(user, other, outcome),
            outcome: Some(outcome),
        }
    }

    /// Draws the opposing play.
    pub fn draw(rng: &mut dyn DeterministicRng) -> Play {
        match rng.next_u32_range(0, 2) {
            0 => Play::Rock,
            1 => Play::Paper,
            _ => Play::Scissors,
        }
    }
}

fn idle_directions() -> String {
    format!("{PREAMBLE} But no one is playing rock-paper-scissors in this moment.")
}

fn game_directions(user: Play, other: Play, outcome: Outcome) -> String {
    let invocation = format!("{{{{user}}}} has invoked the universe's will by throwing {user}.");
    let consequence = match outcome {
        Outcome::Stalemate => format!(
            "Depict an opposing party that now throws {other}, resulting in a tie. \
             As a result, the universe will simply abide."
        ),
        Outcome::Victory => format!(
            "Depict an opposing party (perhaps {{{{char}}}}) that now throws {other}, \
             resulting in {{{{user}}}}'s unilateral victory; the universe will bend to achieve \
             {{{{user}}}}'s current objective or intent, no matter how ridiculous."
        ),
        Outcome::Defeat => format!(
            "Depict an opposing party (perhaps {{{{char}}}}) that now throws {other}, \
             resulting in {{{{user}}}}'s unilateral defeat; the universe will subvert \
             {{{{user}}}}'s current objective or intent in ridiculous fashion."
        ),
    };
    format!("{PREAMBLE} {invocation} {consequence}")
}
