//! Command handlers for the game context.
//!
//! Each handler loads the session's latest snapshot, runs the pure domain
//! transition on it, and saves the next snapshot with optimistic
//! concurrency.

use std::sync::Mutex;

use rpsverse_core::classifier::PlayClassifier;
use rpsverse_core::clock::Clock;
use rpsverse_core::directory::NameDirectory;
use rpsverse_core::error::DomainError;
use rpsverse_core::repository::{SnapshotRepository, StoredSnapshot};
use rpsverse_core::rng::DeterministicRng;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::detector::PlayDetector;
use crate::domain::commands::{PreparePrompt, RestoreSnapshot, SanitizeResponse, StartSession};
use crate::domain::outcome::{Outcome, OutcomeEngine};
use crate::domain::placeholders::participant_names;
use crate::domain::rewriter::MessageRewriter;
use crate::domain::scoreboard::Scoreboard;
use crate::domain::state::SessionState;

/// Output of `PreparePrompt`, handed back to the host before generation.
#[derive(Debug, Clone, Serialize)]
pub struct PromptPreparation {
    /// The session identifier.
    pub session_id: Uuid,
    /// Snapshot version after this turn.
    pub version: i64,
    /// Narrative instruction with `{{user}}`/`{{char}}` left unresolved.
    pub stage_directions: String,
    /// The updated session snapshot.
    pub snapshot: serde_json::Value,
    /// The user's own message is never modified.
    pub modified_message: Option<String>,
    /// The game result, if a play was detected.
    pub outcome: Option<Outcome>,
}

/// Output of `SanitizeResponse`, handed back to the host after generation.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSanitization {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current snapshot version (unchanged by this command).
    pub version: i64,
    /// The sanitized reply.
    pub modified_message: Option<String>,
    /// The current session snapshot.
    pub snapshot: serde_json::Value,
    /// Scoreboard note, present once any game has been played.
    pub system_message: Option<String>,
}

/// Loads the latest state for a session.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no snapshot exists, or
/// `DomainError::MalformedSnapshot` if the stored snapshot fails validation.
pub(crate) async fn load_state(
    session_id: Uuid,
    repo: &dyn SnapshotRepository,
) -> Result<(SessionState, StoredSnapshot), DomainError> {
    let stored = repo
        .load_snapshot(session_id)
        .await?
        .ok_or(DomainError::SessionNotFound(session_id))?;
    let state = SessionState::from_snapshot(&stored.state)?;
    Ok((state, stored))
}

async fn persist(
    session_id: Uuid,
    state: &SessionState,
    expected_version: i64,
    clock: &dyn Clock,
    repo: &dyn SnapshotRepository,
) -> Result<StoredSnapshot, DomainError> {
    let snapshot = StoredSnapshot {
        session_id,
        version: expected_version + 1,
        state: state.to_snapshot()?,
        updated_at: clock.now(),
    };
    repo.save_snapshot(&snapshot, expected_version).await?;
    Ok(snapshot)
}

/// Handles `StartSession`: persists a fresh state at version 1.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the session already exists, or
/// `DomainError` if loading or saving fails.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub async fn handle_start_session(
    command: &StartSession,
    clock: &dyn Clock,
    repo: &dyn SnapshotRepository,
) -> Result<StoredSnapshot, DomainError> {
    if repo.load_snapshot(command.session_id).await?.is_some() {
        return Err(DomainError::Validation(format!(
            "session {} already exists",
            command.session_id
        )));
    }

    let snapshot = persist(command.session_id, &SessionState::new(), 0, clock, repo).await?;
    info!("session started");
    Ok(snapshot)
}

/// Handles `PreparePrompt`: detects a play in the user's message, resolves
/// the game, and persists the next snapshot.
///
/// The classifier is awaited before the RNG is locked; the `Mutex` is held
/// only around the synchronous outcome resolution.
///
/// # Errors
///
/// Returns `DomainError` if loading or saving the snapshot fails. Classifier
/// failures are not errors.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub async fn handle_prepare_prompt(
    command: &PreparePrompt,
    classifier: &dyn PlayClassifier,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    repo: &dyn SnapshotRepository,
) -> Result<PromptPreparation, DomainError> {
    let (state, stored) = load_state(command.session_id, repo).await?;

    let user_played = match command.content.as_deref() {
        Some(content) => {
            let directory = &command.participants;
            let names = participant_names(
                directory.name_or_empty(command.user_id.as_deref()),
                directory.name_or_empty(command.character_id.as_deref()),
            );
            PlayDetector::new(classifier).detect(content, &names).await
        }
        None => None,
    };

    let resolution = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        OutcomeEngine::resolve(state, user_played, &mut *rng_guard)
    };

    if let Some(outcome) = resolution.outcome {
        info!(
            ?outcome,
            user_played = ?resolution.state.user_played(),
            other_played = ?resolution.state.other_played(),
            wins = resolution.state.wins(),
            losses = resolution.state.losses(),
            ties = resolution.state.ties(),
            "game resolved"
        );
    }

    let saved = persist(
        command.session_id,
        &resolution.state,
        stored.version,
        clock,
        repo,
    )
    .await?;

    Ok(PromptPreparation {
        session_id: command.session_id,
        version: saved.version,
        stage_directions: resolution.stage_directions,
        snapshot: saved.state,
        modified_message: None,
        outcome: resolution.outcome,
    })
}

/// Handles `SanitizeResponse`: trims leaked notes from the reply and renders
/// the scoreboard. The session state is not modified.
///
/// # Errors
///
/// Returns `DomainError` if the snapshot cannot be loaded.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub async fn handle_sanitize_response(
    command: &SanitizeResponse,
    repo: &dyn SnapshotRepository,
) -> Result<ResponseSanitization, DomainError> {
    let (state, stored) = load_state(command.session_id, repo).await?;

    let modified_message = MessageRewriter::default().rewrite(command.content.as_deref());
    let system_message = Scoreboard::for_state(&state).map(|board| board.system_note());

    Ok(ResponseSanitization {
        session_id: command.session_id,
        version: stored.version,
        modified_message,
        snapshot: stored.state,
        system_message,
    })
}

/// Handles `RestoreSnapshot`: replaces the session's state with a snapshot
/// the host kept from an earlier turn. A `null` snapshot is ignored.
///
/// # Errors
///
/// Returns `DomainError::MalformedSnapshot` if the snapshot fails validation,
/// `DomainError::SessionNotFound` if the session does not exist, or
/// `DomainError` if saving fails.
#[instrument(skip_all, fields(session_id = %command.session_id, correlation_id = %command.correlation_id))]
pub async fn handle_restore_snapshot(
    command: &RestoreSnapshot,
    clock: &dyn Clock,
    repo: &dyn SnapshotRepository,
) -> Result<StoredSnapshot, DomainError> {
    // The stored state is not validated here so a corrupt snapshot can be
    // overwritten.
    let stored = repo
        .load_snapshot(command.session_id)
        .await?
        .ok_or(DomainError::SessionNotFound(command.session_id))?;
    if command.snapshot.is_null() {
        return Ok(stored);
    }

    let restored = SessionState::from_snapshot(&command.snapshot)?;
    let saved = persist(command.session_id, &restored, stored.version, clock, repo).await?;
    info!(version = saved.version, "snapshot restored");
    Ok(saved)
}
