//! Routes for the game session lifecycle.
//!
//! A host calls `before-prompt` with the user's message before generating a
//! reply, and `after-response` with the generated reply afterwards.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rpsverse_core::repository::StoredSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use rpsverse_game::application::command_handlers::{
    self, PromptPreparation, ResponseSanitization,
};
use rpsverse_game::application::query_handlers::{self, SessionView};
use rpsverse_game::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Default, Deserialize)]
pub struct StartSessionRequest {
    /// Caller-chosen identifier; generated when absent.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

/// Request body for PUT /{session_id}/snapshot.
#[derive(Debug, Deserialize)]
pub struct RestoreSnapshotRequest {
    /// The snapshot to restore. `null` or absent leaves the session as is.
    #[serde(default)]
    pub snapshot: serde_json::Value,
}

/// Request body for POST /{session_id}/before-prompt.
#[derive(Debug, Deserialize)]
pub struct BeforePromptRequest {
    /// The user's message.
    #[serde(default)]
    pub content: Option<String>,
    /// Identifier of the user persona.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Identifier of the character persona.
    #[serde(default)]
    pub character_id: Option<String>,
    /// Display names by participant identifier.
    #[serde(default)]
    pub participants: HashMap<String, String>,
}

/// Request body for POST /{session_id}/after-response.
#[derive(Debug, Deserialize)]
pub struct AfterResponseRequest {
    /// The generated reply.
    #[serde(default)]
    pub content: Option<String>,
}

/// Response body for commands that return the stored snapshot.
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    /// The session identifier.
    pub session_id: Uuid,
    /// Snapshot version after the command.
    pub version: i64,
    /// The stored snapshot.
    pub snapshot: serde_json::Value,
    /// When the snapshot was written.
    pub updated_at: DateTime<Utc>,
}

impl From<StoredSnapshot> for SnapshotResponse {
    fn from(stored: StoredSnapshot) -> Self {
        Self {
            session_id: stored.session_id,
            version: stored.version,
            snapshot: stored.state,
            updated_at: stored.updated_at,
        }
    }
}

/// POST /
#[instrument(skip_all)]
async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let command = commands::StartSession {
        correlation_id: Uuid::new_v4(),
        session_id: request.session_id.unwrap_or_else(Uuid::new_v4),
    };

    info!(correlation_id = %command.correlation_id, session_id = %command.session_id, "handling start_session command");

    let stored = command_handlers::handle_start_session(
        &command,
        state.clock.as_ref(),
        &*state.snapshot_repository,
    )
    .await?;

    Ok(Json(stored.into()))
}

/// GET /{session_id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let view = query_handlers::get_session_by_id(session_id, &*state.snapshot_repository).await?;
    Ok(Json(view))
}

/// PUT /{session_id}/snapshot
#[instrument(skip(state, request))]
async fn restore_snapshot(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<RestoreSnapshotRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let command = commands::RestoreSnapshot {
        correlation_id: Uuid::new_v4(),
        session_id,
        snapshot: request.snapshot,
    };

    info!(correlation_id = %command.correlation_id, "handling restore_snapshot command");

    let stored = command_handlers::handle_restore_snapshot(
        &command,
        state.clock.as_ref(),
        &*state.snapshot_repository,
    )
    .await?;

    Ok(Json(stored.into()))
}

/// POST /{session_id}/before-prompt
#[instrument(skip(state, request))]
async fn before_prompt(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<BeforePromptRequest>,
) -> Result<Json<PromptPreparation>, ApiError> {
    let command = commands::PreparePrompt {
        correlation_id: Uuid::new_v4(),
        session_id,
        content: request.content,
        user_id: request.user_id,
        character_id: request.character_id,
        participants: request.participants,
    };

    info!(correlation_id = %command.correlation_id, "handling prepare_prompt command");

    let preparation = command_handlers::handle_prepare_prompt(
        &command,
        state.classifier.as_ref(),
        state.clock.as_ref(),
        &state.rng,
        &*state.snapshot_repository,
    )
    .await?;

    Ok(Json(preparation))
}

/// POST /{session_id}/after-response
#[instrument(skip(state, request))]
async fn after_response(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AfterResponseRequest>,
) -> Result<Json<ResponseSanitization>, ApiError> {
    let command = commands::SanitizeResponse {
        correlation_id: Uuid::new_v4(),
        session_id,
        content: request.content,
    };

    info!(correlation_id = %command.correlation_id, "handling sanitize_response command");

    let sanitization =
        command_handlers::handle_sanitize_response(&command, &*state.snapshot_repository).await?;

    Ok(Json(sanitization))
}

/// Returns the router for the session lifecycle.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_session))
        .route("/{session_id}", get(get_session))
        .route("/{session_id}/snapshot", put(restore_snapshot))
        .route("/{session_id}/before-prompt", post(before_prompt))
        .route("/{session_id}/after-response", post(after_response))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rpsverse_core::classifier::PlayClassifier;
    use rpsverse_core::clock::Clock;
    use rpsverse_core::repository::SnapshotRepository;
    use rpsverse_core::rng::DeterministicRng;
    use rpsverse_test_support::{
        FailingClassifier, FailingSnapshotRepository, FixedClock, MockRng,
        RecordingSnapshotRepository, ScriptedClassifier,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app_state_with(
        snapshot_repository: Arc<dyn SnapshotRepository>,
        classifier: Arc<dyn PlayClassifier>,
    ) -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::standard());
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
        AppState::new(clock, rng, snapshot_repository, classifier)
    }

    fn stored(session_id: Uuid, version: i64, state: Value) -> StoredSnapshot {
        StoredSnapshot {
            session_id,
            version,
            state,
            updated_at: FixedClock::standard().0,
        }
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_start_session_returns_first_snapshot() {
        // Arrange
        let repo = Arc::new(RecordingSnapshotRepository::new());
        let app = router().with_state(app_state_with(
            repo.clone(),
            Arc::new(ScriptedClassifier::empty()),
        ));
        let session_id = Uuid::new_v4();

        // Act
        let (status, json) = send(app, "POST", "/", Some(json!({ "session_id": session_id }))).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["session_id"], session_id.to_string());
        assert_eq!(json["version"], 1);
        assert_eq!(json["snapshot"]["wins"], 0);
        assert!(repo.current(session_id).is_some());
    }

    #[tokio::test]
    async fn test_start_session_generates_id_when_absent() {
        let app = router().with_state(app_state_with(
            Arc::new(RecordingSnapshotRepository::new()),
            Arc::new(ScriptedClassifier::empty()),
        ));

        let (status, json) = send(app, "POST", "/", Some(json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        Uuid::parse_str(json["session_id"].as_str().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_start_existing_session_returns_400() {
        let session_id = Uuid::new_v4();
        let repo = RecordingSnapshotRepository::with_snapshot(stored(session_id, 1, json!({})));
        let app = router().with_state(app_state_with(
            Arc::new(repo),
            Arc::new(ScriptedClassifier::empty()),
        ));

        let (status, json) = send(app, "POST", "/", Some(json!({ "session_id": session_id }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_before_prompt_resolves_detected_play() {
        // Arrange
        let session_id = Uuid::new_v4();
        let repo = Arc::new(RecordingSnapshotRepository::with_snapshot(stored(
            session_id,
            1,
            json!({ "wins": 0, "losses": 0, "ties": 0 }),
        )));
        let classifier = Arc::new(ScriptedClassifier::ranking(&["paper", "nothing"]));
        let app = router().with_state(app_state_with(repo.clone(), classifier.clone()));
        let body = json!({
            "content": "{{user}} flattens a sheet of paper",
            "user_id": "u1",
            "character_id": "c1",
            "participants": { "u1": "Ann", "c1": "Bo" }
        });

        // Act
        let (status, json) = send(
            app,
            "POST",
            &format!("/{session_id}/before-prompt"),
            Some(body),
        )
        .await;

        // Assert: MockRng draws rock, which paper beats.
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"], "victory");
        assert_eq!(json["version"], 2);
        assert_eq!(json["snapshot"]["wins"], 1);
        assert_eq!(json["snapshot"]["userPlayed"], "paper");
        assert_eq!(json["snapshot"]["otherPlayed"], "rock");
        assert!(json["modified_message"].is_null());
        assert!(
            json["stage_directions"]
                .as_str()
                .unwrap()
                .contains("throwing paper")
        );
        assert_eq!(
            classifier.requests()[0].sequence,
            "Ann flattens a sheet of paper"
        );
    }

    #[tokio::test]
    async fn test_before_prompt_survives_classifier_outage() {
        let session_id = Uuid::new_v4();
        let repo = Arc::new(RecordingSnapshotRepository::with_snapshot(stored(
            session_id,
            1,
            json!({ "wins": 2, "losses": 1, "ties": 0 }),
        )));
        let app = router().with_state(app_state_with(
            repo,
            Arc::new(FailingClassifier::timing_out()),
        ));

        let (status, json) = send(
            app,
            "POST",
            &format!("/{session_id}/before-prompt"),
            Some(json!({ "content": "I throw rock" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["outcome"].is_null());
        assert_eq!(json["snapshot"]["wins"], 2);
        assert!(
            json["stage_directions"]
                .as_str()
                .unwrap()
                .ends_with("no one is playing rock-paper-scissors in this moment.")
        );
    }

    #[tokio::test]
    async fn test_before_prompt_unknown_session_returns_404() {
        let app = router().with_state(app_state_with(
            Arc::new(RecordingSnapshotRepository::new()),
            Arc::new(ScriptedClassifier::empty()),
        ));
        let session_id = Uuid::new_v4();

        let (status, json) = send(
            app,
            "POST",
            &format!("/{session_id}/before-prompt"),
            Some(json!({ "content": "rock" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "session_not_found");
    }

    #[tokio::test]
    async fn test_after_response_trims_and_reports_record() {
        let session_id = Uuid::new_v4();
        let repo = RecordingSnapshotRepository::with_snapshot(stored(
            session_id,
            3,
            json!({ "wins": 1, "losses": 0, "ties": 1, "userPlayed": "rock", "otherPlayed": "rock" }),
        ));
        let app = router().with_state(app_state_with(
            Arc::new(repo),
            Arc::new(ScriptedClassifier::empty()),
        ));

        let (status, json) = send(
            app,
            "POST",
            &format!("/{session_id}/after-response"),
            Some(json!({ "content": "The dust settles.\nSystem: leaked note" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["modified_message"], "The dust settles.");
        assert_eq!(json["system_message"], "---\n{{user}}'s record: 1-0-1.");
        assert_eq!(json["version"], 3);
    }

    #[tokio::test]
    async fn test_restore_snapshot_returns_new_version() {
        let session_id = Uuid::new_v4();
        let repo = Arc::new(RecordingSnapshotRepository::with_snapshot(stored(
            session_id,
            4,
            json!({ "wins": 3, "losses": 3, "ties": 3 }),
        )));
        let app = router().with_state(app_state_with(
            repo.clone(),
            Arc::new(ScriptedClassifier::empty()),
        ));

        let (status, json) = send(
            app,
            "PUT",
            &format!("/{session_id}/snapshot"),
            Some(json!({ "snapshot": { "wins": 1 } })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["version"], 5);
        assert_eq!(json["snapshot"]["wins"], 1);
        assert_eq!(json["snapshot"]["losses"], 0);
        assert_eq!(repo.current(session_id).unwrap().version, 5);
    }

    #[tokio::test]
    async fn test_restore_malformed_snapshot_returns_400() {
        let session_id = Uuid::new_v4();
        let repo = RecordingSnapshotRepository::with_snapshot(stored(session_id, 1, json!({})));
        let app = router().with_state(app_state_with(
            Arc::new(repo),
            Arc::new(ScriptedClassifier::empty()),
        ));

        let (status, json) = send(
            app,
            "PUT",
            &format!("/{session_id}/snapshot"),
            Some(json!({ "snapshot": { "wins": "many" } })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "malformed_snapshot");
    }

    #[tokio::test]
    async fn test_get_session_returns_scoreboard_line() {
        let session_id = Uuid::new_v4();
        let repo = RecordingSnapshotRepository::with_snapshot(stored(
            session_id,
            2,
            json!({ "wins": 0, "losses": 1, "ties": 0 }),
        ));
        let app = router().with_state(app_state_with(
            Arc::new(repo),
            Arc::new(ScriptedClassifier::empty()),
        ));

        let (status, json) = send(app, "GET", &format!("/{session_id}"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["scoreboard"], "record: 0-1-0");
        assert_eq!(json["version"], 2);
    }

    #[tokio::test]
    async fn test_repository_failure_returns_500() {
        let app = router().with_state(app_state_with(
            Arc::new(FailingSnapshotRepository),
            Arc::new(ScriptedClassifier::empty()),
        ));
        let session_id = Uuid::new_v4();

        let (status, json) = send(app, "GET", &format!("/{session_id}"), None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }

    #[tokio::test]
    async fn test_before_prompt_rejects_non_json_body() {
        let app = router().with_state(app_state_with(
            Arc::new(RecordingSnapshotRepository::new()),
            Arc::new(ScriptedClassifier::empty()),
        ));
        let session_id = Uuid::new_v4();

        let request = Request::builder()
            .method("POST")
            .uri(format!("/{session_id}/before-prompt"))
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
