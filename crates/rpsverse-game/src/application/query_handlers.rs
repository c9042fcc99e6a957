//! Query handlers for the game context.

use chrono::{DateTime, Utc};
use rpsverse_core::error::DomainError;
use rpsverse_core::repository::SnapshotRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers::load_state;
use crate::domain::scoreboard::Scoreboard;

/// Read-only view of a session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current snapshot version.
    pub version: i64,
    /// The current snapshot.
    pub snapshot: serde_json::Value,
    /// `record: W-L-T`, once any game has been played.
    pub scoreboard: Option<String>,
    /// When the snapshot was last written.
    pub updated_at: DateTime<Utc>,
}

/// Retrieves a session by its identifier.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session does not exist, or
/// `DomainError::MalformedSnapshot` if its stored snapshot fails validation.
pub async fn get_session_by_id(
    session_id: Uuid,
    repo: &dyn SnapshotRepository,
) -> Result<SessionView, DomainError> {
    let (state, stored) = load_state(session_id, repo).await?;
    Ok(SessionView {
        session_id,
        version: stored.version,
        snapshot: stored.state,
        scoreboard: Scoreboard::for_state(&state).map(|board| board.line()),
        updated_at: stored.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use rpsverse_core::error::DomainError;
    use rpsverse_core::repository::StoredSnapshot;
    use serde_json::json;
    use uuid::Uuid;

    use crate::application::query_handlers::get_session_by_id;
    use rpsverse_test_support::{FixedClock, RecordingSnapshotRepository};

    #[tokio::test]
    async fn test_get_session_by_id_returns_view_with_scoreboard() {
        // Arrange
        let session_id = Uuid::new_v4();
        let state = json!({ "wins": 3, "losses": 1, "ties": 0, "userPlayed": "rock", "otherPlayed": "scissors" });
        let repo = RecordingSnapshotRepository::with_snapshot(StoredSnapshot {
            session_id,
            version: 6,
            state: state.clone(),
            updated_at: FixedClock::standard().0,
        });

        // Act
        let view = get_session_by_id(session_id, &repo).await.unwrap();

        // Assert
        assert_eq!(view.session_id, session_id);
        assert_eq!(view.version, 6);
        assert_eq!(view.snapshot, state);
        assert_eq!(view.scoreboard.as_deref(), Some("record: 3-1-0"));
        assert_eq!(view.updated_at, FixedClock::standard().0);
    }

    #[tokio::test]
    async fn test_get_session_by_id_fresh_session_has_no_scoreboard() {
        let session_id = Uuid::new_v4();
        let repo = RecordingSnapshotRepository::with_snapshot(StoredSnapshot {
            session_id,
            version: 1,
            state: json!({ "wins": 0, "losses": 0, "ties": 0 }),
            updated_at: FixedClock::standard().0,
        });

        let view = get_session_by_id(session_id, &repo).await.unwrap();

        assert!(view.scoreboard.is_none());
    }

    #[tokio::test]
    async fn test_get_session_by_id_not_found() {
        let session_id = Uuid::new_v4();
        let repo = RecordingSnapshotRepository::new();

        let result = get_session_by_id(session_id, &repo).await;

        match result {
            Err(DomainError::SessionNotFound(id)) => assert_eq!(id, session_id),
            other => panic!("expected SessionNotFound, got {other:?}"),
        }
    }
}
