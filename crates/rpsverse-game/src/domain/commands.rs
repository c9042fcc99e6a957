//! Commands for the game context, one per host lifecycle hook.

use std::collections::HashMap;

use rpsverse_core::command::Command;
use uuid::Uuid;

/// Command to start a new session with an empty record.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to create.
    pub session_id: Uuid,
}

impl Command for StartSession {
    fn command_type(&self) -> &'static str {
        "game.start_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Uuid {
        self.session_id
    }
}

/// Command run before the reply is generated: detect a play in the user's
/// message and resolve it.
#[derive(Debug, Clone)]
pub struct PreparePrompt {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session this turn belongs to.
    pub session_id: Uuid,
    /// The user's message; absent or empty skips detection.
    pub content: Option<String>,
    /// Identifier of the acting user.
    pub user_id: Option<String>,
    /// Identifier of the addressed character.
    pub character_id: Option<String>,
    /// Identifier → display name directory supplied by the host.
    pub participants: HashMap<String, String>,
}

impl Command for PreparePrompt {
    fn command_type(&self) -> &'static str {
        "game.prepare_prompt"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Uuid {
        self.session_id
    }
}

/// Command run after the reply is generated: strip leaked notes and
/// attach the scoreboard.
#[derive(Debug, Clone)]
pub struct SanitizeResponse {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session this turn belongs to.
    pub session_id: Uuid,
    /// The generated reply.
    pub content: Option<String>,
}

impl Command for SanitizeResponse {
    fn command_type(&self) -> &'static str {
        "game.sanitize_response"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Uuid {
        self.session_id
    }
}

/// Command to rehydrate a session from a previously emitted snapshot,
/// e.g. when the host rewinds or swipes to an earlier message.
#[derive(Debug, Clone)]
pub struct RestoreSnapshot {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session to restore.
    pub session_id: Uuid,
    /// The snapshot to restore; `null` leaves the session untouched.
    pub snapshot: serde_json::Value,
}

impl Command for RestoreSnapshot {
    fn command_type(&self) -> &'static str {
        "game.restore_snapshot"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> Uuid {
        self.session_id
    }
}
