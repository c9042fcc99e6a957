//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every turn-lifecycle command.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable command name, used as a tracing field.
    fn command_type(&self) -> &'static str;

    /// Correlation ID threading one request through its log lines.
    fn correlation_id(&self) -> Uuid;

    /// The session this command acts on.
    fn session_id(&self) -> Uuid;
}
