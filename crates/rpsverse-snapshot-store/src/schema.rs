//! Snapshot store database schema.
//!
//! Mirrors `migrations/`; kept here for environments that bootstrap the
//! table without running migrations.

/// SQL to create the snapshots table. One row per session holds the latest
/// snapshot.
pub const CREATE_SESSION_SNAPSHOTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS session_snapshots (
    session_id UUID PRIMARY KEY,
    version    BIGINT NOT NULL CHECK (version > 0),
    state      JSONB NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";
