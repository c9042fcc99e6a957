//! `PostgreSQL` implementation of the `SnapshotRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use rpsverse_core::error::DomainError;
use rpsverse_core::repository::{SnapshotRepository, StoredSnapshot};

use crate::schema::CREATE_SESSION_SNAPSHOTS_TABLE;

/// PostgreSQL-backed snapshot repository.
#[derive(Debug, Clone)]
pub struct PgSnapshotRepository {
    pool: PgPool,
}

impl PgSnapshotRepository {
    /// Creates a new `PgSnapshotRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the snapshots table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(CREATE_SESSION_SNAPSHOTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }

    async fn current_version(&self, session_id: Uuid) -> Result<i64, DomainError> {
        let version: Option<i64> =
            sqlx::query_scalar("SELECT version FROM session_snapshots WHERE session_id = $1")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(infrastructure)?;
        Ok(version.unwrap_or(0))
    }
}

fn infrastructure(error: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("snapshot store: {error}"))
}

#[async_trait]
impl SnapshotRepository for PgSnapshotRepository {
    #[instrument(skip(self))]
    async fn load_snapshot(&self, session_id: Uuid) -> Result<Option<StoredSnapshot>, DomainError> {
        let row: Option<(Uuid, i64, serde_json::Value, DateTime<Utc>)> = sqlx::query_as(
            "SELECT session_id, version, state, updated_at \
             FROM session_snapshots WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;

        Ok(row.map(|(session_id, version, state, updated_at)| StoredSnapshot {
            session_id,
            version,
            state,
            updated_at,
        }))
    }

    #[instrument(skip(self, snapshot), fields(session_id = %snapshot.session_id, version = snapshot.version))]
    async fn save_snapshot(
        &self,
        snapshot: &StoredSnapshot,
        expected_version: i64,
    ) -> Result<(), DomainError> {
        let result = if expected_version == 0 {
            sqlx::query(
                "INSERT INTO session_snapshots (session_id, version, state, updated_at) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (session_id) DO NOTHING",
            )
            .bind(snapshot.session_id)
            .bind(snapshot.version)
            .bind(&snapshot.state)
            .bind(snapshot.updated_at)
            .execute(&self.pool)
            .await
        } else {
            sqlx::query(
                "UPDATE session_snapshots \
                 SET version = $2, state = $3, updated_at = $4 \
                 WHERE session_id = $1 AND version = $5",
            )
            .bind(snapshot.session_id)
            .bind(snapshot.version)
            .bind(&snapshot.state)
            .bind(snapshot.updated_at)
            .bind(expected_version)
            .execute(&self.pool)
            .await
        }
        .map_err(infrastructure)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ConcurrencyConflict {
                session_id: snapshot.session_id,
                expected: expected_version,
                actual: self.current_version(snapshot.session_id).await?,
            });
        }
        Ok(())
    }
}
