use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use super::{PersistenceError, SessionRecord, SessionStore};

#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub input: Value,
    pub result: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SessionRow> for SessionRecord {
    type Error = PersistenceError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(SessionRecord {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            input: serde_json::from_value(row.input)?,
            result: serde_json::from_value(row.result)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL-backed session store (`optimization_sessions` table).
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and wraps it in a store.
    pub async fn connect(database_url: &str) -> Result<Self, PersistenceError> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        info!("PostgreSQL connection pool established");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn save(&self, record: SessionRecord) -> Result<Uuid, PersistenceError> {
        let input = serde_json::to_value(&record.input)?;
        let result = serde_json::to_value(&record.result)?;

        sqlx::query(
            r#"
            INSERT INTO optimization_sessions
                (id, user_id, title, target_model_id, input, result, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.title)
        .bind(&record.input.target_model_id)
        .bind(&input)
        .bind(&result)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        info!("Saved session {} for user {}", record.id, record.user_id);
        Ok(record.id)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SessionRecord>, PersistenceError> {
        let rows = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, title, input, result, created_at, updated_at
            FROM optimization_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SessionRecord::try_from).collect()
    }

    async fn delete_by_id(&self, user_id: Uuid, id: Uuid) -> Result<(), PersistenceError> {
        let result = sqlx::query("DELETE FROM optimization_sessions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::NotFound(id));
        }
        info!("Deleted session {id} for user {user_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::fallback::synthesize;
    use crate::optimizer::input::AliasedInput;
    use crate::optimizer::normalizer::normalize;

    #[test]
    fn test_row_converts_to_record() {
        let input = normalize(&AliasedInput {
            target_model_id: Some("gpt-4o".to_string()),
            raw_prompt: Some("Plan a product launch".to_string()),
            ..Default::default()
        });
        let result = synthesize(&input);
        let now = Utc::now();
        let row = SessionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Plan a product launch".to_string(),
            input: serde_json::to_value(&input).unwrap(),
            result: serde_json::to_value(&result).unwrap(),
            created_at: now,
            updated_at: now,
        };

        let record = SessionRecord::try_from(row).unwrap();
        assert_eq!(record.input, input);
        assert_eq!(record.result, result);
    }

    #[test]
    fn test_row_with_corrupt_json_is_serialization_error() {
        let now = Utc::now();
        let row = SessionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "x".to_string(),
            input: serde_json::json!({"unexpected": true}),
            result: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            SessionRecord::try_from(row),
            Err(PersistenceError::Serialization(_))
        ));
    }
}
