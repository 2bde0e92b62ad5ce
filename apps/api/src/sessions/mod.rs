//! Session persistence — stores each optimization (input + result) for the user's history.
//!
//! The optimizer only ever writes sessions, best-effort. Reads and deletes come from the
//! history endpoints in `handlers.rs`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::optimizer::input::{InputRecord, OptimizedResult};

pub mod handlers;
pub mod memory;
pub mod postgres;

/// Number of characters of the raw prompt used as the session title.
pub const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session {0} not found")]
    NotFound(Uuid),
}

/// A persisted optimization: what the user asked for and what they got back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub input: InputRecord,
    pub result: OptimizedResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(user_id: Uuid, input: InputRecord, result: OptimizedResult) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: session_title(&input.raw_prompt),
            input,
            result,
            created_at: now,
            updated_at: now,
        }
    }
}

/// First `TITLE_MAX_CHARS` characters of the prompt (char-based, never splits a code point).
pub fn session_title(raw_prompt: &str) -> String {
    raw_prompt.trim().chars().take(TITLE_MAX_CHARS).collect()
}

/// Storage backend for sessions. Ownership scoping is the store's concern.
///
/// Carried as `Arc<dyn SessionStore>`; Postgres in production, in-memory otherwise.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, record: SessionRecord) -> Result<Uuid, PersistenceError>;

    /// Sessions owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SessionRecord>, PersistenceError>;

    /// Deletes a session owned by `user_id`. `NotFound` if absent or owned by someone else.
    async fn delete_by_id(&self, user_id: Uuid, id: Uuid) -> Result<(), PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_truncates_to_fifty_chars() {
        let prompt = "a".repeat(80);
        assert_eq!(session_title(&prompt).chars().count(), 50);
    }

    #[test]
    fn test_title_keeps_short_prompt() {
        assert_eq!(session_title("  Write a haiku  "), "Write a haiku");
    }

    #[test]
    fn test_title_counts_chars_not_bytes() {
        let prompt = "é".repeat(60);
        let title = session_title(&prompt);
        assert_eq!(title.chars().count(), 50);
        assert_eq!(title.len(), 100);
    }
}
