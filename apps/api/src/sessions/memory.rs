use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PersistenceError, SessionRecord, SessionStore};

/// Process-local session store, used when no `DATABASE_URL` is configured.
/// Contents are lost on restart.
#[derive(Default)]
pub struct MemorySessionStore {
    records: RwLock<Vec<SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, record: SessionRecord) -> Result<Uuid, PersistenceError> {
        let id = record.id;
        self.records.write().await.push(record);
        Ok(id)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SessionRecord>, PersistenceError> {
        let records = self.records.read().await;
        let mut owned: Vec<SessionRecord> = records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order reversed for equal timestamps.
        owned.reverse();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn delete_by_id(&self, user_id: Uuid, id: Uuid) -> Result<(), PersistenceError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !(r.id == id && r.user_id == user_id));
        if records.len() == before {
            return Err(PersistenceError::NotFound(id));
        }
        Ok(())
    }
}
