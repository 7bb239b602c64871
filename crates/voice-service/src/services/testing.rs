//! Session repository doubles for service tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use voice_core::{
    DomainError, PresenceKey, RepoResult, SessionQuery, SessionRecord, SessionRepository,
};

/// Repository keeping records in a vector
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionRepository {
    records: Arc<Mutex<Vec<SessionRecord>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<SessionRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn records(&self) -> Vec<SessionRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn append(&self, record: &SessionRecord) -> RepoResult<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn sum_duration_ms(&self, query: &SessionQuery) -> RepoResult<i64> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| query.matches(record))
            .map(SessionRecord::duration_ms)
            .sum())
    }

    async fn count(&self, key: PresenceKey) -> RepoResult<i64> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.key() == key)
            .count() as i64)
    }

    async fn find_by_key(&self, key: PresenceKey) -> RepoResult<Vec<SessionRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.key() == key)
            .cloned()
            .collect())
    }
}

/// Repository that fails every call for one user and delegates the rest
#[derive(Debug, Clone)]
pub struct FailingSessionRepository {
    inner: InMemorySessionRepository,
    failing_user: Option<voice_core::Snowflake>,
}

impl FailingSessionRepository {
    /// Fail every call
    pub fn always() -> Self {
        Self {
            inner: InMemorySessionRepository::new(),
            failing_user: None,
        }
    }

    /// Fail only calls concerning `user_id`
    pub fn for_user(user_id: voice_core::Snowflake) -> Self {
        Self {
            inner: InMemorySessionRepository::new(),
            failing_user: Some(user_id),
        }
    }

    pub fn records(&self) -> Vec<SessionRecord> {
        self.inner.records()
    }

    fn check(&self, user_id: voice_core::Snowflake) -> RepoResult<()> {
        match self.failing_user {
            Some(failing) if failing != user_id => Ok(()),
            _ => Err(DomainError::DatabaseError("disk I/O error".to_string())),
        }
    }
}

#[async_trait]
impl SessionRepository for FailingSessionRepository {
    async fn append(&self, record: &SessionRecord) -> RepoResult<()> {
        self.check(record.user_id)?;
        self.inner.append(record).await
    }

    async fn sum_duration_ms(&self, query: &SessionQuery) -> RepoResult<i64> {
        self.check(query.user_id)?;
        self.inner.sum_duration_ms(query).await
    }

    async fn count(&self, key: PresenceKey) -> RepoResult<i64> {
        self.check(key.user_id)?;
        self.inner.count(key).await
    }

    async fn find_by_key(&self, key: PresenceKey) -> RepoResult<Vec<SessionRecord>> {
        self.check(key.user_id)?;
        self.inner.find_by_key(key).await
    }
}
