//! The response store seam.
//!
//! Handlers hold an `Arc<dyn ResponseStore>`. Production wires up
//! [`PgResponseStore`]; tests and local runs without a database use
//! [`MemoryResponseStore`].

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use surveydesk_core::survey::{NewSurveyResponse, SurveyResponse};
use surveydesk_core::types::DbId;
use tokio::sync::RwLock;

use crate::repositories::SurveyResponseRepo;
use crate::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Remote record store: one read of everything, one append.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Every stored response, newest first.
    async fn list_all(&self) -> Result<Vec<SurveyResponse>, StoreError>;

    /// Append one response. The store assigns `id` and `created_at`.
    async fn insert(&self, input: NewSurveyResponse) -> Result<SurveyResponse, StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

pub struct PgResponseStore {
    pool: DbPool,
}

impl PgResponseStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseStore for PgResponseStore {
    async fn list_all(&self) -> Result<Vec<SurveyResponse>, StoreError> {
        Ok(SurveyResponseRepo::list_all(&self.pool).await?)
    }

    async fn insert(&self, input: NewSurveyResponse) -> Result<SurveyResponse, StoreError> {
        let created = SurveyResponseRepo::create(&self.pool, &input).await?;
        tracing::debug!(id = created.id, "Stored survey response");
        Ok(created)
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local store. Failures can be switched on to exercise error paths.
#[derive(Default)]
pub struct MemoryResponseStore {
    records: RwLock<Vec<SurveyResponse>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records, kept in the given order.
    pub fn with_records(records: Vec<SurveyResponse>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ResponseStore for MemoryResponseStore {
    async fn list_all(&self) -> Result<Vec<SurveyResponse>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read failed".into()));
        }
        Ok(self.records.read().await.clone())
    }

    async fn insert(&self, input: NewSurveyResponse) -> Result<SurveyResponse, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write failed".into()));
        }
        let mut records = self.records.write().await;
        let id: DbId = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let created = SurveyResponse {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            responses: input.responses_by_name(),
            suggestions: Some(input.suggestions),
            created_at: Utc::now(),
        };
        // Newest first.
        records.insert(0, created.clone());
        Ok(created)
    }
}
