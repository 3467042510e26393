use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::info;

use super::SummaryStore;
use crate::core::models::{NewSummary, SummaryRecord};
use crate::core::time_range::day_window;
use crate::errors::SummaryError;

/// Process-local store. Everything is lost on restart.
#[derive(Debug)]
pub struct MemorySummaryStore {
    records: RwLock<Vec<SummaryRecord>>,
    next_id: AtomicI64,
}

impl MemorySummaryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemorySummaryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SummaryStore for MemorySummaryStore {
    async fn save(&self, summary: &NewSummary) -> Result<SummaryRecord, SummaryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = SummaryRecord::from_new(id, summary);
        self.records.write().await.push(record.clone());
        info!("Summary saved in memory with ID: {}", id);
        Ok(record)
    }

    async fn find_for_user(
        &self,
        id: i64,
        user_id: &str,
    ) -> Result<Option<SummaryRecord>, SummaryError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn find_created_on(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> Result<Vec<SummaryRecord>, SummaryError> {
        let (from, until) = day_window(day);
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id && r.created_at >= from && r.created_at < until)
            .cloned()
            .collect())
    }
}
