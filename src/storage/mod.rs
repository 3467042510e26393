//! Persistence for delivered summaries.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::models::{NewSummary, SummaryRecord};
use crate::errors::SummaryError;

pub use memory::MemorySummaryStore;
pub use postgres::PgSummaryStore;

#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Inserts a summary and returns it with its assigned id.
    async fn save(&self, summary: &NewSummary) -> Result<SummaryRecord, SummaryError>;

    /// Looks up a summary by id, but only if `user_id` created it.
    async fn find_for_user(
        &self,
        id: i64,
        user_id: &str,
    ) -> Result<Option<SummaryRecord>, SummaryError>;

    /// Summaries created by `user_id` during the UTC day `day`, oldest first.
    async fn find_created_on(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> Result<Vec<SummaryRecord>, SummaryError>;
}
