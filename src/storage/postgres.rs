//! PostgreSQL-backed summary store

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, error, info};

use super::SummaryStore;
use crate::core::models::{NewSummary, SummaryRecord};
use crate::core::time_range::day_window;
use crate::errors::SummaryError;

const SUMMARY_COLUMNS: &str =
    "id, guild_id, channel_id, user_id, start_time, end_time, summary, created_at";

pub struct PgSummaryStore {
    pool: PgPool,
}

impl PgSummaryStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects, checks the connection and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the database is unreachable or a
    /// migration fails.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, SummaryError> {
        info!("Initializing PostgreSQL connection pool");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;

        info!("PostgreSQL connection pool initialized successfully");
        Ok(Self::new(pool))
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SummaryStore for PgSummaryStore {
    async fn save(&self, summary: &NewSummary) -> Result<SummaryRecord, SummaryError> {
        debug!(
            "Saving summary: start_time={} end_time={} created_at={}",
            summary.start_time, summary.end_time, summary.created_at
        );
        let query = format!(
            "INSERT INTO summaries (guild_id, channel_id, user_id, start_time, end_time, summary, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {SUMMARY_COLUMNS}"
        );
        let record: SummaryRecord = sqlx::query_as(&query)
            .bind(&summary.guild_id)
            .bind(&summary.channel_id)
            .bind(&summary.user_id)
            .bind(summary.start_time)
            .bind(summary.end_time)
            .bind(&summary.summary)
            .bind(summary.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to save summary: {}", e);
                SummaryError::from(e)
            })?;

        info!("Summary saved with ID: {}", record.id);
        Ok(record)
    }

    async fn find_for_user(
        &self,
        id: i64,
        user_id: &str,
    ) -> Result<Option<SummaryRecord>, SummaryError> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM summaries WHERE id = $1 AND user_id = $2");
        let record: Option<SummaryRecord> = sqlx::query_as(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_created_on(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> Result<Vec<SummaryRecord>, SummaryError> {
        let (from, until) = day_window(day);
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM summaries \
             WHERE user_id = $1 AND created_at >= $2 AND created_at < $3 \
             ORDER BY id"
        );
        let records: Vec<SummaryRecord> = sqlx::query_as(&query)
            .bind(user_id)
            .bind(from)
            .bind(until)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }
}
