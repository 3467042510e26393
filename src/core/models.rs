use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::SummaryError;

/// How much detail the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryLevel {
    Simple,
    Detailed,
}

impl SummaryLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SummaryLevel::Simple => "simple",
            SummaryLevel::Detailed => "detailed",
        }
    }

    /// Phrase inserted into prompts to steer the length of the answer.
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            SummaryLevel::Simple => "briefly, in a few short bullet points",
            SummaryLevel::Detailed => {
                "in detail, covering each topic, decision and open question"
            }
        }
    }
}

impl fmt::Display for SummaryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryLevel {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(SummaryLevel::Simple),
            "detailed" => Ok(SummaryLevel::Detailed),
            other => Err(SummaryError::Validation(format!(
                "unknown summary level '{other}'"
            ))),
        }
    }
}

/// One summarization job, built once the conversation has been collected.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub correlation_id: String,
    pub level: SummaryLevel,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub conversation: String,
}

impl SummaryRequest {
    /// # Errors
    ///
    /// Returns a validation error when `end_time` is not after `start_time`.
    pub fn new(
        level: SummaryLevel,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        conversation: String,
    ) -> Result<Self, SummaryError> {
        ensure_ordered(start_time, end_time)?;
        Ok(Self {
            correlation_id: Uuid::new_v4().to_string(),
            level,
            start_time,
            end_time,
            conversation,
        })
    }
}

/// Insert payload for the summary store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSummary {
    pub guild_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl NewSummary {
    /// Builds the payload, stamping `created_at` with the current time.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `end_time` is not after `start_time`.
    pub fn new(
        guild_id: impl Into<String>,
        channel_id: impl Into<String>,
        user_id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        summary: impl Into<String>,
    ) -> Result<Self, SummaryError> {
        ensure_ordered(start_time, end_time)?;
        Ok(Self {
            guild_id: guild_id.into(),
            channel_id: channel_id.into(),
            user_id: user_id.into(),
            start_time,
            end_time,
            summary: summary.into(),
            created_at: Utc::now(),
        })
    }
}

/// A persisted summary. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SummaryRecord {
    pub id: i64,
    pub guild_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl SummaryRecord {
    #[must_use]
    pub fn from_new(id: i64, new: &NewSummary) -> Self {
        Self {
            id,
            guild_id: new.guild_id.clone(),
            channel_id: new.channel_id.clone(),
            user_id: new.user_id.clone(),
            start_time: new.start_time,
            end_time: new.end_time,
            summary: new.summary.clone(),
            created_at: new.created_at,
        }
    }
}

fn ensure_ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), SummaryError> {
    if end <= start {
        return Err(SummaryError::Validation(
            "the end time must be later than the start time".to_string(),
        ));
    }
    Ok(())
}
