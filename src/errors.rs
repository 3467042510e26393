use thiserror::Error;

/// Failure talking to the summarization endpoint.
///
/// Keeps the HTTP status and raw body (when there was one) so the caller can
/// log what the provider actually said.
#[derive(Debug, Error)]
#[error("Failed to access summarization API: {message}")]
pub struct SummarizationError {
    pub status: Option<u16>,
    pub body: Option<String>,
    pub message: String,
}

impl SummarizationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl From<reqwest::Error> for SummarizationError {
    fn from(error: reqwest::Error) -> Self {
        let status = error.status().map(|s| s.as_u16());
        Self {
            status,
            body: None,
            message: format!("HTTP request failed: {error}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Summarization(#[from] SummarizationError),

    #[error("The summary came back empty")]
    EmptyResult,

    #[error("Failed to access summary store: {0}")]
    Persistence(String),
}

impl From<sqlx::Error> for SummaryError {
    fn from(error: sqlx::Error) -> Self {
        SummaryError::Persistence(error.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for SummaryError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        SummaryError::Persistence(format!("migration failed: {error}"))
    }
}
