/// Recap - A Discord bot that summarizes channel conversations with Gemini.
///
/// A `/summarize` command collects the channel history for a chosen time
/// window, summarizes it chunk by chunk, merges the partial summaries and
/// delivers the result as a paginated embed or in a private thread. Delivered
/// summaries are stored so they can be searched by day and summarized again.
///
/// # Architecture
///
/// - `utils::segment` packs text into size-bounded chunks and display pages
/// - `ai` wraps the Gemini `generateContent` endpoint behind the `Summarize` trait
/// - `worker` runs the map-then-reduce pipeline and plans delivery
/// - `storage` persists summaries (PostgreSQL via sqlx, or in memory)
/// - `discord` hosts the poise slash commands
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use recap::ai::GeminiClient;
/// use recap::core::models::SummaryLevel;
/// use recap::worker::SummaryPipeline;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     recap::setup_logging();
///
///     let client = GeminiClient::new(
///         recap::core::config::DEFAULT_GEMINI_API_URL,
///         "dummy_gemini_key",
///         Duration::from_secs(120),
///     )?;
///     let pipeline = SummaryPipeline::new(client);
///
///     let conversation = "2024-12-17 10:00:00 | ann: shipping on friday?\n\
///                         2024-12-17 10:01:12 | bob: yes, after the review";
///     let summary = pipeline
///         .produce_summary(conversation, SummaryLevel::Simple)
///         .await?;
///     println!("Summary: {}", summary);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod core;
pub mod discord;
pub mod errors;
pub mod storage;
pub mod utils;
pub mod worker;

/// Configure structured logging with JSON format.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// recap::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
