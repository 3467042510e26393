//! Decides how a finished summary reaches the user.

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::core::models::{NewSummary, SummaryRecord};
use crate::errors::SummaryError;
use crate::storage::SummaryStore;
use crate::utils::segment::paginate;

/// Largest page rendered in one embed description.
pub const MAX_PAGE_CHARS: usize = 2048;

/// Discord rejects thread names longer than this.
pub const MAX_THREAD_NAME_CHARS: usize = 100;

/// Where the summary command was run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// A regular text channel in a guild; supports private threads.
    GuildText,
    /// A direct message with the bot.
    Direct,
    /// Anything else (threads, voice text chat, forum posts...).
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Ephemeral message with previous/next buttons.
    Paginated,
    /// A private thread with the requester added.
    PrivateThread,
    /// A single ephemeral embed.
    Direct,
}

#[must_use]
pub fn summary_pages(summary: &str) -> Vec<String> {
    paginate(summary, MAX_PAGE_CHARS)
}

#[must_use]
pub fn plan_delivery(page_count: usize, kind: ChannelKind) -> Delivery {
    if page_count > 1 {
        Delivery::Paginated
    } else if kind == ChannelKind::GuildText {
        Delivery::PrivateThread
    } else {
        Delivery::Direct
    }
}

/// Only summaries of guild text channels are stored.
#[must_use]
pub fn should_persist(kind: ChannelKind) -> bool {
    kind == ChannelKind::GuildText
}

#[must_use]
pub fn thread_name(prefix: &str, display_name: &str, now: DateTime<Utc>) -> String {
    let name = format!("{prefix}-{display_name}-{}", now.format("%Y%m%d%H%M%S"));
    name.chars().take(MAX_THREAD_NAME_CHARS).collect()
}

/// Saves `record` (when there is one) and only then runs `follow_up` with the
/// outcome. Anything that waits on the user, like page buttons, belongs in
/// `follow_up` so it never delays the save. A failed save still runs it.
pub async fn save_then<F, Fut>(
    store: &dyn SummaryStore,
    record: Option<&NewSummary>,
    follow_up: F,
) -> Fut::Output
where
    F: FnOnce(Option<Result<SummaryRecord, SummaryError>>) -> Fut,
    Fut: Future,
{
    let saved = match record {
        Some(record) => {
            let result = store.save(record).await;
            match &result {
                Ok(saved) => info!("Saved delivered summary as #{}", saved.id),
                Err(e) => error!("Failed to save delivered summary: {}", e),
            }
            Some(result)
        }
        None => None,
    };
    follow_up(saved).await
}
