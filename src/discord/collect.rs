//! Channel history collection.

use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use tracing::{debug, info};

/// Discord snowflakes count milliseconds from 2015-01-01T00:00:00Z.
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

const PAGE_SIZE: u8 = 100;

/// Smallest snowflake at or after `time`, usable as an `after` cursor.
#[must_use]
pub fn snowflake_at(time: DateTime<Utc>) -> u64 {
    let ms = time.timestamp_millis() - DISCORD_EPOCH_MS;
    u64::try_from(ms).unwrap_or(0) << 22
}

/// Creation time encoded in a snowflake.
#[must_use]
pub fn snowflake_time(id: u64) -> Option<DateTime<Utc>> {
    let ms = i64::try_from(id >> 22).ok()? + DISCORD_EPOCH_MS;
    DateTime::from_timestamp_millis(ms)
}

/// One conversation line as fed to the summarizer.
#[must_use]
pub fn format_history_line(timestamp: DateTime<Utc>, author: &str, content: &str) -> String {
    format!("{} | {author}: {content}", timestamp.format("%Y-%m-%d %H:%M:%S"))
}

/// Collects non-bot messages posted in `[start, end)`, oldest first, already
/// formatted with [`format_history_line`].
///
/// # Errors
///
/// Returns the Discord error if fetching history fails (e.g. missing access).
pub async fn collect_history(
    cache_http: impl serenity::CacheHttp,
    channel_id: serenity::ChannelId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<String>, serenity::Error> {
    let mut cursor = serenity::MessageId::new(snowflake_at(start).max(1));
    let mut lines = Vec::new();

    loop {
        let mut batch = channel_id
            .messages(
                &cache_http,
                serenity::GetMessages::new().after(cursor).limit(PAGE_SIZE),
            )
            .await?;
        if batch.is_empty() {
            break;
        }
        batch.sort_by_key(|m| m.id);
        let full_page = batch.len() == usize::from(PAGE_SIZE);
        debug!("Fetched {} message(s) after {}", batch.len(), cursor);

        let mut reached_end = false;
        for msg in &batch {
            let Some(sent_at) = snowflake_time(msg.id.get()) else {
                continue;
            };
            if sent_at >= end {
                reached_end = true;
                break;
            }
            if msg.author.bot || msg.content.trim().is_empty() {
                continue;
            }
            let author = msg
                .member
                .as_ref()
                .and_then(|m| m.nick.as_deref())
                .unwrap_or_else(|| msg.author.display_name());
            lines.push(format_history_line(sent_at, author, &msg.content));
        }

        if let Some(last) = batch.last() {
            cursor = last.id;
        }
        if reached_end || !full_page {
            break;
        }
    }

    info!("Collected {} message(s) from channel {}", lines.len(), channel_id);
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_snowflake_roundtrips_time() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
        assert_eq!(snowflake_time(snowflake_at(t)), Some(t));
    }

    #[test]
    fn test_snowflake_before_epoch_is_zero() {
        let t = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(snowflake_at(t), 0);
    }

    #[test]
    fn test_known_snowflake_time() {
        // 175928847299117063 is the example id from Discord's API reference.
        let t = snowflake_time(175_928_847_299_117_063).unwrap();
        assert_eq!(t.timestamp_millis(), 1_462_015_105_796);
    }

    #[test]
    fn test_format_history_line() {
        let t = Utc.with_ymd_and_hms(2024, 12, 17, 10, 0, 5).unwrap();
        assert_eq!(
            format_history_line(t, "ann", "hello there"),
            "2024-12-17 10:00:05 | ann: hello there"
        );
    }
}
