//! Embeds and button rows sent to Discord.

use poise::serenity_prelude as serenity;

use crate::core::models::SummaryRecord;

/// Custom id prefix of the "close thread" button; the requester's user id follows.
pub const CLOSE_THREAD_PREFIX: &str = "recap-close-thread:";

/// Discord allows at most this many fields per embed.
pub const MAX_EMBED_FIELDS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    Summary,
    Resummary,
}

impl SummaryStyle {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            SummaryStyle::Summary => "📋 Conversation summary",
            SummaryStyle::Resummary => "📋 Re-summary",
        }
    }

    #[must_use]
    pub fn colour(self) -> serenity::Colour {
        match self {
            SummaryStyle::Summary => serenity::Colour::BLUE,
            SummaryStyle::Resummary => serenity::Colour::DARK_GREEN,
        }
    }

    #[must_use]
    pub const fn thread_prefix(self) -> &'static str {
        match self {
            SummaryStyle::Summary => "summary",
            SummaryStyle::Resummary => "resummary",
        }
    }

    #[must_use]
    pub const fn audit_reason(self) -> &'static str {
        match self {
            SummaryStyle::Summary => "Summary thread for user",
            SummaryStyle::Resummary => "Re-summary thread for user",
        }
    }
}

/// Footer line for a summary page, e.g. `Requested by ann · page 2/3`.
#[must_use]
pub fn page_footer(requester: &str, page_no: usize, page_count: usize) -> String {
    if page_count > 1 {
        format!("Requested by {requester} · page {page_no}/{page_count}")
    } else {
        format!("Requested by {requester}")
    }
}

#[must_use]
pub fn summary_embed(
    style: SummaryStyle,
    page: &str,
    page_no: usize,
    page_count: usize,
    requester: &str,
    avatar_url: Option<String>,
) -> serenity::CreateEmbed {
    let mut footer = serenity::CreateEmbedFooter::new(page_footer(requester, page_no, page_count));
    if let Some(url) = avatar_url {
        footer = footer.icon_url(url);
    }
    serenity::CreateEmbed::new()
        .title(style.title())
        .description(page)
        .colour(style.colour())
        .timestamp(serenity::Timestamp::now())
        .footer(footer)
}

/// Result list for the search command. Only the first [`MAX_EMBED_FIELDS`]
/// records get a field.
#[must_use]
pub fn search_results_embed(date: &str, records: &[SummaryRecord]) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(format!("📄 Summaries from {date}"))
        .colour(serenity::Colour::PURPLE)
        .timestamp(serenity::Timestamp::now());

    if records.len() > MAX_EMBED_FIELDS {
        embed = embed.description(format!(
            "Showing the first {MAX_EMBED_FIELDS} of {} summaries.",
            records.len()
        ));
    }

    for record in records.iter().take(MAX_EMBED_FIELDS) {
        embed = embed.field(
            format!("Summary ID: {}", record.id),
            format!(
                "Channel: <#{}>\nCreated: {} UTC\nCovers: {} – {}",
                record.channel_id,
                record.created_at.format("%Y-%m-%d %H:%M:%S"),
                record.start_time.format("%Y-%m-%d %H:%M"),
                record.end_time.format("%Y-%m-%d %H:%M"),
            ),
            false,
        );
    }
    embed
}

#[must_use]
pub fn help_embed() -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("📖 Recap help")
        .colour(serenity::Colour::DARK_GREEN)
        .timestamp(serenity::Timestamp::now())
        .field(
            "/summarize",
            "Summarizes this channel's conversation.\n\
             1. Pick a level: `Simple` or `Detailed`.\n\
             2. Pick a range: `Last hour`, `Last 24 hours`, `Today`, `Yesterday` or `Custom`.\n\
             3. For `Custom`, fill in `start` and `end` as `YYYY-MM-DD HH:MM` (UTC).\n\
             In a text channel the summary goes to a private thread; elsewhere it is sent only to you.",
            false,
        )
        .field(
            "/search [date]",
            "Lists the summaries you created on a given day.\n**Example**: `/search 2024-12-17`",
            false,
        )
        .field(
            "/resummarize [summary_id]",
            "Summarizes one of your saved summaries again.\n**Example**: `/resummarize 1`",
            false,
        )
        .footer(serenity::CreateEmbedFooter::new("Thanks for using Recap!"))
}

#[must_use]
pub fn close_thread_custom_id(owner: serenity::UserId) -> String {
    format!("{CLOSE_THREAD_PREFIX}{}", owner.get())
}

/// Returns the owner's user id if `custom_id` belongs to a close-thread button.
#[must_use]
pub fn parse_close_thread_id(custom_id: &str) -> Option<u64> {
    custom_id
        .strip_prefix(CLOSE_THREAD_PREFIX)
        .and_then(|id| id.parse::<u64>().ok())
        .filter(|id| *id != 0)
}

#[must_use]
pub fn close_thread_row(owner: serenity::UserId, disabled: bool) -> serenity::CreateActionRow {
    serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(close_thread_custom_id(owner))
            .label("🔒 Close thread")
            .style(serenity::ButtonStyle::Danger)
            .disabled(disabled),
    ])
}

/// Previous/next buttons; an edge button is disabled, both are once paging ends.
#[must_use]
pub fn pager_row(
    prev_id: &str,
    next_id: &str,
    current: usize,
    page_count: usize,
    finished: bool,
) -> serenity::CreateActionRow {
    serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(prev_id)
            .label("⬅️ Previous")
            .style(serenity::ButtonStyle::Primary)
            .disabled(finished || current == 0),
        serenity::CreateButton::new(next_id)
            .label("Next ➡️")
            .style(serenity::ButtonStyle::Primary)
            .disabled(finished || current + 1 >= page_count),
    ])
}

/// Page index after pressing previous (`forward == false`) or next.
#[must_use]
pub fn turn_page(current: usize, page_count: usize, forward: bool) -> usize {
    if forward {
        (current + 1).min(page_count.saturating_sub(1))
    } else {
        current.saturating_sub(1)
    }
}
