//! Slash commands.

use chrono::Utc;
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use super::collect::collect_history;
use super::delivery::{Delivered, deliver_summary};
use super::message_formatter::{SummaryStyle, help_embed, search_results_embed};
use super::{Context, Error, is_forbidden, reply_ephemeral};
use crate::core::models::{NewSummary, SummaryLevel, SummaryRequest};
use crate::core::time_range::{
    TimeRangeOption, parse_search_date, parse_summary_id, resolve_range,
};
use crate::errors::SummaryError;
use crate::worker::CANONICAL_FAILURE_MESSAGE;
use crate::worker::deliver::{ChannelKind, save_then, should_persist};

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum LevelChoice {
    #[name = "Simple"]
    Simple,
    #[name = "Detailed"]
    Detailed,
}

impl From<LevelChoice> for SummaryLevel {
    fn from(choice: LevelChoice) -> Self {
        match choice {
            LevelChoice::Simple => SummaryLevel::Simple,
            LevelChoice::Detailed => SummaryLevel::Detailed,
        }
    }
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum RangeChoice {
    #[name = "Last hour"]
    LastHour,
    #[name = "Last 24 hours"]
    Last24Hours,
    #[name = "Today"]
    Today,
    #[name = "Yesterday"]
    Yesterday,
    #[name = "Custom"]
    Custom,
}

impl From<RangeChoice> for TimeRangeOption {
    fn from(choice: RangeChoice) -> Self {
        match choice {
            RangeChoice::LastHour => TimeRangeOption::LastHour,
            RangeChoice::Last24Hours => TimeRangeOption::Last24Hours,
            RangeChoice::Today => TimeRangeOption::Today,
            RangeChoice::Yesterday => TimeRangeOption::Yesterday,
            RangeChoice::Custom => TimeRangeOption::Custom,
        }
    }
}

#[must_use]
pub fn all() -> Vec<poise::Command<super::Data, Error>> {
    vec![summarize(), search(), resummarize(), help()]
}

/// Summarize this channel's conversation
#[poise::command(slash_command)]
pub async fn summarize(
    ctx: Context<'_>,
    #[description = "How much detail to include"] level: LevelChoice,
    #[description = "Which part of the conversation to summarize"] range: RangeChoice,
    #[description = "Custom range start, YYYY-MM-DD HH:MM (UTC)"] start: Option<String>,
    #[description = "Custom range end, YYYY-MM-DD HH:MM (UTC)"] end: Option<String>,
) -> Result<(), Error> {
    info!(
        "/summarize invoked: user={} level={:?} range={:?}",
        ctx.author().name,
        level,
        range
    );
    ctx.defer_ephemeral().await?;

    let (start_time, end_time) =
        match resolve_range(range.into(), start.as_deref(), end.as_deref(), Utc::now()) {
            Ok(window) => window,
            Err(e) => {
                warn!("Rejected time range: {}", e);
                reply_ephemeral(ctx, format!("❌ {e}")).await?;
                return Ok(());
            }
        };
    info!("Resolved time range: start={} end={}", start_time, end_time);

    let kind = channel_kind(ctx).await;
    if kind == ChannelKind::Other {
        reply_ephemeral(ctx, "❌ Summaries aren't available in this kind of channel.").await?;
        return Ok(());
    }

    let lines = match collect_history(ctx.serenity_context(), ctx.channel_id(), start_time, end_time)
        .await
    {
        Ok(lines) => lines,
        Err(e) if is_forbidden(&e) => {
            warn!("Missing permission to read message history: {}", e);
            reply_ephemeral(ctx, "❌ I don't have permission to read messages here.").await?;
            return Ok(());
        }
        Err(e) => {
            error!("Failed to collect messages: {}", e);
            reply_ephemeral(ctx, "❌ Something went wrong while collecting messages.").await?;
            return Ok(());
        }
    };

    if lines.is_empty() {
        info!("No messages in the selected range");
        reply_ephemeral(ctx, "⚠️ There are no messages in that time range.").await?;
        return Ok(());
    }

    let request = SummaryRequest::new(level.into(), start_time, end_time, lines.join("\n"))?;
    let Some(summary) = generate(ctx, &request).await? else {
        return Ok(());
    };

    let Some(delivered) = deliver_summary(ctx, &summary, SummaryStyle::Summary, kind).await?
    else {
        return Ok(());
    };

    let record = if should_persist(kind)
        && let Some(guild_id) = ctx.guild_id()
    {
        Some(NewSummary::new(
            guild_id.to_string(),
            ctx.channel_id().to_string(),
            ctx.author().id.to_string(),
            start_time,
            end_time,
            summary,
        )?)
    } else {
        info!("Not saving summary from a non-text channel");
        None
    };
    finish_delivery(ctx, delivered, record).await
}

/// Find the summaries you created on a given day
#[poise::command(slash_command)]
pub async fn search(
    ctx: Context<'_>,
    #[description = "Date to search, e.g. 2024-12-17"] date: String,
) -> Result<(), Error> {
    info!("/search invoked: user={} date={}", ctx.author().name, date);
    ctx.defer_ephemeral().await?;

    let day = match parse_search_date(&date) {
        Ok(day) => day,
        Err(e) => {
            warn!("Rejected search date: {}", e);
            reply_ephemeral(ctx, format!("❌ {e}")).await?;
            return Ok(());
        }
    };

    let records = match ctx
        .data()
        .store
        .find_created_on(&ctx.author().id.to_string(), day)
        .await
    {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to search summaries: {}", e);
            reply_ephemeral(ctx, "❌ Something went wrong while searching the database.").await?;
            return Ok(());
        }
    };
    info!("Found {} summaries", records.len());

    if records.is_empty() {
        reply_ephemeral(ctx, "⚠️ You didn't create any summaries on that day.").await?;
        return Ok(());
    }

    ctx.send(
        poise::CreateReply::default()
            .embed(search_results_embed(&date, &records))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Summarize one of your saved summaries again
#[poise::command(slash_command)]
pub async fn resummarize(
    ctx: Context<'_>,
    #[description = "ID of the summary to summarize again"] summary_id: String,
) -> Result<(), Error> {
    info!(
        "/resummarize invoked: user={} summary_id={}",
        ctx.author().name,
        summary_id
    );
    ctx.defer_ephemeral().await?;

    let id = match parse_summary_id(&summary_id) {
        Ok(id) => id,
        Err(e) => {
            warn!("Rejected summary id: {}", e);
            reply_ephemeral(ctx, format!("❌ {e}")).await?;
            return Ok(());
        }
    };

    let user_id = ctx.author().id.to_string();
    let original = match ctx.data().store.find_for_user(id, &user_id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            warn!("Summary {} not found or not owned by {}", id, user_id);
            reply_ephemeral(ctx, "❌ That summary doesn't exist or isn't yours.").await?;
            return Ok(());
        }
        Err(e) => {
            error!("Failed to load summary {}: {}", id, e);
            reply_ephemeral(ctx, "❌ Something went wrong while reading the database.").await?;
            return Ok(());
        }
    };

    let request = SummaryRequest::new(
        SummaryLevel::Simple,
        original.start_time,
        original.end_time,
        original.summary.clone(),
    )?;
    let Some(summary) = generate(ctx, &request).await? else {
        return Ok(());
    };

    let kind = channel_kind(ctx).await;
    let Some(delivered) = deliver_summary(ctx, &summary, SummaryStyle::Resummary, kind).await?
    else {
        return Ok(());
    };

    let record = if should_persist(kind) {
        Some(NewSummary::new(
            original.guild_id,
            original.channel_id,
            user_id,
            original.start_time,
            original.end_time,
            summary,
        )?)
    } else {
        info!("Not saving re-summary from a non-text channel");
        None
    };
    finish_delivery(ctx, delivered, record).await
}

/// Show how to use the bot
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    info!("/help invoked: user={}", ctx.author().name);
    ctx.send(
        poise::CreateReply::default()
            .embed(help_embed())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Runs the pipeline and reports failures to the user. `None` means the user
/// has already been told what went wrong.
async fn generate(ctx: Context<'_>, request: &SummaryRequest) -> Result<Option<String>, Error> {
    match ctx.data().pipeline.run(request).await {
        Ok(summary) => Ok(Some(summary)),
        Err(SummaryError::EmptyResult) => {
            warn!("Summary was empty (corr_id={})", request.correlation_id);
            reply_ephemeral(ctx, "⚠️ The summary came back empty.").await?;
            Ok(None)
        }
        Err(e) => {
            if let SummaryError::Summarization(inner) = &e {
                error!(
                    "Failed to generate summary: {} status={:?} body={:?} (corr_id={})",
                    inner, inner.status, inner.body, request.correlation_id
                );
            } else {
                error!(
                    "Failed to generate summary: {} (corr_id={})",
                    e, request.correlation_id
                );
            }
            reply_ephemeral(ctx, format!("❌ {CANONICAL_FAILURE_MESSAGE}")).await?;
            Ok(None)
        }
    }
}

/// Saves right after the first message went out, reports the outcome, then
/// hands the reply over to the page buttons. A failed save is reported but the
/// delivery is not rolled back.
async fn finish_delivery(
    ctx: Context<'_>,
    delivered: Delivered<'_>,
    record: Option<NewSummary>,
) -> Result<(), Error> {
    save_then(&*ctx.data().store, record.as_ref(), |saved| async move {
        match saved {
            Some(Ok(saved)) => {
                reply_ephemeral(
                    ctx,
                    format!(
                        "💾 Saved as summary #{}. Use `/resummarize {}` to revisit it.",
                        saved.id, saved.id
                    ),
                )
                .await?;
            }
            Some(Err(_)) => {
                reply_ephemeral(
                    ctx,
                    "⚠️ Your summary was delivered, but it could not be saved.",
                )
                .await?;
            }
            None => {}
        }
        delivered.finish(ctx).await;
        Ok::<(), Error>(())
    })
    .await
}

async fn channel_kind(ctx: Context<'_>) -> ChannelKind {
    match ctx.channel_id().to_channel(ctx.serenity_context()).await {
        Ok(serenity::Channel::Guild(channel)) if channel.kind == serenity::ChannelType::Text => {
            ChannelKind::GuildText
        }
        Ok(serenity::Channel::Private(_)) => ChannelKind::Direct,
        Ok(_) => ChannelKind::Other,
        Err(e) => {
            warn!("Failed to look up channel {}: {}", ctx.channel_id(), e);
            ChannelKind::Other
        }
    }
}
