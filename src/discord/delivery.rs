//! Sends a finished summary to the user the way `worker::deliver` planned it.

use std::time::Duration;

use chrono::Utc;
use poise::serenity_prelude as serenity;
use tracing::{error, info};

use super::message_formatter::{
    SummaryStyle, close_thread_row, pager_row, summary_embed, turn_page,
};
use super::{Context, Error, is_forbidden, reply_ephemeral};
use crate::worker::deliver::{ChannelKind, Delivery, plan_delivery, summary_pages, thread_name};

/// Paginated replies stop reacting to buttons after this long.
pub const PAGINATION_TIMEOUT: Duration = Duration::from_secs(300);

/// What the user has been sent so far.
pub enum Delivered<'a> {
    /// Nothing left to do.
    Sent,
    /// The first page is out; the buttons still need driving.
    Paging(Pager<'a>),
}

impl Delivered<'_> {
    /// Drives the page buttons until they time out. Returns at once for
    /// anything that was not paginated.
    pub async fn finish(self, ctx: Context<'_>) {
        if let Delivered::Paging(pager) = self
            && let Err(e) = pager.run(ctx).await
        {
            error!("Summary pagination stopped with an error: {}", e);
        }
    }
}

/// Delivers `summary`. Returns `None` when delivery failed and the user has
/// already been told why.
///
/// A paginated summary is sent but its buttons are not handled yet; call
/// [`Delivered::finish`] once any follow-up work (like saving) is done.
///
/// # Errors
///
/// Returns an error if sending a reply to the invoking interaction fails.
pub async fn deliver_summary<'a>(
    ctx: Context<'a>,
    summary: &str,
    style: SummaryStyle,
    kind: ChannelKind,
) -> Result<Option<Delivered<'a>>, Error> {
    let author = ctx.author();
    let pages = summary_pages(summary);
    let page_count = pages.len();
    let embeds: Vec<serenity::CreateEmbed> = pages
        .iter()
        .enumerate()
        .map(|(idx, page)| {
            summary_embed(
                style,
                page,
                idx + 1,
                page_count,
                author.display_name(),
                author.avatar_url(),
            )
        })
        .collect();

    if embeds.is_empty() {
        reply_ephemeral(ctx, "⚠️ The summary is empty.").await?;
        return Ok(None);
    }

    match plan_delivery(page_count, kind) {
        Delivery::Paginated => Ok(Some(Delivered::Paging(Pager::send(ctx, embeds).await?))),
        Delivery::PrivateThread => {
            let sent = send_to_private_thread(ctx, style, embeds[0].clone()).await?;
            Ok(sent.then_some(Delivered::Sent))
        }
        Delivery::Direct => {
            ctx.send(
                poise::CreateReply::default()
                    .embed(embeds[0].clone())
                    .ephemeral(true),
            )
            .await?;
            info!("Sent summary embed directly");
            Ok(Some(Delivered::Sent))
        }
    }
}

/// An ephemeral reply showing one page at a time.
pub struct Pager<'a> {
    handle: poise::ReplyHandle<'a>,
    pages: Vec<serenity::CreateEmbed>,
    ctx_id: u64,
    prev_id: String,
    next_id: String,
    current: usize,
}

impl<'a> Pager<'a> {
    async fn send(ctx: Context<'a>, pages: Vec<serenity::CreateEmbed>) -> Result<Self, Error> {
        let ctx_id = ctx.id();
        let prev_id = format!("{ctx_id}prev");
        let next_id = format!("{ctx_id}next");

        let handle = ctx
            .send(
                poise::CreateReply::default()
                    .embed(pages[0].clone())
                    .components(vec![pager_row(&prev_id, &next_id, 0, pages.len(), false)])
                    .ephemeral(true),
            )
            .await?;
        info!("Sent paginated summary with {} pages", pages.len());

        Ok(Self {
            handle,
            pages,
            ctx_id,
            prev_id,
            next_id,
            current: 0,
        })
    }

    fn row(&self, finished: bool) -> serenity::CreateActionRow {
        pager_row(
            &self.prev_id,
            &self.next_id,
            self.current,
            self.pages.len(),
            finished,
        )
    }

    async fn run(mut self, ctx: Context<'_>) -> Result<(), Error> {
        let prefix = self.ctx_id.to_string();
        while let Some(press) = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .filter({
                let prefix = prefix.clone();
                move |press| press.data.custom_id.starts_with(&prefix)
            })
            .timeout(PAGINATION_TIMEOUT)
            .await
        {
            if press.data.custom_id == self.next_id {
                self.current = turn_page(self.current, self.pages.len(), true);
            } else if press.data.custom_id == self.prev_id {
                self.current = turn_page(self.current, self.pages.len(), false);
            } else {
                continue;
            }

            press
                .create_response(
                    ctx.serenity_context(),
                    serenity::CreateInteractionResponse::UpdateMessage(
                        serenity::CreateInteractionResponseMessage::new()
                            .embed(self.pages[self.current].clone())
                            .components(vec![self.row(false)]),
                    ),
                )
                .await?;
        }

        self.handle
            .edit(
                ctx,
                poise::CreateReply::default()
                    .embed(self.pages[self.current].clone())
                    .components(vec![self.row(true)]),
            )
            .await?;
        Ok(())
    }
}

async fn send_to_private_thread(
    ctx: Context<'_>,
    style: SummaryStyle,
    embed: serenity::CreateEmbed,
) -> Result<bool, Error> {
    let author = ctx.author();
    let builder = serenity::CreateThread::new(thread_name(
        style.thread_prefix(),
        author.display_name(),
        Utc::now(),
    ))
    .kind(serenity::ChannelType::PrivateThread)
    .invitable(false)
    .audit_log_reason(style.audit_reason());

    let thread = match ctx
        .channel_id()
        .create_thread(ctx.serenity_context(), builder)
        .await
    {
        Ok(thread) => thread,
        Err(e) if is_forbidden(&e) => {
            error!("Missing permission to create a private thread: {}", e);
            reply_ephemeral(ctx, "❌ I don't have permission to create private threads here.")
                .await?;
            return Ok(false);
        }
        Err(e) => {
            error!("Failed to create private thread: {}", e);
            reply_ephemeral(ctx, "❌ Something went wrong while creating the private thread.")
                .await?;
            return Ok(false);
        }
    };

    let posted = async {
        thread
            .id
            .add_thread_member(ctx.serenity_context(), author.id)
            .await?;
        thread
            .id
            .send_message(
                ctx.serenity_context(),
                serenity::CreateMessage::new()
                    .embed(embed)
                    .components(vec![close_thread_row(author.id, false)]),
            )
            .await
    }
    .await;

    if let Err(e) = posted {
        error!("Failed to post summary in thread '{}': {}", thread.name, e);
        reply_ephemeral(ctx, "❌ Something went wrong while posting in the private thread.")
            .await?;
        return Ok(false);
    }

    info!("Sent summary to private thread '{}'", thread.name);
    reply_ephemeral(
        ctx,
        format!("✅ Your summary is waiting in a private thread: <#{}>", thread.id),
    )
    .await?;
    Ok(true)
}
