//! All Discord-specific functionality

pub mod bot;
pub mod collect;
pub mod commands;
pub mod delivery;
pub mod message_formatter;

use std::sync::Arc;

use poise::serenity_prelude as serenity;

use crate::ai::GeminiClient;
use crate::storage::SummaryStore;
use crate::worker::SummaryPipeline;

pub use bot::run;

/// Shared state handed to every command.
pub struct Data {
    pub pipeline: SummaryPipeline<GeminiClient>,
    pub store: Arc<dyn SummaryStore>,
}

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// True if Discord rejected the request for lack of permissions.
#[must_use]
pub fn is_forbidden(error: &serenity::Error) -> bool {
    matches!(
        error,
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 403
    )
}

/// # Errors
///
/// Returns an error if Discord rejects the reply.
pub async fn reply_ephemeral(ctx: Context<'_>, text: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(text)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
