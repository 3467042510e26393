use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use super::message_formatter::{close_thread_row, parse_close_thread_id};
use super::{Data, Error, commands};
use crate::ai::GeminiClient;
use crate::core::config::AppConfig;
use crate::storage::{MemorySummaryStore, PgSummaryStore, SummaryStore};
use crate::worker::SummaryPipeline;

/// Builds the shared state and runs the bot until the gateway connection ends.
///
/// # Errors
///
/// Returns an error if the database, the HTTP client or the Discord client
/// cannot be initialized, or if the client stops with an error.
pub async fn run(config: AppConfig) -> Result<(), Error> {
    let store: Arc<dyn SummaryStore> = match &config.database_url {
        Some(url) => Arc::new(PgSummaryStore::connect(url, config.database_max_connections).await?),
        None => {
            warn!("DATABASE_URL is not set; summaries will only be kept in memory");
            Arc::new(MemorySummaryStore::new())
        }
    };

    let gemini = GeminiClient::new(
        &config.gemini_api_url,
        &config.gemini_api_key,
        Duration::from_secs(config.http_timeout_secs),
    )?;
    let data = Data {
        pipeline: SummaryPipeline::new(gemini),
        store,
    };

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {} (ID: {})", ready.user.name, ready.user.id);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} command(s)", framework.options().commands.len());
                ctx.set_activity(Some(serenity::ActivityData::watching(
                    "conversations to summarize",
                )));
                Ok(data)
            })
        })
        .build();

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;
    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command /{}: {:?}", ctx.command().name, error);
            let reply = poise::CreateReply::default()
                .content("❌ Something went wrong while running the command.")
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to report command error: {}", e);
            }
        }
        poise::FrameworkError::CooldownHit {
            remaining_cooldown,
            ctx,
            ..
        } => {
            warn!("Command /{} on cooldown", ctx.command().name);
            let reply = poise::CreateReply::default()
                .content(format!(
                    "⚠️ Slow down! Try again in {:.2} seconds.",
                    remaining_cooldown.as_secs_f32()
                ))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to report cooldown: {}", e);
            }
        }
        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
            warn!("Missing permissions for /{}", ctx.command().name);
            let reply = poise::CreateReply::default()
                .content("❌ You don't have permission to use this command.")
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to report missing permissions: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    _data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::InteractionCreate { interaction } = event
        && let Some(component) = interaction.as_message_component()
        && let Some(owner) = parse_close_thread_id(&component.data.custom_id)
    {
        close_thread(ctx, component, owner).await?;
    }
    Ok(())
}

/// Handles the close button posted with a private-thread summary: only the
/// requester may archive and lock the thread.
async fn close_thread(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    owner: u64,
) -> Result<(), Error> {
    if component.user.id.get() != owner {
        component
            .create_response(
                ctx,
                serenity::CreateInteractionResponse::Message(
                    serenity::CreateInteractionResponseMessage::new()
                        .content("❌ Only the person who requested this summary can close the thread.")
                        .ephemeral(true),
                ),
            )
            .await?;
        return Ok(());
    }

    component
        .create_response(
            ctx,
            serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new()
                    .components(vec![close_thread_row(component.user.id, true)]),
            ),
        )
        .await?;

    let thread_id = component.channel_id;
    let back_link = match thread_id.to_channel(ctx).await {
        Ok(serenity::Channel::Guild(thread)) => thread
            .parent_id
            .map(|parent| format!("\nHead back to the channel here: <#{parent}>"))
            .unwrap_or_default(),
        _ => String::new(),
    };
    thread_id
        .send_message(
            ctx,
            serenity::CreateMessage::new().content(format!("🔒 This thread is closed.{back_link}")),
        )
        .await?;
    thread_id
        .edit_thread(ctx, serenity::EditThread::new().archived(true).locked(true))
        .await?;

    info!("Closed summary thread {} for user {}", thread_id, owner);
    Ok(())
}
