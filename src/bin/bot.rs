// Entry point for the Discord bot process

use recap::core::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();
    recap::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        anyhow::anyhow!(e)
    })?;

    if let Err(e) = recap::discord::run(config).await {
        error!("Bot stopped with an error: {:?}", e);
        return Err(e);
    }
    Ok(())
}
