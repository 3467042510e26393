use std::env;

use url::Url;

pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_token: String,
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    /// When unset the bot keeps summaries in memory only.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub http_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let gemini_api_url =
            env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string());
        Url::parse(&gemini_api_url).map_err(|e| format!("GEMINI_API_URL: {}", e))?;

        Ok(Self {
            discord_token: env::var("DISCORD_TOKEN")
                .map_err(|e| format!("DISCORD_TOKEN: {}", e))?,
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|e| format!("GEMINI_API_KEY: {}", e))?,
            gemini_api_url,
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty()),
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
            http_timeout_secs: parse_or("SUMMARY_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| format!("{}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
