use serde::Deserialize;

pub const DEFAULT_MEALDB_URL: &str = "https://www.themealdb.com/api/json/v1/1/random.php";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub database_url: String,

    /// Endpoint returning one random meal record
    pub mealdb_url: String,
    pub fetch_timeout_secs: u64,

    /// Send ingredients and a photo with each random meal
    pub rich_replies: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            telegram_bot_token: std::env::var("TELEGRAM_BOT_TOKEN")?,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://meals.db".to_string()),
            mealdb_url: std::env::var("MEALDB_URL")
                .unwrap_or_else(|_| DEFAULT_MEALDB_URL.to_string()),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "2".to_string())
                .parse()?,
            rich_replies: parse_flag(
                &std::env::var("RICH_REPLIES").unwrap_or_else(|_| "true".to_string()),
            )?,
        })
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean value: {other:?}"),
    }
}
