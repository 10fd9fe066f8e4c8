use crate::types::{DeskError, FetchConfig, Result};
use crate::x_client::XCredentials;
use std::path::PathBuf;

pub const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_LLM_MODEL: &str = "deepseek/deepseek-chat";
pub const DEFAULT_SCAN_INTERVAL_HOURS: u32 = 8;
pub const DEFAULT_DB_PATH: &str = "news_history.db";
pub const DEFAULT_DRAFT_PATH: &str = "latest_tweet.md";
pub const DEFAULT_ARCHIVE_PATH: &str = "tweet_archive.md";

pub const DEFAULT_FEEDS: &[&str] = &[
    "https://www.cnbc.com/id/100003114/device/rss/rss.html",
    "https://www.coindesk.com/arc/outboundfeeds/rss/",
    "https://www.theblock.co/rss.xml",
    "https://cointelegraph.com/rss",
    "https://blockworks.co/feed",
    "http://feeds.feedburner.com/bankless",
    "https://decrypt.co/feed",
];

#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Everything a run needs, read once at startup.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub llm: LlmConfig,
    pub x: XCredentials,
    pub scan_interval_hours: u32,
    pub feeds: Vec<String>,
    pub db_path: PathBuf,
    pub draft_path: PathBuf,
    pub archive_path: PathBuf,
    pub fetch: FetchConfig,
}

impl DeskConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |name: &'static str| get(name).ok_or(DeskError::MissingCredential { name });

        let llm = LlmConfig {
            api_key: required("OPENROUTER_API_KEY")?,
            base_url: get("OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
        };

        let x = XCredentials {
            api_key: required("TWITTER_API_KEY")?,
            api_secret: required("TWITTER_API_SECRET")?,
            access_token: required("TWITTER_ACCESS_TOKEN")?,
            access_token_secret: required("TWITTER_ACCESS_TOKEN_SECRET")?,
        };

        let scan_interval_hours = match get("SCAN_INTERVAL_HOURS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|h| *h > 0)
                .ok_or(DeskError::InvalidConfig { name: "SCAN_INTERVAL_HOURS", value: raw })?,
            None => DEFAULT_SCAN_INTERVAL_HOURS,
        };

        let feeds = match get("RSS_FEEDS") {
            Some(raw) => parse_feed_list(&raw),
            None => DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect(),
        };
        if feeds.is_empty() {
            return Err(DeskError::InvalidConfig {
                name: "RSS_FEEDS",
                value: get("RSS_FEEDS").unwrap_or_default(),
            });
        }

        Ok(Self {
            llm,
            x,
            scan_interval_hours,
            feeds,
            db_path: get("NEWS_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()).into(),
            draft_path: get("DRAFT_PATH").unwrap_or_else(|| DEFAULT_DRAFT_PATH.to_string()).into(),
            archive_path: get("ARCHIVE_PATH").unwrap_or_else(|| DEFAULT_ARCHIVE_PATH.to_string()).into(),
            fetch: FetchConfig::default(),
        })
    }
}

fn parse_feed_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
