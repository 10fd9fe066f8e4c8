use crate::types::{PostedRecord, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, Row};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SCHEMA: &[&str] = &[r#"
    CREATE TABLE IF NOT EXISTS posted_news (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        news_hash TEXT UNIQUE NOT NULL,
        title TEXT,
        source TEXT,
        posted_at TIMESTAMP NOT NULL,
        tweet_text TEXT
    )
    "#];

/// Stable identity of a story: hex SHA-256 of `"{title}|{source}"`, both
/// trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(title: &str, source: &str) -> Self {
        let digest = Sha256::digest(format!("{}|{}", title.trim(), source.trim()).as_bytes());
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger of stories that have already been published.
///
/// Every call opens its own connection and closes it before returning; no
/// connection outlives an operation.
#[derive(Debug, Clone)]
pub struct NewsStore {
    path: PathBuf,
}

impl NewsStore {
    /// Opens (creating if needed) the ledger at `path` and ensures the table exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        let mut conn = store.connect().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut conn).await?;
        }
        conn.close().await?;
        info!("News ledger ready at {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true);
        Ok(SqliteConnection::connect_with(&options).await?)
    }

    pub async fn is_posted(&self, title: &str, source: &str) -> Result<bool> {
        let fingerprint = Fingerprint::of(title, source);
        let mut conn = self.connect().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posted_news WHERE news_hash = ?")
            .bind(fingerprint.as_str())
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(count > 0)
    }

    /// Records a published story. Returns `false` when it was already recorded.
    pub async fn mark_posted(&self, title: &str, source: &str, tweet_text: &str) -> Result<bool> {
        let fingerprint = Fingerprint::of(title, source);
        let mut conn = self.connect().await?;
        // fixed-width timestamps keep text ordering chronological
        let result = sqlx::query(
            "INSERT INTO posted_news (news_hash, title, source, posted_at, tweet_text) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(news_hash) DO NOTHING",
        )
        .bind(fingerprint.as_str())
        .bind(title)
        .bind(source)
        .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
        .bind(tweet_text)
        .execute(&mut conn)
        .await?;
        conn.close().await?;

        let inserted = result.rows_affected() == 1;
        if inserted {
            info!("Recorded as posted: {}", title);
        } else {
            debug!("Already recorded: {} ({})", title, fingerprint);
        }
        Ok(inserted)
    }

    /// Newest first.
    pub async fn recent_posts(&self, limit: usize) -> Result<Vec<PostedRecord>> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query(
            "SELECT news_hash, title, source, posted_at, tweet_text FROM posted_news \
             ORDER BY posted_at DESC, id DESC LIMIT ?",
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        rows.into_iter()
            .map(|row| -> Result<PostedRecord> {
                Ok(PostedRecord {
                    fingerprint: row.try_get("news_hash")?,
                    title: row.try_get::<Option<String>, _>("title")?.unwrap_or_default(),
                    source: row.try_get::<Option<String>, _>("source")?.unwrap_or_default(),
                    posted_at: row.try_get::<DateTime<Utc>, _>("posted_at")?,
                    tweet_text: row.try_get::<Option<String>, _>("tweet_text")?.unwrap_or_default(),
                })
            })
            .collect()
    }

    pub async fn posted_count(&self) -> Result<i64> {
        let mut conn = self.connect().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posted_news")
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(count)
    }
}
