use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news item collected during one fetch.
///
/// `id` is assigned densely per fetch and means nothing outside the fetch
/// that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: usize,
    pub title: String,
    pub link: String,
    pub source: String,
    pub published: DateTime<Utc>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub id: usize,
    pub title: String,
    pub source: String,
}

impl From<&Article> for Headline {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            source: article.source.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedRecord {
    pub fingerprint: String,
    pub title: String,
    pub source: String,
    pub posted_at: DateTime<Utc>,
    pub tweet_text: String,
}

/// One entry as exposed by a syndication feed, before any policy is applied.
#[derive(Debug, Clone, Default)]
pub struct FeedItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    /// Channel title, used as the source label of every entry.
    pub title: Option<String>,
    pub entries: Vec<FeedItem>,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

// Object style note:
// Implementations of these traits wrap a single external service each.
// They are treated as untrusted: callers validate what comes back and turn
// failures into empty results instead of aborting a run.

#[async_trait]
pub trait PullFeed: Send + Sync {
    fn feed_url(&self) -> &str;

    async fn pull(&self) -> Result<FeedSnapshot>;
}

#[async_trait]
pub trait LlmAdapter: Send + Sync {
    fn adapter_name(&self) -> String;

    /// Returns the free text produced for `request`.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

#[async_trait]
pub trait PostingChannel: Send + Sync {
    fn channel_name(&self) -> String;

    /// Creates a post, optionally as a reply, and returns the new post id.
    async fn create_post(&self, text: &str, in_reply_to: Option<&str>) -> Result<String>;

    /// Whether the credentials needed to post are present. Says nothing about
    /// whether the remote side will accept them.
    fn has_credentials(&self) -> bool;
}
