// Shared fakes for the boundary traits plus small builders.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use news_desk::curation::CURATION_MAX_TOKENS;
use news_desk::types::{CompletionRequest, FeedItem, FeedSnapshot, LlmAdapter, PostingChannel, PullFeed};
use std::collections::HashSet;
use std::sync::{Mutex, Once};
use tokio::time::Instant;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

pub fn entry(title: &str, published: Option<DateTime<Utc>>) -> FeedItem {
    FeedItem {
        title: Some(title.to_string()),
        link: Some(format!("https://news.example.com/{}", title.to_lowercase().replace(' ', "-"))),
        published,
        updated: None,
        summary: Some(format!("<p>{} in detail.</p>", title)),
    }
}

pub fn hours_ago(hours: i64) -> Option<DateTime<Utc>> {
    Some(Utc::now() - Duration::hours(hours))
}

pub fn minutes_ago(minutes: i64) -> Option<DateTime<Utc>> {
    Some(Utc::now() - Duration::minutes(minutes))
}

/// Feed that always returns the same snapshot, or always fails.
pub struct StaticFeed {
    url: String,
    snapshot: Option<FeedSnapshot>,
}

impl StaticFeed {
    pub fn new(url: &str, title: Option<&str>, entries: Vec<FeedItem>) -> Self {
        Self {
            url: url.to_string(),
            snapshot: Some(FeedSnapshot {
                title: title.map(String::from),
                entries,
            }),
        }
    }

    pub fn broken(url: &str) -> Self {
        Self {
            url: url.to_string(),
            snapshot: None,
        }
    }

    pub fn boxed(self) -> Box<dyn PullFeed> {
        Box::new(self)
    }
}

#[async_trait]
impl PullFeed for StaticFeed {
    fn feed_url(&self) -> &str {
        &self.url
    }

    async fn pull(&self) -> anyhow::Result<FeedSnapshot> {
        self.snapshot
            .clone()
            .ok_or_else(|| anyhow::anyhow!("connection refused: {}", self.url))
    }
}

/// Answers ranking and analysis requests with fixed replies; `Err` replies
/// simulate a failing model. Every request is recorded.
pub struct ScriptedLlm {
    ranking: Result<String, String>,
    analysis: Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub fn new(ranking: Result<&str, &str>, analysis: Result<&str, &str>) -> Self {
        Self {
            ranking: ranking.map(String::from).map_err(String::from),
            analysis: analysis.map(String::from).map_err(String::from),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn ranking_calls(&self) -> usize {
        self.requests().iter().filter(|r| is_ranking(r)).count()
    }

    pub fn analysis_calls(&self) -> usize {
        self.requests().iter().filter(|r| !is_ranking(r)).count()
    }
}

fn is_ranking(request: &CompletionRequest) -> bool {
    request.max_tokens == CURATION_MAX_TOKENS
}

#[async_trait]
impl LlmAdapter for ScriptedLlm {
    fn adapter_name(&self) -> String {
        "scripted".to_string()
    }

    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = if is_ranking(request) { &self.ranking } else { &self.analysis };
        reply.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPost {
    pub text: String,
    pub in_reply_to: Option<String>,
    pub at: Instant,
}

/// Posting channel that assigns ids `post-1`, `post-2`, ... and can be told to
/// fail specific attempts (1-based).
pub struct RecordingChannel {
    fail_attempts: HashSet<usize>,
    attempts: Mutex<usize>,
    posts: Mutex<Vec<RecordedPost>>,
    credentials: bool,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self {
            fail_attempts: HashSet::new(),
            attempts: Mutex::new(0),
            posts: Mutex::new(Vec::new()),
            credentials: true,
        }
    }

    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            fail_attempts: attempts.iter().copied().collect(),
            ..Self::new()
        }
    }

    pub fn without_credentials() -> Self {
        Self {
            credentials: false,
            ..Self::new()
        }
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl PostingChannel for RecordingChannel {
    fn channel_name(&self) -> String {
        "recording".to_string()
    }

    async fn create_post(&self, text: &str, in_reply_to: Option<&str>) -> anyhow::Result<String> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if self.fail_attempts.contains(&attempt) {
            anyhow::bail!("rate limited on attempt {}", attempt);
        }

        let mut posts = self.posts.lock().unwrap();
        posts.push(RecordedPost {
            text: text.to_string(),
            in_reply_to: in_reply_to.map(String::from),
            at: Instant::now(),
        });
        Ok(format!("post-{}", posts.len()))
    }

    fn has_credentials(&self) -> bool {
        self.credentials
    }
}

pub const LONG_ANALYSIS: &str = "The Fed just blinked, and the market has not caught up yet.\n\n\
Our desk reads the statement as a shift in the reaction function rather than a one-off. Positioning is still light and liquidity is thin into the weekend.\n\n\
We see risk/reward skewed to the upside for duration-sensitive assets. $BTC #Macro";
