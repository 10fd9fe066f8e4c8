use crate::types::{FeedSnapshot, PullFeed};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Generic RSS / Atom feed source
pub struct RssFeedSource {
    pub url: String,
    fetcher: Arc<Fetcher>,
    parser: FeedParser,
}

impl RssFeedSource {
    pub fn new(url: String, fetcher: Arc<Fetcher>) -> Self {
        Self {
            url,
            fetcher,
            parser: FeedParser::new(),
        }
    }
}

#[async_trait]
impl PullFeed for RssFeedSource {
    fn feed_url(&self) -> &str {
        &self.url
    }

    async fn pull(&self) -> anyhow::Result<FeedSnapshot> {
        let content = self.fetcher.fetch_feed(&self.url).await?;
        let snapshot = self.parser.parse_feed(&content)?;
        debug!(
            "Pulled {} entries from {} ({})",
            snapshot.entries.len(),
            self.url,
            snapshot.title.as_deref().unwrap_or("untitled")
        );
        Ok(snapshot)
    }
}
