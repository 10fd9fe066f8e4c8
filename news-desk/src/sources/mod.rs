pub mod rss_feed;

pub use rss_feed::RssFeedSource;

use crate::types::{FetchConfig, PullFeed, Result};
use crate::Fetcher;
use std::sync::Arc;

/// Builds one [`RssFeedSource`] per configured URL, all sharing a single fetcher.
pub fn rss_sources(urls: &[String], fetch_config: FetchConfig) -> Result<Vec<Box<dyn PullFeed>>> {
    let fetcher = Arc::new(Fetcher::new(fetch_config)?);
    Ok(urls
        .iter()
        .map(|url| Box::new(RssFeedSource::new(url.clone(), fetcher.clone())) as Box<dyn PullFeed>)
        .collect())
}
