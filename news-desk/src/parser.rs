use crate::types::{DeskError, FeedItem, FeedSnapshot, Result};
use feed_rs::parser;
use tracing::debug;

/// Turns RSS / Atom / JSON Feed documents into a [`FeedSnapshot`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FeedParser;

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_feed(&self, content: &str) -> Result<FeedSnapshot> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| DeskError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries: Vec<FeedItem> = feed.entries.into_iter().map(Self::parse_entry).collect();

        debug!("Parsed feed with {} entries", entries.len());

        Ok(FeedSnapshot { title, entries })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> FeedItem {
        let link = entry.links.first().map(|l| l.href.clone());

        // Prefer the summary, fall back to the content body
        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body));

        FeedItem {
            title: entry.title.map(|t| t.content),
            link,
            published: entry.published,
            updated: entry.updated,
            summary,
        }
    }
}
