use crate::rss_utils::{feed::extract_text_from_html, text::truncate_chars};
use crate::types::{Article, FeedItem, Headline, PullFeed};
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

pub const DEFAULT_HEADLINE_LIMIT: usize = 50;
pub const SUMMARY_MAX_CHARS: usize = 500;
pub const UNTITLED: &str = "No title";

/// Timestamp used for windowing and ordering: `published`, else `updated`,
/// else the time of the fetch.
///
/// Undated entries therefore always look fresh and always pass the window.
pub fn entry_timestamp(item: &FeedItem, now: DateTime<Utc>) -> DateTime<Utc> {
    item.published.or(item.updated).unwrap_or(now)
}

#[derive(Debug, Default)]
struct ArticleArena {
    generation: u64,
    articles: Vec<Article>,
}

/// Pulls every configured feed and keeps the most recent fetch as an
/// id-addressed arena. Ids are dense `0..n` and only meaningful against the
/// fetch that produced them.
pub struct HeadlineSource {
    feeds: Vec<Box<dyn PullFeed>>,
    arena: ArticleArena,
}

impl HeadlineSource {
    pub fn new(feeds: Vec<Box<dyn PullFeed>>) -> Self {
        Self {
            feeds,
            arena: ArticleArena::default(),
        }
    }

    pub fn feed_count(&self) -> usize {
        self.feeds.len()
    }

    /// Incremented on every fetch.
    pub fn generation(&self) -> u64 {
        self.arena.generation
    }

    pub async fn fetch_recent(&mut self, window_hours: u32, limit: usize) -> Vec<Article> {
        let now = Utc::now();
        // windows reaching past the representable range keep everything
        let cutoff = now
            .checked_sub_signed(Duration::hours(i64::from(window_hours)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut collected = Vec::new();

        for feed in &self.feeds {
            info!("Fetching {}", feed.feed_url());

            let snapshot = match feed.pull().await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("Skipping feed {}: {:#}", feed.feed_url(), e);
                    continue;
                }
            };

            let source = snapshot
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| feed.feed_url().to_string());

            for item in snapshot.entries {
                let published = entry_timestamp(&item, now);
                if published <= cutoff {
                    continue;
                }
                collected.push(Article {
                    id: 0,
                    title: item
                        .title
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| UNTITLED.to_string()),
                    link: item.link.unwrap_or_default(),
                    source: source.clone(),
                    published,
                    summary: bounded_summary(item.summary.as_deref()),
                });
            }
        }

        // stable: ties keep feed order
        collected.sort_by(|a, b| b.published.cmp(&a.published));
        collected.truncate(limit);
        for (id, article) in collected.iter_mut().enumerate() {
            article.id = id;
        }

        self.arena = ArticleArena {
            generation: self.arena.generation + 1,
            articles: collected.clone(),
        };

        info!(
            "Fetched {} articles from the last {}h (generation {})",
            collected.len(),
            window_hours,
            self.arena.generation
        );
        collected
    }

    /// Fetches and returns the compact form handed to curation.
    pub async fn headlines(&mut self, window_hours: u32, limit: usize) -> Vec<Headline> {
        self.fetch_recent(window_hours, limit)
            .await
            .iter()
            .map(Headline::from)
            .collect()
    }

    /// Resolves ids against the latest fetch, in the order given. Unknown ids
    /// are dropped.
    pub fn articles_by_ids(&self, ids: &[usize]) -> Vec<Article> {
        ids.iter()
            .filter_map(|id| {
                let found = self.arena.articles.get(*id);
                if found.is_none() {
                    warn!(
                        "No article with id {} in generation {}, skipping",
                        id, self.arena.generation
                    );
                }
                found.cloned()
            })
            .collect()
    }
}

fn bounded_summary(raw: Option<&str>) -> String {
    raw.map(|s| truncate_chars(&extract_text_from_html(s), SUMMARY_MAX_CHARS))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(published: Option<DateTime<Utc>>, updated: Option<DateTime<Utc>>) -> FeedItem {
        FeedItem {
            title: Some("t".into()),
            link: None,
            published,
            updated,
            summary: None,
        }
    }

    #[test]
    fn timestamp_prefers_published_then_updated_then_now() {
        let now = Utc::now();
        let published = now - Duration::hours(3);
        let updated = now - Duration::hours(1);

        assert_eq!(entry_timestamp(&item(Some(published), Some(updated)), now), published);
        assert_eq!(entry_timestamp(&item(None, Some(updated)), now), updated);
        assert_eq!(entry_timestamp(&item(None, None), now), now);
    }

    #[test]
    fn summaries_are_stripped_and_capped() {
        let long = format!("<p>{}</p>", "a".repeat(800));
        let summary = bounded_summary(Some(&long));
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS);
        assert!(!summary.contains('<'));
        assert_eq!(bounded_summary(None), "");
    }
}
