use crate::analysis::Analyst;
use crate::curation::Curator;
use crate::drafts::DraftArchive;
use crate::headlines::{HeadlineSource, DEFAULT_HEADLINE_LIMIT};
use crate::publisher::Publisher;
use crate::store::NewsStore;
use crate::types::{Article, Result};
use tracing::{error, info, warn};

/// One story per cycle: a single deep dive, not a digest.
pub const CYCLE_TOP_K: usize = 1;
pub const TEST_WINDOW_HOURS: u32 = 24;

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub window_hours: u32,
    pub headline_limit: usize,
    pub topic: Option<String>,
    pub override_context: Option<String>,
}

impl RunSettings {
    pub fn new(window_hours: u32) -> Self {
        Self {
            window_hours,
            headline_limit: DEFAULT_HEADLINE_LIMIT,
            topic: None,
            override_context: None,
        }
    }
}

/// Where a cycle stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    NoHeadlines,
    NothingSelected,
    AlreadyPosted,
    NoDraft,
    PublishFailed,
    Published { articles: Vec<String> },
    Failed,
}

/// Runs fetch, curate, dedupe, analyze, save, publish and record in order.
pub struct NewsDesk {
    headlines: HeadlineSource,
    curator: Curator,
    analyst: Analyst,
    publisher: Publisher,
    store: NewsStore,
    drafts: DraftArchive,
    settings: RunSettings,
}

impl NewsDesk {
    pub fn new(
        headlines: HeadlineSource,
        curator: Curator,
        analyst: Analyst,
        publisher: Publisher,
        store: NewsStore,
        drafts: DraftArchive,
        settings: RunSettings,
    ) -> Self {
        Self {
            headlines,
            curator,
            analyst,
            publisher,
            store,
            drafts,
            settings,
        }
    }

    pub fn store(&self) -> &NewsStore {
        &self.store
    }

    pub fn drafts(&self) -> &DraftArchive {
        &self.drafts
    }

    /// Never returns an error: anything unexpected is logged and reported as
    /// [`CycleOutcome::Failed`].
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        info!(
            "Starting news cycle (window {}h, {})",
            self.settings.window_hours,
            if self.publisher.is_dry_run() { "dry run" } else { "live" }
        );

        match self.try_run_cycle().await {
            Ok(outcome) => {
                info!("Cycle finished: {:?}", outcome);
                outcome
            }
            Err(e) => {
                error!("Cycle failed: {:?}", e);
                CycleOutcome::Failed
            }
        }
    }

    async fn try_run_cycle(&mut self) -> Result<CycleOutcome> {
        let headlines = self
            .headlines
            .headlines(self.settings.window_hours, self.settings.headline_limit)
            .await;
        if headlines.is_empty() {
            warn!("No headlines in the last {}h", self.settings.window_hours);
            return Ok(CycleOutcome::NoHeadlines);
        }

        let ids = self
            .curator
            .select_top(&headlines, CYCLE_TOP_K, self.settings.topic.as_deref())
            .await;
        if ids.is_empty() {
            warn!("Curation selected nothing");
            return Ok(CycleOutcome::NothingSelected);
        }

        let selected = self.headlines.articles_by_ids(&ids);
        let fresh = self.drop_already_posted(selected).await?;
        if fresh.is_empty() {
            info!("Selected stories were already posted");
            return Ok(CycleOutcome::AlreadyPosted);
        }

        let texts = self
            .analyst
            .analyze(&fresh, self.settings.override_context.as_deref())
            .await;
        if texts.is_empty() {
            warn!("Analysis produced no draft");
            return Ok(CycleOutcome::NoDraft);
        }

        self.drafts.save(&texts).await?;

        if !self.publisher.publish(&texts).await {
            error!("Publishing failed, stories stay unrecorded");
            return Ok(CycleOutcome::PublishFailed);
        }

        let tweet_text = texts.join("\n");
        for article in &fresh {
            self.store.mark_posted(&article.title, &article.source, &tweet_text).await?;
        }

        Ok(CycleOutcome::Published {
            articles: fresh.into_iter().map(|a| a.title).collect(),
        })
    }

    async fn drop_already_posted(&self, articles: Vec<Article>) -> Result<Vec<Article>> {
        let mut fresh = Vec::with_capacity(articles.len());
        for article in articles {
            if self.store.is_posted(&article.title, &article.source).await? {
                info!("Skipping already posted: {}", article.title);
            } else {
                fresh.push(article);
            }
        }
        Ok(fresh)
    }

    /// Startup check. Only missing publishing credentials fail it; the feed
    /// probe is informational.
    pub async fn test_apis(&mut self) -> bool {
        info!("Testing connections");

        if !self.publisher.test_connection() {
            return false;
        }

        let articles = self
            .headlines
            .fetch_recent(TEST_WINDOW_HOURS, self.settings.headline_limit)
            .await;
        info!(
            "Feed check: {} articles in the last {}h across {} feeds",
            articles.len(),
            TEST_WINDOW_HOURS,
            self.headlines.feed_count()
        );
        true
    }

    /// Publishes the saved latest draft again, as a single post. `Ok(None)`
    /// when there is no draft.
    pub async fn retry_last_draft(&self) -> Result<Option<bool>> {
        let Some(draft) = self.drafts.read_latest().await? else {
            return Ok(None);
        };

        info!("Retrying saved draft ({} chars)", draft.chars().count());
        Ok(Some(self.publisher.publish(&[draft]).await))
    }
}
