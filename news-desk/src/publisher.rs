use crate::types::PostingChannel;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

pub const DEFAULT_POST_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Preview instead of posting.
    pub dry_run: bool,
    /// Pause between consecutive posts of a thread.
    pub post_delay: Duration,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            dry_run: true,
            post_delay: DEFAULT_POST_DELAY,
        }
    }
}

/// Posts a sequence of texts as a reply chain.
pub struct Publisher {
    channel: Arc<dyn PostingChannel>,
    config: PublisherConfig,
}

impl Publisher {
    pub fn new(channel: Arc<dyn PostingChannel>, config: PublisherConfig) -> Self {
        Self { channel, config }
    }

    pub fn is_dry_run(&self) -> bool {
        self.config.dry_run
    }

    /// Only checks that credentials are configured.
    pub fn test_connection(&self) -> bool {
        if self.channel.has_credentials() {
            info!("{} credentials present", self.channel.channel_name());
            true
        } else {
            error!("{} credentials missing", self.channel.channel_name());
            false
        }
    }

    /// `true` only if every post went out (or, in dry-run, was previewed).
    pub async fn publish(&self, texts: &[String]) -> bool {
        if texts.is_empty() {
            warn!("Nothing to publish");
            return false;
        }

        if self.config.dry_run {
            self.preview(texts);
            return true;
        }

        let total = texts.len();
        let mut parent: Option<String> = None;
        let mut all_posted = true;

        for (index, text) in texts.iter().enumerate() {
            let position = index + 1;
            match self.channel.create_post(text, parent.as_deref()).await {
                Ok(id) => {
                    info!("Posted {}/{} to {} (id {})", position, total, self.channel.channel_name(), id);
                    parent = Some(id);
                }
                Err(e) => {
                    error!("Post {}/{} failed: {:#}", position, total, e);
                    println!("\n--- UNPUBLISHED POST {}/{} ---\n{}\n{}\n", position, total, text, "-".repeat(40));
                    all_posted = false;
                }
            }

            if position < total {
                info!("Waiting {}s before the next post", self.config.post_delay.as_secs());
                tokio::time::sleep(self.config.post_delay).await;
            }
        }

        all_posted
    }

    fn preview(&self, texts: &[String]) {
        let total = texts.len();
        let rule = "=".repeat(60);
        println!("\n{}\nDRY RUN: {} post(s) not sent\n{}", rule, total, rule);
        for (index, text) in texts.iter().enumerate() {
            println!("\n[{}/{}] ({} chars)\n{}\n{}", index + 1, total, text.chars().count(), "-".repeat(60), text);
        }
        println!("\n{}\n", rule);
        info!("Dry run: previewed {} post(s)", total);
    }
}
