use crate::llm_adapter::clean_llm_response;
use crate::prompts::{analysis_user_prompt, date_anchor, ANALYST_PROMPT};
use crate::rss_utils::text::truncate_with_ellipsis;
use crate::types::{Article, CompletionRequest, LlmAdapter};
use chrono::Local;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const MAX_DRAFT_CHARS: usize = 4000;
pub const MIN_DRAFT_CHARS: usize = 50;
pub const ANALYSIS_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub max_chars: usize,
    pub min_chars: usize,
    pub max_tokens: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_chars: MAX_DRAFT_CHARS,
            min_chars: MIN_DRAFT_CHARS,
            max_tokens: ANALYSIS_MAX_TOKENS,
        }
    }
}

/// Writes the long-form desk note for the selected story.
pub struct Analyst {
    llm: Arc<dyn LlmAdapter>,
    config: AnalysisConfig,
}

impl Analyst {
    pub fn new(llm: Arc<dyn LlmAdapter>, config: AnalysisConfig) -> Self {
        Self { llm, config }
    }

    /// Returns at most one post body. Empty on model failure or a degenerate
    /// answer.
    pub async fn analyze(&self, articles: &[Article], override_context: Option<&str>) -> Vec<String> {
        let override_context = override_context.map(str::trim).filter(|c| !c.is_empty());
        if articles.is_empty() && override_context.is_none() {
            warn!("No articles to analyze");
            return Vec::new();
        }

        let request = CompletionRequest {
            system: format!("{}{}", date_anchor(Local::now().date_naive()), ANALYST_PROMPT),
            user: analysis_user_prompt(&build_brief(articles, override_context)),
            max_tokens: self.config.max_tokens,
        };

        info!("Requesting analysis of {} articles from {}", articles.len(), self.llm.adapter_name());

        match self.llm.complete(&request).await {
            Ok(raw) => {
                info!("Analysis received: {} characters", raw.chars().count());
                finalize_draft(&raw, &self.config).into_iter().collect()
            }
            Err(e) => {
                error!("Analysis request failed: {:#}", e);
                Vec::new()
            }
        }
    }
}

/// Numbered article list: title, source and summary when there is one.
pub fn format_articles(articles: &[Article]) -> String {
    let mut lines = Vec::new();
    for (i, article) in articles.iter().enumerate() {
        lines.push(format!("{}. **{}**", i + 1, article.title));
        lines.push(format!("   Source: {}", article.source));
        if !article.summary.is_empty() {
            lines.push(format!("   Summary: {}", article.summary));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

/// The story text handed to the model. An override is used verbatim when
/// there are no articles and is placed first, marked authoritative, when there
/// are.
pub fn build_brief(articles: &[Article], override_context: Option<&str>) -> String {
    match override_context {
        None => format_articles(articles),
        Some(context) if articles.is_empty() => context.to_string(),
        Some(context) => format!(
            "AUTHORITATIVE CONTEXT (anchor the analysis to this; it wins over the reports below where they disagree):\n\
             {context}\n\n\
             REPORTS:\n{}",
            format_articles(articles)
        ),
    }
}

/// Cleans a raw answer, drops it below `min_chars`, and caps it at
/// `max_chars` including the ellipsis.
pub fn finalize_draft(raw: &str, config: &AnalysisConfig) -> Option<String> {
    let cleaned = clean_llm_response(raw);
    let length = cleaned.chars().count();
    if length < config.min_chars {
        warn!("Discarding analysis of {} characters (minimum {})", length, config.min_chars);
        return None;
    }
    Some(truncate_with_ellipsis(&cleaned, config.max_chars))
}
