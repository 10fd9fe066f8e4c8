use crate::llm_adapter::clean_llm_response;
use crate::prompts::{curation_user_prompt, date_anchor, CURATION_PROMPT};
use crate::types::{CompletionRequest, Headline, LlmAdapter};
use chrono::Local;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const CURATION_MAX_TOKENS: u32 = 100;

/// Picks the most important headlines with the ranking model.
pub struct Curator {
    llm: Arc<dyn LlmAdapter>,
}

impl Curator {
    pub fn new(llm: Arc<dyn LlmAdapter>) -> Self {
        Self { llm }
    }

    /// Never fails: a model error or an unusable answer falls back to
    /// [`fallback_selection`].
    pub async fn select_top(&self, headlines: &[Headline], top_k: usize, topic: Option<&str>) -> Vec<usize> {
        if headlines.is_empty() {
            warn!("No headlines to curate");
            return Vec::new();
        }

        let candidates = apply_topic_filter(headlines, topic);
        let request = CompletionRequest {
            system: format!("{}{}", date_anchor(Local::now().date_naive()), CURATION_PROMPT),
            user: curation_user_prompt(&format_headlines(&candidates), candidates.len(), top_k),
            max_tokens: CURATION_MAX_TOKENS,
        };

        info!("Curating {} headlines with {}", candidates.len(), self.llm.adapter_name());

        let raw = match self.llm.complete(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Ranking request failed, keeping input order: {:#}", e);
                return fallback_selection(&candidates, top_k);
            }
        };

        let answer = clean_llm_response(&raw);
        let valid: HashSet<usize> = candidates.iter().map(|h| h.id).collect();
        let selected = parse_ranked_ids(&answer, &valid, top_k);

        if selected.is_empty() && top_k > 0 {
            warn!("No usable ids in ranking answer {:?}, keeping input order", answer);
            return fallback_selection(&candidates, top_k);
        }

        info!("Selected {} headlines: {:?}", selected.len(), selected);
        selected
    }
}

/// Case-insensitive substring match on titles. A topic that matches nothing
/// leaves the input untouched.
pub fn apply_topic_filter(headlines: &[Headline], topic: Option<&str>) -> Vec<Headline> {
    let Some(topic) = topic.map(str::trim).filter(|t| !t.is_empty()) else {
        return headlines.to_vec();
    };

    let needle = topic.to_lowercase();
    let matched: Vec<Headline> = headlines
        .iter()
        .filter(|h| h.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if matched.is_empty() {
        warn!("Topic '{}' matched no headlines, using all {}", topic, headlines.len());
        headlines.to_vec()
    } else {
        info!("Topic '{}' matched {} headlines", topic, matched.len());
        matched
    }
}

/// Parses a comma-separated id list. Tokens that are not integers, repeats and
/// ids outside `valid` are dropped; at most `top_k` ids are kept, in order of
/// first appearance.
pub fn parse_ranked_ids(answer: &str, valid: &HashSet<usize>, top_k: usize) -> Vec<usize> {
    let mut seen = HashSet::new();
    answer
        .split(',')
        .map(|token| token.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter_map(|token| token.parse::<usize>().ok())
        .filter(|id| seen.insert(*id))
        .filter(|id| valid.contains(id))
        .take(top_k)
        .collect()
}

/// First `top_k` ids in input order.
pub fn fallback_selection(headlines: &[Headline], top_k: usize) -> Vec<usize> {
    headlines.iter().take(top_k).map(|h| h.id).collect()
}

fn format_headlines(headlines: &[Headline]) -> String {
    headlines
        .iter()
        .map(|h| format!("[{}] {} (Source: {})", h.id, h.title, h.source))
        .collect::<Vec<_>>()
        .join("\n")
}
