use crate::config::LlmConfig;
use crate::types::{CompletionRequest, DeskError, LlmAdapter, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// Removes `<think>...</think>` reasoning traces, collapses runs of blank
/// lines to one, and trims.
pub fn clean_llm_response(raw: &str) -> String {
    let without_reasoning = THINK_BLOCK.replace_all(raw, "");
    BLANK_RUNS
        .replace_all(&without_reasoning, "\n\n")
        .trim()
        .to_string()
}

/// OpenAI-compatible chat completions client (OpenRouter by default).
pub struct OpenRouterAdapter {
    client: Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenRouterAdapter {
    pub fn new(client: Client, config: LlmConfig) -> Self {
        Self { client, config }
    }

    async fn chat(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.config.model,
            max_tokens: request.max_tokens,
            messages: [
                ChatMessage { role: "system", content: &request.system },
                ChatMessage { role: "user", content: &request.user },
            ],
        };

        debug!("POST {} (model {}, max_tokens {})", url, self.config.model, request.max_tokens);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(DeskError::Llm(format!("{} returned {}: {}", self.config.model, status, text)));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl LlmAdapter for OpenRouterAdapter {
    fn adapter_name(&self) -> String {
        format!("OpenRouter ({})", self.config.model)
    }

    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        Ok(self.chat(request).await?)
    }
}
