use crate::oauth::{authorization_header, OAuthKeys};
use crate::types::{DeskError, PostingChannel, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub const TWEETS_ENDPOINT: &str = "https://api.twitter.com/2/tweets";

#[derive(Clone, Default)]
pub struct XCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl XCredentials {
    pub fn is_complete(&self) -> bool {
        [
            &self.api_key,
            &self.api_secret,
            &self.access_token,
            &self.access_token_secret,
        ]
        .iter()
        .all(|value| !value.trim().is_empty())
    }

    fn keys(&self) -> OAuthKeys<'_> {
        OAuthKeys {
            consumer_key: &self.api_key,
            consumer_secret: &self.api_secret,
            token: &self.access_token,
            token_secret: &self.access_token_secret,
        }
    }
}

impl std::fmt::Debug for XCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XCredentials")
            .field("complete", &self.is_complete())
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct CreateTweet<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<ReplySettings<'a>>,
}

#[derive(Serialize)]
struct ReplySettings<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Deserialize)]
struct CreatedTweet {
    id: String,
}

/// X API v2 client for creating posts.
pub struct XClient {
    client: Client,
    credentials: XCredentials,
    endpoint: String,
}

impl XClient {
    pub fn new(client: Client, credentials: XCredentials) -> Self {
        Self {
            client,
            credentials,
            endpoint: TWEETS_ENDPOINT.to_string(),
        }
    }

    async fn post_tweet(&self, text: &str, in_reply_to: Option<&str>) -> Result<String> {
        let body = CreateTweet {
            text,
            reply: in_reply_to.map(|id| ReplySettings { in_reply_to_tweet_id: id }),
        };

        let nonce = Uuid::new_v4().simple().to_string();
        let timestamp = Utc::now().timestamp().max(0) as u64;
        let authorization = authorization_header(
            "POST",
            &self.endpoint,
            &[],
            &self.credentials.keys(),
            &nonce,
            timestamp,
        );

        debug!("POST {} ({} chars, reply to {:?})", self.endpoint, text.chars().count(), in_reply_to);

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(DeskError::Publish(format!("X API returned {}: {}", status, text)));
        }

        let created: CreateTweetResponse = serde_json::from_str(&text)?;
        Ok(created.data.id)
    }
}

#[async_trait]
impl PostingChannel for XClient {
    fn channel_name(&self) -> String {
        "X".to_string()
    }

    async fn create_post(&self, text: &str, in_reply_to: Option<&str>) -> anyhow::Result<String> {
        Ok(self.post_tweet(text, in_reply_to).await?)
    }

    fn has_credentials(&self) -> bool {
        self.credentials.is_complete()
    }
}
