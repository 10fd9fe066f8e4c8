pub mod analysis;
pub mod config;
pub mod curation;
pub mod desk;
pub mod drafts;
pub mod fetcher;
pub mod headlines;
pub mod llm_adapter;
pub mod oauth;
pub mod parser;
pub mod prompts;
pub mod publisher;
pub mod rss_utils;
pub mod sources;
pub mod store;
pub mod types;
pub mod x_client;

pub use types::*;
pub use analysis::{AnalysisConfig, Analyst};
pub use config::DeskConfig;
pub use curation::Curator;
pub use desk::{CycleOutcome, NewsDesk, RunSettings};
pub use drafts::DraftArchive;
pub use fetcher::Fetcher;
pub use headlines::HeadlineSource;
pub use llm_adapter::OpenRouterAdapter;
pub use parser::FeedParser;
pub use publisher::{Publisher, PublisherConfig};
pub use sources::RssFeedSource;
pub use store::{Fingerprint, NewsStore};
pub use x_client::{XClient, XCredentials};
