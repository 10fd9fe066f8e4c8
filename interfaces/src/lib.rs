pub mod defs;

pub use defs::{
    Article, CompletionRequest, FeedItem, FeedSnapshot, Headline, LlmAdapter, PostedRecord,
    PostingChannel, PullFeed,
};
