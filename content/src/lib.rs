#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Client side of the topic content cache.
//!
//! Dynamic topics look up previously generated item lists in an external
//! content store, request fresh content from a generation service on a miss,
//! and persist whatever they end up using. [`ContentStore`] abstracts that
//! service so the game can talk to the HTTP deployment
//! ([`HttpContentStore`]) or run fully in-process ([`MemoryContentStore`]).

mod http;
mod memory;
mod rate_limit;
mod types;
mod validation;

use thiserror::Error;

pub use http::HttpContentStore;
pub use memory::{Generator, MemoryContentStore};
pub use rate_limit::RateLimiter;
pub use types::{
    GenerateRequest, GenerateResponse, GeneratedBy, PopularTopic, SaveRequest, SaveResponse,
    TopicContent,
};
pub use validation::{
    normalize_topic_key, process_generated, sanitize_save, validate_generate, ValidationError,
};

/// Subtopic used when a request does not name one.
pub const DEFAULT_SUBTOPIC: &str = "all";

/// Failures reported by a [`ContentStore`].
///
/// Callers generating game content treat every variant as a signal to fall
/// back to local synthesis.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    /// The service could not be reached or the connection failed mid-request.
    #[error("content service unreachable: {0}")]
    Transport(String),
    /// The service answered with an unexpected HTTP status.
    #[error("content service responded with status {0}")]
    Status(u16),
    /// Too many generation requests inside the rate-limit window.
    #[error("content generation rate limit exceeded")]
    RateLimited,
    /// The generation backend is down or not configured.
    #[error("content generator unavailable")]
    Unavailable,
    /// The request failed validation before reaching the store.
    #[error("invalid content request: {0}")]
    Invalid(#[from] ValidationError),
    /// The response body could not be interpreted.
    #[error("malformed content response: {0}")]
    Malformed(String),
}

/// Cache and generation backend for dynamic topic content.
pub trait ContentStore: Send + Sync {
    /// Looks up cached content for `(topic, subtopic)`.
    ///
    /// The topic is normalized with [`normalize_topic_key`] before lookup and an
    /// empty subtopic means [`DEFAULT_SUBTOPIC`].
    fn fetch(&self, topic: &str, subtopic: &str) -> Result<Option<TopicContent>, ContentError>;

    /// Persists content, returning the identifier assigned by the store.
    fn save(&self, request: &SaveRequest) -> Result<u64, ContentError>;

    /// Requests freshly generated content.
    fn generate(&self, request: &GenerateRequest) -> Result<TopicContent, ContentError>;

    /// Most frequently used topics, most popular first.
    fn popular_topics(&self, limit: usize) -> Result<Vec<PopularTopic>, ContentError>;
}

fn subtopic_or_default(subtopic: &str) -> &str {
    if subtopic.trim().is_empty() {
        DEFAULT_SUBTOPIC
    } else {
        subtopic
    }
}
