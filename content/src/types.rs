//! Wire types exchanged with the content service.

use serde::{Deserialize, Serialize};

/// Origin of a content entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneratedBy {
    /// Produced by the remote generation service.
    #[serde(rename = "openai")]
    OpenAi,
    /// Produced by local synthesis.
    #[serde(rename = "mock")]
    #[default]
    Mock,
    /// Any other label stored by older clients.
    #[serde(rename = "unknown", other)]
    Unknown,
}

/// Item lists describing a topic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicContent {
    /// Every item, correct and incorrect.
    #[serde(default)]
    pub items: Vec<String>,
    /// Category labels associated with the topic.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Short facts about the topic.
    #[serde(default)]
    pub facts: Vec<String>,
    /// Items known to relate to the topic, when the source separated them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_items: Option<Vec<String>>,
    /// Items known not to relate to the topic, when the source separated them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incorrect_items: Option<Vec<String>>,
    /// Origin of the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<GeneratedBy>,
}

impl TopicContent {
    /// Whether the content carries both separated item lists.
    #[must_use]
    pub fn is_separated(&self) -> bool {
        matches!(
            (&self.correct_items, &self.incorrect_items),
            (Some(correct), Some(_)) if !correct.is_empty()
        )
    }
}

/// Body of `POST /content`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    /// Topic name; normalized by the store.
    pub topic: String,
    /// Subtopic variant.
    #[serde(default)]
    pub subtopic: String,
    /// Content to persist.
    #[serde(flatten)]
    pub content: TopicContent,
}

/// Reply to `POST /content`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    /// Whether the entry was stored.
    pub success: bool,
    /// Identifier of the stored entry.
    pub id: u64,
}

/// Body of `POST /generate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Topic the content is about.
    pub topic: String,
    /// Subtopic focus.
    pub subtopic: String,
    /// Level the content is generated for.
    pub level: u32,
    /// Prompt forwarded to the generator.
    pub prompt: String,
}

/// Reply to `POST /generate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Whether generation succeeded.
    pub success: bool,
    /// Generated content, present on success.
    #[serde(default)]
    pub content: Option<TopicContent>,
    /// Backend that produced the content.
    #[serde(default)]
    pub source: Option<String>,
}

/// Entry of `GET /popular-topics`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularTopic {
    /// Normalized topic key.
    pub topic: String,
    /// Number of times the entry was served.
    pub usage_count: u64,
}
