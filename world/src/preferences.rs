//! Per-session choices that outlive a single play-through.

use std::collections::HashMap;

use munch_core::{
    validate_custom_topic, TopicId, TopicProvider, TopicRejection, DEFAULT_CUSTOM_TOPIC,
};

#[derive(Debug)]
pub(crate) struct Preferences {
    categories: HashMap<TopicId, String>,
    custom_topic: String,
}

impl Preferences {
    pub(crate) fn new() -> Self {
        Self {
            categories: HashMap::new(),
            custom_topic: DEFAULT_CUSTOM_TOPIC.to_owned(),
        }
    }

    pub(crate) fn custom_topic(&self) -> &str {
        &self.custom_topic
    }

    pub(crate) fn category(&self, topic: TopicId) -> Option<&str> {
        self.categories.get(&topic).map(String::as_str)
    }

    pub(crate) fn set_category(&mut self, topic: TopicId, category: String) {
        let _ = self.categories.insert(topic, category);
    }

    /// Stores `text` as the custom topic if it passes validation.
    pub(crate) fn set_custom_topic(&mut self, text: &str) -> Result<(), TopicRejection> {
        self.custom_topic = validate_custom_topic(text)?;
        Ok(())
    }

    /// Applies the saved category for `topic`, if any, to a fresh provider.
    pub(crate) fn apply_to(&self, topic: TopicId, provider: &mut dyn TopicProvider) {
        if let Some(category) = self.category(topic) {
            log::debug!("applying saved category {category:?} to {topic}");
            provider.set_category(category);
        }
    }
}
