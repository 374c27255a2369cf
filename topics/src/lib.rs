#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Topic providers for the Munch engine.
//!
//! Built-in providers ([`MathTopic`], [`WordTopic`], [`MarvelTopic`],
//! [`MovieTopic`]) generate their challenges from fixed tables. The
//! [`CustomTopicProvider`] acquires content from a [`ContentStore`] and falls
//! back to local synthesis when the store cannot help. The [`Catalog`] hands
//! out seeded instances of every provider.

mod classify;
mod custom;
mod distractors;
mod family;
mod fill;
mod marvel;
mod math;
mod movies;
mod prompt;
mod synthesis;
mod templates;
mod typos;
mod words;

use std::{fmt, sync::Arc};

use munch_content::{ContentStore, MemoryContentStore};
use munch_core::{ProviderFactory, TopicId, TopicProvider, DEFAULT_CUSTOM_TOPIC};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use custom::CustomTopicProvider;
pub use marvel::MarvelTopic;
pub use math::MathTopic;
pub use movies::MovieTopic;
pub use prompt::build_prompt;
pub use synthesis::synthesize_content;
pub use typos::normalize_typos;
pub use words::WordTopic;


/// Configuration parameters required to construct a [`Catalog`].
#[derive(Clone)]
pub struct CatalogConfig {
    /// Seed from which every provider's random source is derived.
    pub seed: u64,
    /// Store consulted by the custom provider.
    pub content_store: Arc<dyn ContentStore>,
}

impl CatalogConfig {
    /// Creates a configuration using the provided seed and content store.
    #[must_use]
    pub fn new(seed: u64, content_store: Arc<dyn ContentStore>) -> Self {
        Self {
            seed,
            content_store,
        }
    }

    /// Creates a configuration backed by an empty in-memory store.
    #[must_use]
    pub fn offline(seed: u64) -> Self {
        Self::new(seed, Arc::new(MemoryContentStore::new()))
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

/// Factory creating seeded providers for every selectable topic.
pub struct Catalog {
    rng: ChaCha8Rng,
    content_store: Arc<dyn ContentStore>,
}

impl Catalog {
    /// Creates a catalog from the supplied configuration.
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            content_store: config.content_store,
        }
    }

    fn next_rng(&mut self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.rng.gen())
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog").finish_non_exhaustive()
    }
}

impl ProviderFactory for Catalog {
    fn create(&mut self, topic: TopicId, custom_topic: &str) -> Box<dyn TopicProvider> {
        let rng = self.next_rng();
        log::debug!("creating provider for topic {topic}");
        match topic {
            TopicId::Math => Box::new(MathTopic::new(rng)),
            TopicId::Words => Box::new(WordTopic::new(rng)),
            TopicId::Marvel => Box::new(MarvelTopic::new(rng)),
            TopicId::Movies => Box::new(MovieTopic::new(rng)),
            TopicId::Custom => {
                let name = if custom_topic.trim().is_empty() {
                    DEFAULT_CUSTOM_TOPIC
                } else {
                    custom_topic.trim()
                };
                Box::new(CustomTopicProvider::new(
                    name,
                    Arc::clone(&self.content_store),
                    rng,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_creates_provider_for_every_topic() {
        let mut catalog = Catalog::new(CatalogConfig::offline(3));
        let names: Vec<String> = TopicId::ALL
            .iter()
            .map(|topic| catalog.create(*topic, "ancient egypt").name())
            .collect();
        assert_eq!(
            names,
            [
                "Mathematics",
                "Word Games",
                "Marvel Universe",
                "Movie Trivia",
                "Custom: ancient egypt",
            ]
        );
    }

    #[test]
    fn blank_custom_topic_uses_default_name() {
        let mut catalog = Catalog::new(CatalogConfig::offline(3));
        let provider = catalog.create(TopicId::Custom, "   ");
        assert_eq!(provider.name(), "Custom: Custom Topic");
        assert!(provider.requires_loading());
    }
}
