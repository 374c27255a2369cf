//! In-process content store.

use std::{collections::HashMap, fmt, time::Instant};

use parking_lot::Mutex;

use crate::{
    normalize_topic_key, process_generated, sanitize_save, subtopic_or_default,
    validate_generate, ContentError, ContentStore, GenerateRequest, GeneratedBy, PopularTopic,
    RateLimiter, SaveRequest, TopicContent,
};

/// Backend invoked by [`MemoryContentStore::generate`].
pub type Generator = dyn Fn(&GenerateRequest) -> Result<TopicContent, ContentError> + Send + Sync;

#[derive(Debug)]
struct Entry {
    id: u64,
    topic: String,
    content: TopicContent,
    usage_count: u64,
}

#[derive(Debug)]
struct State {
    entries: HashMap<String, Entry>,
    next_id: u64,
    limiter: RateLimiter,
}

/// Content store kept in memory, mirroring the HTTP service's behaviour.
pub struct MemoryContentStore {
    state: Mutex<State>,
    generator: Option<Box<Generator>>,
}

impl MemoryContentStore {
    /// Creates an empty store without a generation backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                entries: HashMap::new(),
                next_id: 1,
                limiter: RateLimiter::default(),
            }),
            generator: None,
        }
    }

    /// Installs the backend used to answer generation requests.
    #[must_use]
    pub fn with_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(&GenerateRequest) -> Result<TopicContent, ContentError> + Send + Sync + 'static,
    {
        self.generator = Some(Box::new(generator));
        self
    }

    /// Replaces the generation rate limiter.
    #[must_use]
    pub fn with_rate_limiter(self, limiter: RateLimiter) -> Self {
        self.state.lock().limiter = limiter;
        self
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryContentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryContentStore")
            .field("entries", &self.len())
            .field("generator", &self.generator.is_some())
            .finish()
    }
}

fn cache_key(topic: &str, subtopic: &str) -> String {
    format!("{topic}:::{subtopic}")
}

impl ContentStore for MemoryContentStore {
    fn fetch(&self, topic: &str, subtopic: &str) -> Result<Option<TopicContent>, ContentError> {
        let key = cache_key(&normalize_topic_key(topic), subtopic_or_default(subtopic));
        let mut state = self.state.lock();
        Ok(state.entries.get_mut(&key).map(|entry| {
            entry.usage_count += 1;
            entry.content.clone()
        }))
    }

    fn save(&self, request: &SaveRequest) -> Result<u64, ContentError> {
        let sanitized = sanitize_save(request)?;
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        let key = cache_key(&sanitized.topic, &sanitized.subtopic);
        log::debug!("caching content for {key} as entry {id}");
        let _ = state.entries.insert(
            key,
            Entry {
                id,
                topic: sanitized.topic,
                content: sanitized.content,
                usage_count: 1,
            },
        );
        Ok(id)
    }

    fn generate(&self, request: &GenerateRequest) -> Result<TopicContent, ContentError> {
        validate_generate(request)?;
        if !self.state.lock().limiter.try_acquire(Instant::now()) {
            return Err(ContentError::RateLimited);
        }
        let generator = self.generator.as_ref().ok_or(ContentError::Unavailable)?;
        let mut content = process_generated(generator(request)?);
        content.generated_by = Some(GeneratedBy::OpenAi);
        Ok(content)
    }

    fn popular_topics(&self, limit: usize) -> Result<Vec<PopularTopic>, ContentError> {
        let state = self.state.lock();
        let mut entries: Vec<&Entry> = state.entries.values().collect();
        entries.sort_by(|a, b| b.usage_count.cmp(&a.usage_count).then(a.id.cmp(&b.id)));
        Ok(entries
            .into_iter()
            .take(limit)
            .map(|entry| PopularTopic {
                topic: entry.topic.clone(),
                usage_count: entry.usage_count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RateLimiter;
    use std::time::Duration;

    fn save(store: &MemoryContentStore, topic: &str, subtopic: &str) -> u64 {
        store
            .save(&SaveRequest {
                topic: topic.to_owned(),
                subtopic: subtopic.to_owned(),
                content: TopicContent {
                    items: vec![format!("{topic} item")],
                    ..TopicContent::default()
                },
            })
            .expect("valid save")
    }

    fn request(topic: &str) -> GenerateRequest {
        GenerateRequest {
            topic: topic.to_owned(),
            subtopic: "all".to_owned(),
            level: 1,
            prompt: format!("Generate content about {topic}"),
        }
    }

    #[test]
    fn fetch_normalizes_topic_and_defaults_subtopic() {
        let store = MemoryContentStore::new();
        let _ = save(&store, "Space", "");
        let hit = store.fetch("  SPACE!", "").expect("fetch succeeds");
        assert_eq!(
            hit.map(|content| content.items),
            Some(vec!["Space item".to_owned()])
        );
        assert_eq!(store.fetch("space", "facts").expect("fetch succeeds"), None);
    }

    #[test]
    fn popular_topics_rank_by_usage() {
        let store = MemoryContentStore::new();
        let _ = save(&store, "egypt", "all");
        let _ = save(&store, "space", "all");
        for _ in 0..3 {
            let _ = store.fetch("space", "all").expect("fetch succeeds");
        }
        let popular = store.popular_topics(10).expect("listing succeeds");
        assert_eq!(popular[0].topic, "space");
        assert_eq!(popular[0].usage_count, 4);
        assert_eq!(popular[1].topic, "egypt");
        assert_eq!(store.popular_topics(1).expect("listing succeeds").len(), 1);
    }

    #[test]
    fn generate_without_backend_is_unavailable() {
        let store = MemoryContentStore::new();
        assert_eq!(
            store.generate(&request("space")),
            Err(ContentError::Unavailable)
        );
    }

    #[test]
    fn generate_is_rate_limited() {
        let store = MemoryContentStore::new()
            .with_rate_limiter(RateLimiter::new(2, Duration::from_secs(3600)))
            .with_generator(|request| {
                Ok(TopicContent {
                    correct_items: Some(vec![request.topic.clone()]),
                    incorrect_items: Some(vec!["Pizza".to_owned()]),
                    ..TopicContent::default()
                })
            });
        let first = store.generate(&request("space")).expect("admitted");
        assert_eq!(first.items, vec!["space".to_owned(), "Pizza".to_owned()]);
        assert_eq!(first.generated_by, Some(GeneratedBy::OpenAi));
        assert!(store.generate(&request("space")).is_ok());
        assert_eq!(
            store.generate(&request("space")),
            Err(ContentError::RateLimited)
        );
    }

    #[test]
    fn invalid_requests_never_reach_the_backend() {
        let store = MemoryContentStore::new().with_generator(|_| {
            panic!("backend must not be called for invalid requests");
        });
        let mut invalid = request("space");
        invalid.prompt.clear();
        assert!(matches!(
            store.generate(&invalid),
            Err(ContentError::Invalid(_))
        ));
    }
}
