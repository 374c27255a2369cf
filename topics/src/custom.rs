//! Player supplied topics backed by the content store.

use std::{
    collections::HashMap,
    fmt,
    sync::Arc,
    thread::{self, JoinHandle},
};

use munch_content::{ContentStore, GenerateRequest, GeneratedBy, SaveRequest, TopicContent};
use munch_core::{Category, Challenge, Grid, GridSize, Level, TopicError, TopicProvider};
use rand_chacha::ChaCha8Rng;

use crate::{
    build_prompt,
    classify::classify_items,
    distractors::grid_distractors,
    fill, synthesize_content,
    templates::{build_challenge, ChallengeData},
};

const SUBTOPICS: [(&str, &str); 4] = [
    ("all", "Everything"),
    ("facts", "Facts"),
    ("trivia", "Trivia"),
    ("related", "Related Items"),
];
const DEFAULT_SUBTOPIC: &str = "all";
const SAVE_THREAD_NAME: &str = "munch-cache-save";

/// Provider for a topic typed in by the player.
///
/// Content is looked up in the store first, then requested from the store's
/// generator, and finally synthesized locally. Freshly produced content is
/// written back to the store on a background thread.
pub struct CustomTopicProvider {
    topic: String,
    subtopic: &'static str,
    store: Arc<dyn ContentStore>,
    rng: ChaCha8Rng,
    memo: HashMap<(&'static str, u32), TopicContent>,
    current: Option<ChallengeData>,
    pending_saves: Vec<JoinHandle<()>>,
}

impl CustomTopicProvider {
    /// Creates a provider for `topic` backed by `store`.
    #[must_use]
    pub fn new(topic: impl Into<String>, store: Arc<dyn ContentStore>, rng: ChaCha8Rng) -> Self {
        Self {
            topic: topic.into(),
            subtopic: DEFAULT_SUBTOPIC,
            store,
            rng,
            memo: HashMap::new(),
            current: None,
            pending_saves: Vec::new(),
        }
    }

    /// Waits for every outstanding background save.
    pub fn flush_pending_saves(&mut self) {
        for handle in self.pending_saves.drain(..) {
            if handle.join().is_err() {
                log::warn!("background content save panicked");
            }
        }
    }

    fn content_for(&mut self, level: Level) -> TopicContent {
        let key = (self.subtopic, level.get());
        if let Some(content) = self.memo.get(&key) {
            return content.clone();
        }
        let content = self.acquire(level);
        let _ = self.memo.insert(key, content.clone());
        content
    }

    fn acquire(&mut self, level: Level) -> TopicContent {
        match self.store.fetch(&self.topic, self.subtopic) {
            Ok(Some(content)) if !content.items.is_empty() => {
                log::info!("using cached content for {:?}", self.topic);
                return content;
            }
            Ok(_) => {}
            Err(error) => log::warn!("content lookup for {:?} failed: {error}", self.topic),
        }

        let request = GenerateRequest {
            topic: self.topic.clone(),
            subtopic: self.subtopic.to_owned(),
            level: level.get(),
            prompt: build_prompt(&self.topic, self.subtopic, level),
        };
        let (content, origin) = match self.store.generate(&request) {
            Ok(content) => (content, GeneratedBy::OpenAi),
            Err(error) => {
                log::warn!(
                    "content generation for {:?} unavailable ({error}); synthesizing locally",
                    self.topic
                );
                (synthesize_content(&self.topic, level), GeneratedBy::Mock)
            }
        };
        self.save_in_background(&content, origin);
        content
    }

    fn save_in_background(&mut self, content: &TopicContent, origin: GeneratedBy) {
        self.pending_saves.retain(|handle| !handle.is_finished());

        let store = Arc::clone(&self.store);
        let request = SaveRequest {
            topic: self.topic.clone(),
            subtopic: self.subtopic.to_owned(),
            content: TopicContent {
                generated_by: Some(origin),
                ..content.clone()
            },
        };
        let spawned = thread::Builder::new()
            .name(SAVE_THREAD_NAME.to_owned())
            .spawn(move || match store.save(&request) {
                Ok(id) => log::debug!("saved content for {:?} as entry {id}", request.topic),
                Err(error) => log::warn!("failed to save content for {:?}: {error}", request.topic),
            });
        match spawned {
            Ok(handle) => self.pending_saves.push(handle),
            Err(error) => log::warn!("could not start content save thread: {error}"),
        }
    }

    fn separate(&self, content: TopicContent) -> (Vec<String>, Vec<String>) {
        if content.is_separated() {
            (
                content.correct_items.unwrap_or_default(),
                content.incorrect_items.unwrap_or_default(),
            )
        } else {
            let items: Vec<String> = content
                .items
                .into_iter()
                .chain(content.facts)
                .chain(content.categories)
                .collect();
            classify_items(&self.topic, &items)
        }
    }
}

impl fmt::Debug for CustomTopicProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomTopicProvider")
            .field("topic", &self.topic)
            .field("subtopic", &self.subtopic)
            .field("pending_saves", &self.pending_saves.len())
            .finish_non_exhaustive()
    }
}

impl TopicProvider for CustomTopicProvider {
    fn name(&self) -> String {
        format!("Custom: {}", self.topic)
    }

    fn categories(&self) -> Vec<Category> {
        SUBTOPICS
            .iter()
            .map(|(id, name)| Category::new(*id, *name))
            .collect()
    }

    fn set_category(&mut self, category: &str) {
        self.subtopic = SUBTOPICS
            .iter()
            .map(|(id, _)| *id)
            .find(|id| *id == category)
            .unwrap_or(DEFAULT_SUBTOPIC);
    }

    fn requires_loading(&self) -> bool {
        true
    }

    fn generate_challenge(&mut self, level: Level) -> Result<Challenge, TopicError> {
        let content = self.content_for(level);
        let (mut correct, mut incorrect) = self.separate(content);
        if correct.is_empty() {
            log::warn!(
                "content for {:?} has no on-topic items; synthesizing locally",
                self.topic
            );
            (correct, incorrect) = self.separate(synthesize_content(&self.topic, level));
        }
        let data = build_challenge(&self.topic, correct, incorrect, level, &mut self.rng);
        let challenge = data.challenge();
        self.current = Some(data);
        Ok(challenge)
    }

    fn generate_grid(&mut self, size: GridSize, challenge: &Challenge) -> Result<Grid, TopicError> {
        let data = self.current.as_ref().ok_or_else(|| {
            TopicError::GenerationFailed("grid requested before any challenge".to_owned())
        })?;
        let cells = size.cell_count();
        let mut values: Vec<String> = data
            .correct
            .iter()
            .chain(data.incorrect.iter())
            .cloned()
            .collect();
        if values.len() < cells {
            let missing = cells - values.len();
            values.extend(grid_distractors(
                &self.topic,
                missing,
                &data.correct,
                &mut self.rng,
            ));
        }
        fill::recycle_to(&mut values, cells, challenge);
        values.truncate(cells);
        Ok(fill::place_shuffled(size, values, challenge, &mut self.rng))
    }
}
