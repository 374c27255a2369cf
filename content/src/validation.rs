//! Request validation and payload sanitization.

use thiserror::Error;

use crate::{subtopic_or_default, GenerateRequest, SaveRequest, TopicContent};

const MAX_TOPIC_CHARS: usize = 100;
const MAX_SUBTOPIC_CHARS: usize = 50;
const MAX_ITEMS: usize = 100;
const MAX_CATEGORIES: usize = 20;
const MAX_FACTS: usize = 30;
const MAX_ITEM_CHARS: usize = 50;
const MAX_CATEGORY_CHARS: usize = 30;
const MAX_FACT_CHARS: usize = 100;
const MAX_SEPARATED_ITEMS: usize = 50;
const MAX_LEVEL: u32 = 50;
const MAX_PROMPT_CHARS: usize = 2000;

const GENERATED_ITEMS: usize = 40;
const GENERATED_CATEGORIES: usize = 10;
const GENERATED_FACTS: usize = 15;

/// Reasons a content request is refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Topic missing or longer than 100 characters.
    #[error("invalid topic parameter")]
    Topic,
    /// Subtopic longer than 50 characters.
    #[error("invalid subtopic parameter")]
    Subtopic,
    /// Item list empty or longer than 100 entries.
    #[error("invalid items parameter")]
    Items,
    /// More than 20 categories.
    #[error("invalid categories parameter")]
    Categories,
    /// More than 30 facts.
    #[error("invalid facts parameter")]
    Facts,
    /// Level outside `1..=50`.
    #[error("invalid level parameter")]
    Level,
    /// Prompt missing or longer than 2000 characters.
    #[error("invalid prompt parameter")]
    Prompt,
}

/// Normalizes a topic into its cache key.
///
/// The topic is lowercased and trimmed, then every character other than ASCII
/// letters, digits, whitespace and `-` is removed.
#[must_use]
pub fn normalize_topic_key(topic: &str) -> String {
    topic
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect()
}

/// Validates a save request and returns its sanitized form.
///
/// Count limits reject the request outright; over-long or empty entries are
/// dropped silently.
pub fn sanitize_save(request: &SaveRequest) -> Result<SaveRequest, ValidationError> {
    let topic_chars = request.topic.chars().count();
    if topic_chars == 0 || topic_chars > MAX_TOPIC_CHARS {
        return Err(ValidationError::Topic);
    }
    let content = &request.content;
    if content.items.is_empty() || content.items.len() > MAX_ITEMS {
        return Err(ValidationError::Items);
    }
    if content.categories.len() > MAX_CATEGORIES {
        return Err(ValidationError::Categories);
    }
    if content.facts.len() > MAX_FACTS {
        return Err(ValidationError::Facts);
    }

    let separated = |list: &Option<Vec<String>>| {
        list.as_ref()
            .map(|entries| bounded(entries, MAX_ITEM_CHARS, MAX_SEPARATED_ITEMS))
    };

    Ok(SaveRequest {
        topic: normalize_topic_key(&request.topic),
        subtopic: subtopic_or_default(&request.subtopic).to_owned(),
        content: TopicContent {
            items: bounded(&content.items, MAX_ITEM_CHARS, MAX_ITEMS),
            categories: bounded(&content.categories, MAX_CATEGORY_CHARS, MAX_CATEGORIES),
            facts: bounded(&content.facts, MAX_FACT_CHARS, MAX_FACTS),
            correct_items: separated(&content.correct_items),
            incorrect_items: separated(&content.incorrect_items),
            generated_by: Some(content.generated_by.unwrap_or_default()),
        },
    })
}

/// Validates a generation request.
pub fn validate_generate(request: &GenerateRequest) -> Result<(), ValidationError> {
    let topic_chars = request.topic.chars().count();
    if topic_chars == 0 || topic_chars > MAX_TOPIC_CHARS {
        return Err(ValidationError::Topic);
    }
    if request.subtopic.chars().count() > MAX_SUBTOPIC_CHARS {
        return Err(ValidationError::Subtopic);
    }
    if !(1..=MAX_LEVEL).contains(&request.level) {
        return Err(ValidationError::Level);
    }
    let prompt_chars = request.prompt.chars().count();
    if prompt_chars == 0 || prompt_chars > MAX_PROMPT_CHARS {
        return Err(ValidationError::Prompt);
    }
    Ok(())
}

/// Cleans content returned by a generation backend.
///
/// Separated lists are filtered by length, `items` becomes their
/// concatenation capped at 40 entries, and categories and facts are capped at
/// 10 and 15 entries.
#[must_use]
pub fn process_generated(raw: TopicContent) -> TopicContent {
    let correct = bounded(
        raw.correct_items.as_deref().unwrap_or_default(),
        MAX_ITEM_CHARS,
        usize::MAX,
    );
    let incorrect = bounded(
        raw.incorrect_items.as_deref().unwrap_or_default(),
        MAX_ITEM_CHARS,
        usize::MAX,
    );
    let items = correct
        .iter()
        .chain(incorrect.iter())
        .take(GENERATED_ITEMS)
        .cloned()
        .collect();
    TopicContent {
        items,
        categories: bounded(&raw.categories, MAX_CATEGORY_CHARS, GENERATED_CATEGORIES),
        facts: bounded(&raw.facts, MAX_FACT_CHARS, GENERATED_FACTS),
        correct_items: Some(correct),
        incorrect_items: Some(incorrect),
        generated_by: raw.generated_by,
    }
}

fn bounded(entries: &[String], max_chars: usize, max_entries: usize) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| {
            let chars = entry.chars().count();
            chars > 0 && chars <= max_chars
        })
        .take(max_entries)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeneratedBy;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    fn save_request(items: Vec<String>) -> SaveRequest {
        SaveRequest {
            topic: "  Ancient Egypt! ".to_owned(),
            subtopic: String::new(),
            content: TopicContent {
                items,
                ..TopicContent::default()
            },
        }
    }

    #[test]
    fn topic_keys_are_lowercased_trimmed_and_stripped() {
        assert_eq!(normalize_topic_key("  Ancient Egypt! "), "ancient egypt");
        assert_eq!(normalize_topic_key("Sci-Fi & Fantasy"), "sci-fi  fantasy");
        assert_eq!(normalize_topic_key("Café"), "caf");
    }

    #[test]
    fn save_rejects_count_violations() {
        assert_eq!(
            sanitize_save(&save_request(Vec::new())),
            Err(ValidationError::Items)
        );
        let too_many = (0..101).map(|n| n.to_string()).collect();
        assert_eq!(
            sanitize_save(&save_request(too_many)),
            Err(ValidationError::Items)
        );

        let mut request = save_request(strings(&["Nile"]));
        request.content.facts = vec!["fact".to_owned(); 31];
        assert_eq!(sanitize_save(&request), Err(ValidationError::Facts));
    }

    #[test]
    fn save_filters_oversized_entries_and_defaults_subtopic() {
        let long = "x".repeat(51);
        let mut request = save_request(vec!["Nile".to_owned(), String::new(), long.clone()]);
        request.content.correct_items = Some(vec!["Nile".to_owned(), long]);
        let sanitized = sanitize_save(&request).expect("valid request");
        assert_eq!(sanitized.topic, "ancient egypt");
        assert_eq!(sanitized.subtopic, "all");
        assert_eq!(sanitized.content.items, strings(&["Nile"]));
        assert_eq!(sanitized.content.correct_items, Some(strings(&["Nile"])));
        assert_eq!(sanitized.content.incorrect_items, None);
        assert_eq!(sanitized.content.generated_by, Some(GeneratedBy::Mock));
    }

    #[test]
    fn generate_requests_are_bounded() {
        let mut request = GenerateRequest {
            topic: "space".to_owned(),
            subtopic: "all".to_owned(),
            level: 3,
            prompt: "Generate space content".to_owned(),
        };
        assert_eq!(validate_generate(&request), Ok(()));

        request.level = 51;
        assert_eq!(validate_generate(&request), Err(ValidationError::Level));
        request.level = 3;
        request.prompt = "p".repeat(2001);
        assert_eq!(validate_generate(&request), Err(ValidationError::Prompt));
    }

    #[test]
    fn generated_content_is_capped() {
        let raw = TopicContent {
            correct_items: Some((0..30).map(|n| format!("correct {n}")).collect()),
            incorrect_items: Some((0..30).map(|n| format!("wrong {n}")).collect()),
            categories: (0..12).map(|n| format!("cat {n}")).collect(),
            facts: (0..20).map(|n| format!("fact {n}")).collect(),
            ..TopicContent::default()
        };
        let processed = process_generated(raw);
        assert_eq!(processed.items.len(), 40);
        assert_eq!(processed.items[29], "correct 29");
        assert_eq!(processed.items[30], "wrong 0");
        assert_eq!(processed.categories.len(), 10);
        assert_eq!(processed.facts.len(), 15);
        assert_eq!(processed.correct_items.map(|list| list.len()), Some(30));
    }
}
