//! Vocabulary challenges: parts of speech, word length, vowels and endings.

use munch_core::{Category, Challenge, Grid, GridSize, Level, TopicError, TopicProvider};
use rand_chacha::ChaCha8Rng;

use crate::{
    family::{self, Family, RANDOM},
    fill,
};

const NOUNS: &[&str] = &[
    "cat", "dog", "house", "car", "tree", "book", "phone", "chair", "table", "water", "apple",
    "school", "friend", "family", "music", "game", "food", "flower", "bird", "fish",
];
const VERBS: &[&str] = &[
    "run", "jump", "sing", "dance", "read", "write", "play", "sleep", "eat", "drink", "walk",
    "talk", "laugh", "cry", "help", "work", "study", "cook", "drive", "swim",
];
const ADJECTIVES: &[&str] = &[
    "big", "small", "happy", "sad", "fast", "slow", "hot", "cold", "new", "old", "good", "bad",
    "tall", "short", "red", "blue", "green", "yellow", "bright", "dark",
];
const OTHER_WORDS: &[&str] = &[
    "the", "and", "but", "or", "in", "on", "at", "by", "for", "with", "123", "456", "789", "abc",
    "xyz", "hello", "world", "test", "here", "there",
];
const ED_WORDS: &[&str] = &[
    "walked", "played", "jumped", "cooked", "helped", "worked", "danced", "laughed",
];
const ING_WORDS: &[&str] = &[
    "singing", "reading", "playing", "jumping", "running", "cooking", "writing", "dancing",
];
const LY_WORDS: &[&str] = &[
    "quickly", "slowly", "happily", "sadly", "loudly", "softly", "brightly", "gently",
];

#[derive(Clone, Copy, Debug)]
enum WordRule {
    Member(&'static str, &'static [&'static str]),
    MinLength(usize, &'static str),
    ExactLength(usize),
    StartsWithVowel,
    EndsWithVowel,
    Ending(&'static str),
}

const FAMILIES: &[Family<WordRule>] = &[
    Family {
        id: "nouns",
        name: "Nouns",
        rules: &[WordRule::Member("Munch NOUNS", NOUNS)],
    },
    Family {
        id: "verbs",
        name: "Verbs",
        rules: &[WordRule::Member("Munch VERBS", VERBS)],
    },
    Family {
        id: "adjectives",
        name: "Adjectives",
        rules: &[WordRule::Member("Munch ADJECTIVES", ADJECTIVES)],
    },
    Family {
        id: "word_length",
        name: "Word Length",
        rules: &[
            WordRule::MinLength(4, "Munch words with 4+ letters"),
            WordRule::ExactLength(3),
            WordRule::MinLength(5, "Munch long words (5+ letters)"),
        ],
    },
    Family {
        id: "word_endings",
        name: "Word Endings",
        rules: &[
            WordRule::Ending("ed"),
            WordRule::Ending("ing"),
            WordRule::Ending("ly"),
        ],
    },
    Family {
        id: "vowel_patterns",
        name: "Vowel Patterns",
        rules: &[WordRule::StartsWithVowel, WordRule::EndsWithVowel],
    },
];

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

impl WordRule {
    fn description(self) -> String {
        match self {
            Self::Member(description, _) | Self::MinLength(_, description) => {
                description.to_owned()
            }
            Self::ExactLength(n) => format!("Munch short words ({n} letters)"),
            Self::StartsWithVowel => "Munch words starting with vowels".to_owned(),
            Self::EndsWithVowel => "Munch words ending with vowels".to_owned(),
            Self::Ending(suffix) => format!("Munch words ending in '{suffix}'"),
        }
    }

    fn matches(self, value: &str) -> bool {
        if let Self::Member(_, members) = self {
            let lowered = value.to_lowercase();
            return members.iter().any(|member| *member == lowered);
        }
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphabetic()) {
            return false;
        }
        let lowered = value.to_ascii_lowercase();
        match self {
            Self::Member(..) => false,
            Self::MinLength(n, _) => value.len() >= n,
            Self::ExactLength(n) => value.len() == n,
            Self::StartsWithVowel => value.chars().next().map_or(false, is_vowel),
            Self::EndsWithVowel => value.chars().last().map_or(false, is_vowel),
            Self::Ending(suffix) => lowered.ends_with(suffix),
        }
    }
}

fn vocabulary() -> Vec<&'static str> {
    [NOUNS, VERBS, ADJECTIVES, OTHER_WORDS, ED_WORDS, ING_WORDS, LY_WORDS].concat()
}

/// Provider generating vocabulary challenges.
#[derive(Debug)]
pub struct WordTopic {
    rng: ChaCha8Rng,
    category: &'static str,
}

impl WordTopic {
    /// Creates the provider with the supplied random source.
    #[must_use]
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            category: RANDOM,
        }
    }
}

impl TopicProvider for WordTopic {
    fn name(&self) -> String {
        "Word Games".to_owned()
    }

    fn categories(&self) -> Vec<Category> {
        family::categories(FAMILIES)
    }

    fn set_category(&mut self, category: &str) {
        self.category = family::resolve(FAMILIES, category, "nouns");
    }

    fn generate_challenge(&mut self, _level: Level) -> Result<Challenge, TopicError> {
        let rule = *family::pick(FAMILIES, self.category, &mut self.rng)
            .ok_or_else(|| TopicError::GenerationFailed("no word rules available".to_owned()))?;
        Ok(Challenge::new(rule.description(), move |value| {
            rule.matches(value)
        }))
    }

    fn generate_grid(&mut self, size: GridSize, challenge: &Challenge) -> Result<Grid, TopicError> {
        let vocabulary = vocabulary();
        Ok(fill::fill_from_pools(
            size,
            challenge,
            &vocabulary,
            &vocabulary,
            fill::correct_target(size.cell_count()),
            &mut self.rng,
        ))
    }
}
