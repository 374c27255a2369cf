//! Typo correction for custom topic names.

const TYPOS: &[(&str, &str)] = &[
    ("egeypt", "egypt"),
    ("egpyt", "egypt"),
    ("egyp", "egypt"),
    ("egipt", "egypt"),
    ("ejypt", "egypt"),
    ("dinasour", "dinosaur"),
    ("dinasaur", "dinosaur"),
    ("dinosaurt", "dinosaur"),
    ("dinosour", "dinosaur"),
    ("dino", "dinosaur"),
    ("sapce", "space"),
    ("spce", "space"),
    ("spoace", "space"),
    ("msic", "music"),
    ("mucis", "music"),
    ("misuc", "music"),
    ("jaz", "jazz"),
    ("jazs", "jazz"),
    ("jasz", "jazz"),
    ("animl", "animal"),
    ("anmal", "animal"),
    ("animla", "animal"),
    ("hsitory", "history"),
    ("histry", "history"),
    ("histroy", "history"),
    ("scince", "science"),
    ("sceince", "science"),
    ("scienc", "science"),
];

/// Lowercases `topic` and replaces commonly misspelled words.
#[must_use]
pub fn normalize_typos(topic: &str) -> String {
    topic
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            TYPOS
                .iter()
                .find(|(typo, _)| *typo == word)
                .map_or(word, |(_, fixed)| *fixed)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
