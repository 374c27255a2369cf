//! Checks applied to topic names typed in by the player.

use crate::TopicRejection;

/// Name used for the custom topic until the player provides one.
pub const DEFAULT_CUSTOM_TOPIC: &str = "Custom Topic";

const MIN_CHARS: usize = 2;
const MAX_CHARS: usize = 50;
const BLOCKED_WORDS: [&str; 8] = ["fuck", "shit", "damn", "hell", "ass", "bitch", "crap", "piss"];

/// Validates free-form topic text, returning the trimmed topic on success.
///
/// Checks run in order: length bounds, blocked words (case-insensitive
/// substring), purely numeric text, presence of an ASCII letter.
pub fn validate_custom_topic(text: &str) -> Result<String, TopicRejection> {
    let topic = text.trim();
    let chars = topic.chars().count();
    if chars < MIN_CHARS {
        return Err(TopicRejection::TooShort);
    }
    if chars > MAX_CHARS {
        return Err(TopicRejection::TooLong);
    }
    let lowered = topic.to_lowercase();
    if BLOCKED_WORDS.iter().any(|word| lowered.contains(word)) {
        return Err(TopicRejection::Inappropriate);
    }
    if topic.chars().all(|c| c.is_ascii_digit()) {
        return Err(TopicRejection::NumbersOnly);
    }
    if !topic.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(TopicRejection::NoLetters);
    }
    Ok(topic.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_reasonable_topics() {
        assert_eq!(
            validate_custom_topic("  Ancient Egypt "),
            Ok("Ancient Egypt".to_owned())
        );
        assert_eq!(validate_custom_topic("3D printing"), Ok("3D printing".to_owned()));
    }

    #[test]
    fn rejections_follow_check_order() {
        assert_eq!(validate_custom_topic(" a "), Err(TopicRejection::TooShort));
        assert_eq!(validate_custom_topic(""), Err(TopicRejection::TooShort));
        assert_eq!(
            validate_custom_topic(&"x".repeat(51)),
            Err(TopicRejection::TooLong)
        );
        assert_eq!(validate_custom_topic("12345"), Err(TopicRejection::NumbersOnly));
        assert_eq!(validate_custom_topic("!!??"), Err(TopicRejection::NoLetters));
        assert_eq!(
            validate_custom_topic("What the HELL"),
            Err(TopicRejection::Inappropriate)
        );
    }

    #[test]
    fn blocked_words_match_inside_other_words() {
        assert_eq!(
            validate_custom_topic("Classical music"),
            Err(TopicRejection::Inappropriate)
        );
    }
}
