use munch_core::Level;

fn difficulty(level: Level) -> &'static str {
    match level.get() {
        0..=5 => "elementary",
        6..=10 => "middle school",
        _ => "high school",
    }
}

fn focus(subtopic: &str) -> &'static str {
    match subtopic {
        "facts" => "Focus on interesting facts and true statements.",
        "trivia" => "Focus on trivia questions and fun knowledge.",
        "related" => "Focus on things related to or associated with the topic.",
        _ => "Include a variety of items, facts, and related concepts.",
    }
}

/// Builds the prompt sent to the content generator for `topic`.
#[must_use]
pub fn build_prompt(topic: &str, subtopic: &str, level: Level) -> String {
    format!(
        r#"Generate educational content about "{topic}" for a {difficulty} level learning game.
{focus}

Create a JSON object with EXACTLY this structure:
{{
  "correctItems": [array of 20-25 items that ARE related to {topic}],
  "incorrectItems": [array of 15-20 items that are NOT related to {topic}],
  "categories": [array of 5-8 category names, each 1-2 words],
  "facts": [array of 10-15 facts about {topic}, each under 15 characters]
}}

Requirements:
- correctItems are directly related to {topic}
- incorrectItems are NOT related to {topic} but are plausible distractors
- ALL items MUST be 1-2 words maximum (prefer single words)
- Categories: 1-2 words only
- Facts: maximum 15 characters each
- Age-appropriate content

Example for "Surfing":
correctItems: ["Ocean", "Wave", "Board", "Wetsuit", "Beach", "Paddle", "Barrel", "Tide", "Reef", "Curl"]
incorrectItems: ["Mountain", "Snow", "Skiing", "Basketball", "Piano", "Cooking", "Desert", "Space", "Robot", "Books"]"#,
        difficulty = difficulty(level),
        focus = focus(subtopic),
    )
}
