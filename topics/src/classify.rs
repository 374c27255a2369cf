//! Keyword classifier splitting unlabelled items into correct and incorrect.

/// Items that are off-topic for almost any subject.
const UNIVERSAL_DISTRACTORS: &[&str] = &[
    "monkey", "pizza", "rainbow", "guitar", "elephant", "jungle", "butterfly", "castle",
    "superhero", "unicorn", "robot", "book", "moon", "football", "ice cream", "planet",
    "mountain", "snow", "skiing", "basketball", "piano", "cooking", "desert", "space", "car",
    "television", "computer", "phone", "house", "school", "office", "pencil", "paper", "chair",
    "table",
];

const TOPIC_MAPPINGS: &[(&str, &[&str])] = &[
    (
        "electricity",
        &[
            "battery", "wire", "light", "switch", "circuit", "plug", "outlet", "socket", "bulb",
            "power", "energy", "electrician", "current", "voltage", "shock", "appliance",
            "generator", "transformer", "fuse", "resistor", "conductor", "insulator", "amplifier",
            "motor",
        ],
    ),
    (
        "music",
        &[
            "guitar", "piano", "violin", "drums", "trumpet", "saxophone", "note", "chord",
            "rhythm", "melody", "harmony", "song", "beat", "tempo", "scale", "bass", "treble",
            "jazz", "rock", "pop", "classical", "concert", "band", "orchestra", "singer",
            "composer", "musician",
        ],
    ),
    (
        "cooking",
        &[
            "knife", "pot", "stove", "spoon", "plate", "food", "recipe", "chop", "bake", "mix",
            "grill", "peel", "steam", "boil", "fry", "whisk", "simmer", "season", "taste",
            "serve", "eat", "dish", "pan", "oven",
        ],
    ),
    (
        "lego",
        &[
            "brick", "build", "minifig", "set", "color", "play", "creation", "piece", "theme",
            "instruction", "baseplate", "creative", "imagination", "construct", "model", "toy",
            "plastic", "stack",
        ],
    ),
    (
        "surfing",
        &[
            "ocean", "wave", "board", "wetsuit", "beach", "surf", "tide", "sand", "paddle",
            "ride", "barrel", "tube", "break", "curl", "foam", "swell", "fin", "leash", "wax",
            "reef", "shore",
        ],
    ),
    (
        "shoes",
        &[
            "laces", "sole", "heel", "boot", "sandal", "slipper", "sneaker", "insole", "toe",
            "shoelace", "footwear", "cleats", "platform", "oxford", "clog", "moccasin", "pump",
            "flip-flop", "athletic", "loafer", "wedge", "stiletto", "brogue", "walking",
            "running", "leather", "rubber", "foot", "ankle", "lace", "buckle", "strap",
        ],
    ),
    (
        "eggs",
        &[
            "shell", "yolk", "white", "chick", "nest", "hen", "omelette", "omelet", "boiled",
            "scrambled", "frying", "poached", "protein", "breakfast", "farm", "carton", "easter",
            "crack", "sunny-side", "incubate", "feather", "brood", "chicken", "albumen", "dozen",
            "laying", "hatch", "bird", "rooster", "coop",
        ],
    ),
];

fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn similar(item: &str, topic_word: &str) -> bool {
    item.split_whitespace().any(|item_word| {
        topic_word.split_whitespace().any(|word| {
            item_word.len().abs_diff(word.len()) <= 2 && overlaps(item_word, word)
        })
    })
}

fn mapped_relevance(item: &str, topic: &str) -> bool {
    TOPIC_MAPPINGS
        .iter()
        .find(|(key, _)| topic.contains(key))
        .map_or(false, |(_, relevant)| {
            relevant.iter().any(|entry| overlaps(item, entry))
        })
}

/// Splits `items` into those related to `topic` and the rest, preserving order.
pub(crate) fn classify_items(topic: &str, items: &[String]) -> (Vec<String>, Vec<String>) {
    let topic = topic.to_lowercase();
    let topic_words: Vec<&str> = topic.split_whitespace().collect();
    let mut correct = Vec::new();
    let mut incorrect = Vec::new();

    for item in items {
        let lowered = item.to_lowercase();
        let universal = UNIVERSAL_DISTRACTORS
            .iter()
            .any(|distractor| overlaps(&lowered, distractor));
        let related = !universal
            && (topic_words
                .iter()
                .any(|word| overlaps(&lowered, word) || similar(&lowered, word))
                || mapped_relevance(&lowered, &topic));
        if related {
            correct.push(item.clone());
        } else {
            incorrect.push(item.clone());
        }
    }

    log::debug!(
        "classified {} items for {topic:?}: {} correct, {} incorrect",
        items.len(),
        correct.len(),
        incorrect.len()
    );
    (correct, incorrect)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn universal_distractors_are_always_incorrect() {
        let (correct, incorrect) = classify_items("Pizza party", &strings(&["Pizza", "Party hat"]));
        assert_eq!(correct, strings(&["Party hat"]));
        assert_eq!(incorrect, strings(&["Pizza"]));
    }

    #[test]
    fn topic_mappings_recognise_related_terms() {
        let items = strings(&["Battery", "Circuit board", "Unicorn", "Sandwich"]);
        let (correct, incorrect) = classify_items("Electricity", &items);
        assert_eq!(correct, strings(&["Battery", "Circuit board"]));
        assert_eq!(incorrect, strings(&["Unicorn", "Sandwich"]));
    }

    #[test]
    fn similar_words_count_as_related() {
        let (correct, _) = classify_items("dinosaurs", &strings(&["Dinosaur fossil"]));
        assert_eq!(correct.len(), 1);
    }
}
