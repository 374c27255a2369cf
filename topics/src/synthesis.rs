//! Offline content synthesis for arbitrary topics.
//!
//! Well-known subjects get hand-written item pools; anything else is built from
//! variations of the topic text itself. The output always separates correct
//! from incorrect items so the game can proceed without a content service.

use munch_content::{GeneratedBy, TopicContent};
use munch_core::Level;

use crate::normalize_typos;

const MAX_CORRECT: usize = 15;
const MAX_INCORRECT: usize = 20;
const MAX_ITEMS: usize = 30;
const MAX_CATEGORIES: usize = 8;
const MAX_FACTS: usize = 15;

const UNIVERSAL_DISTRACTORS: &[&str] = &[
    "Pizza", "Rainbow", "Guitar", "Elephant", "Castle", "Robot", "Moon", "Football", "Ice cream",
    "Dragon", "Butterfly", "Superhero", "Unicorn", "Basketball", "Computer",
];

struct Pool {
    keys: &'static [&'static str],
    items: &'static [&'static str],
    categories: &'static [&'static str],
    facts: &'static [&'static str],
}

const EGYPT: Pool = Pool {
    keys: &["egypt", "pyramid", "pharaoh"],
    items: &[
        "Pyramids", "Sphinx", "Pharaoh", "Mummy", "Hieroglyphics", "Nile River", "Tutankhamun",
        "Cleopatra", "Ramses II", "Cairo", "Memphis", "Thebes", "Valley of Kings",
        "Rosetta Stone", "Papyrus", "Sarcophagus", "Canopic jars", "Ankh", "Scarab", "Obelisk",
        "Temple", "Anubis", "Ra", "Isis", "Osiris", "Horus", "Ancient Kingdom", "Middle Kingdom",
        "New Kingdom",
    ],
    categories: &["Monuments", "Pharaohs", "Gods", "Artifacts", "Cities", "Dynasties"],
    facts: &[
        "Pyramids built 4500 years ago", "Nile floods annually", "Hieroglyphs are pictures",
        "Mummies preserved bodies", "Pharaohs were god-kings", "Sphinx guards pyramids",
    ],
};

const SPACE: Pool = Pool {
    keys: &["space", "astro", "planet"],
    items: &[
        "Mars", "Venus", "Jupiter", "Saturn", "Mercury", "Neptune", "Uranus", "Earth", "Moon",
        "Sun", "Asteroid", "Comet", "Galaxy", "Star", "Nebula", "Black hole", "Satellite", "Orbit",
        "Gravity", "Rocket", "Astronaut", "Space station", "Telescope", "Constellation", "Meteor",
        "Eclipse", "Cosmos", "Universe",
    ],
    categories: &["Planets", "Stars", "Galaxies", "Space Objects", "Space Tech"],
    facts: &[
        "Mars is red", "Saturn has rings", "Sun is a star", "Moon orbits Earth", "Space is vast",
        "Stars are hot",
    ],
};

const DINOSAUR: Pool = Pool {
    keys: &["dinosaur", "dino", "prehistoric"],
    items: &[
        "T-Rex", "Triceratops", "Stegosaurus", "Brachiosaurus", "Velociraptor", "Pterodactyl",
        "Ankylosaurus", "Diplodocus", "Allosaurus", "Spinosaurus", "Pachycephalosaurus",
        "Parasaurolophus", "Iguanodon", "Archaeopteryx", "Compsognathus", "Deinonychus",
        "Baryonyx", "Carnotaurus", "Giganotosaurus", "Therizinosaurus", "Mosasaurus",
        "Plesiosaur", "Utahraptor", "Ceratosaurus", "Kentrosaurus", "Styracosaurus",
        "Edmontosaurus", "Maiasaura", "Oviraptor", "Gallimimus", "Amargasaurus", "Irritator",
        "Acrocanthosaurus", "Carcharodontosaurus", "Mapusaurus", "Rugops",
    ],
    categories: &[
        "Carnivores", "Herbivores", "Flying Reptiles", "Marine Reptiles", "Time Periods",
        "Fossils",
    ],
    facts: &[
        "T-Rex tiny arms", "Ruled 165M yrs", "Birds from dinos", "Asteroid end",
        "Raptors=feathers", "Stego plates", "3 horns=Trike", "40ft tall", "Terrible lizard",
        "Found 1824", "Some warm blood", "4 inch smallest",
    ],
};

const ANIMAL: Pool = Pool {
    keys: &["animal", "zoo", "wildlife"],
    items: &[
        "Lion", "Tiger", "Bear", "Elephant", "Giraffe", "Zebra", "Monkey", "Penguin", "Dolphin",
        "Whale", "Shark", "Eagle", "Parrot", "Snake", "Crocodile", "Kangaroo", "Koala", "Panda",
        "Wolf", "Fox", "Deer", "Rabbit", "Squirrel", "Owl",
    ],
    categories: &["Mammals", "Birds", "Reptiles", "Fish", "Predators"],
    facts: &[
        "Lions roar", "Birds fly", "Fish swim", "Snakes slither", "Dolphins jump",
        "Owls are nocturnal",
    ],
};

const JAZZ: Pool = Pool {
    keys: &["jazz"],
    items: &[
        "Louis Armstrong", "Duke Ellington", "Miles Davis", "John Coltrane", "Charlie Parker",
        "Dizzy Gillespie", "Billie Holiday", "Ella Fitzgerald", "Count Basie", "Thelonious Monk",
        "Saxophone", "Trumpet", "Piano", "Double bass", "Drums", "Clarinet", "Bebop", "Swing",
        "Cool jazz", "Free jazz", "Fusion", "Blues", "Improvisation", "Syncopation", "Blue notes",
        "Scat singing", "Jazz club", "Jam session",
    ],
    categories: &["Jazz Musicians", "Instruments", "Jazz Styles", "Techniques", "Venues"],
    facts: &[
        "Jazz originated in New Orleans", "Bebop emerged in 1940s", "Blue notes define jazz",
        "Improvisation is key", "Swing era was 1930s-40s", "Jazz influenced rock",
    ],
};

const MUSIC: Pool = Pool {
    keys: &["music", "rock", "classical"],
    items: &[
        "Guitar", "Piano", "Drums", "Bass", "Violin", "Flute", "Trumpet", "Saxophone", "Melody",
        "Harmony", "Rhythm", "Tempo", "Beat", "Chord", "Scale", "Note", "Concert", "Album", "Song",
        "Band", "Orchestra", "Solo", "Duet", "Ensemble",
    ],
    categories: &["Instruments", "Music Theory", "Performances", "Ensembles", "Elements"],
    facts: &[
        "Music is universal", "Rhythm drives music", "Harmony creates depth",
        "Melody tells story", "Tempo sets pace", "Dynamics add emotion",
    ],
};

const HISTORY: Pool = Pool {
    keys: &["history", "ancient", "war"],
    items: &[
        "Ancient Egypt", "Roman Empire", "Greek City-States", "Medieval Period", "Renaissance",
        "Industrial Revolution", "World War I", "World War II", "Cold War", "Space Race",
        "Napoleon", "Caesar", "Cleopatra", "Alexander", "Churchill", "Lincoln", "Democracy",
        "Monarchy", "Republic", "Empire", "Revolution", "Treaty",
    ],
    categories: &["Time Periods", "Leaders", "Civilizations", "Events", "Governments"],
    facts: &[
        "Rome fell in 476 AD", "WWI ended in 1918", "Moon landing 1969", "Berlin Wall fell 1989",
        "Renaissance began 1300s", "USA founded 1776",
    ],
};

const SCIENCE: Pool = Pool {
    keys: &["science", "physics", "chemistry", "biology"],
    items: &[
        "Atom", "Molecule", "Cell", "DNA", "Evolution", "Gravity", "Energy", "Matter", "Force",
        "Motion", "Light", "Heat", "Electricity", "Magnetism", "Chemical", "Reaction", "Einstein",
        "Newton", "Darwin", "Curie", "Galileo", "Hawking", "Theory", "Hypothesis", "Experiment",
        "Observation", "Data", "Conclusion",
    ],
    categories: &["Concepts", "Scientists", "Methods", "Forces", "Particles"],
    facts: &[
        "E=mc²", "Gravity is universal", "Cells are life units", "DNA stores information",
        "Energy is conserved", "Light has dual nature",
    ],
};

const SURFING: Pool = Pool {
    keys: &["surf", "wave", "ocean"],
    items: &[
        "Ocean", "Wave", "Board", "Wetsuit", "Beach", "Surf", "Tide", "Sand", "Paddle", "Ride",
        "Barrel", "Tube", "Break", "Curl", "Foam", "Swell", "Longboard", "Shortboard", "Fin",
        "Leash", "Wax", "Reef", "Shore", "Lineup", "Set", "Duck dive", "Pop up", "Carve",
        "Cutback", "Floater", "Mountain", "Snow", "Skiing", "Basketball", "Piano", "Cooking",
        "Desert", "Space", "Robot", "Books", "Car", "Television", "Computer", "Phone",
    ],
    categories: &["Equipment", "Techniques", "Waves", "Locations", "Conditions"],
    facts: &[
        "Waves carry energy", "Tides change daily", "Wax grips board", "Fins steer board",
        "Leash saves board", "Reefs shape waves",
    ],
};

/// Checked in order; the jazz pool shadows the general music pool.
const POOLS: [&Pool; 9] = [
    &EGYPT, &SPACE, &DINOSAUR, &ANIMAL, &JAZZ, &MUSIC, &HISTORY, &SCIENCE, &SURFING,
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn topic_variations(topic: &str, words: &[&str]) -> Vec<String> {
    let mut variations = vec![topic.to_owned()];
    match topic.strip_suffix('s') {
        Some(singular) => variations.push(singular.to_owned()),
        None => variations.push(format!("{topic}s")),
    }
    for word in words.iter().filter(|word| word.len() > 2) {
        variations.push((*word).to_owned());
        variations.push(capitalize(word));
    }
    for prefix in ["Super", "Mini", "Mega", "Ultra", "Pro", "Basic", "Modern"] {
        variations.push(format!("{prefix} {topic}"));
    }
    for suffix in ["Style", "Type", "Kind", "Form", "Method", "Way"] {
        variations.push(format!("{topic} {suffix}"));
    }
    variations.truncate(15);
    variations
}

fn contextual_items(topic: &str) -> Vec<String> {
    let before = |labels: &[&str]| -> Vec<String> {
        labels.iter().map(|label| format!("{label} {topic}")).collect()
    };
    let mut items = before(&["Beginner", "Intermediate", "Advanced", "Expert", "Master"]);
    items.extend(
        ["Study", "Research", "Analysis", "Theory", "Practice", "Example"]
            .iter()
            .map(|term| format!("{topic} {term}")),
    );
    items.extend(before(&["Classic", "Modern", "Ancient", "Future", "Current", "Traditional"]));
    items.extend(before(&["Best", "Top", "Great", "Famous", "Popular", "Important"]));
    items.truncate(20);
    items
}

fn academic_items(topic: &str) -> Vec<String> {
    const TERMS: [&str; 18] = [
        "Facts", "Information", "Knowledge", "Data", "Evidence", "Examples", "Principles",
        "Concepts", "Ideas", "Methods", "Techniques", "Approaches", "History", "Origin",
        "Development", "Evolution", "Progress", "Future",
    ];
    const SUBJECTS: [&str; 10] = [
        "Science", "Art", "Culture", "Society", "Technology", "Nature", "Education", "Research",
        "Innovation", "Discovery",
    ];
    let mut items: Vec<String> = TERMS.iter().map(|term| format!("{topic} {term}")).collect();
    items.extend(SUBJECTS.iter().map(|subject| format!("{topic} in {subject}")));
    items.truncate(15);
    items
}

fn universal_content(topic: &str) -> (Vec<String>, Vec<String>, Vec<String>) {
    let clean = topic.trim().to_lowercase();
    let words: Vec<&str> = clean.split_whitespace().collect();

    let mut items = topic_variations(&clean, &words);
    items.extend(contextual_items(&clean));
    items.extend(academic_items(&clean));
    items.truncate(MAX_ITEMS);

    let categories = owned(&[
        "Types", "Examples", "Basics", "Advanced", "Modern", "Traditional", "Popular",
        "Historical",
    ]);
    let facts = vec![
        format!("{topic} is educational"),
        format!("Study {topic}"),
        format!("Learn {topic}"),
        format!("{topic} knowledge"),
        format!("{topic} facts"),
        format!("{topic} examples"),
    ];
    (items, categories, facts)
}

/// Builds content for `topic` without any external service.
///
/// The first half of the items, plus any later item containing a topic word,
/// are marked correct (at most 15). The remaining items are incorrect and are
/// padded to 20 with universal distractors.
#[must_use]
pub fn synthesize_content(topic: &str, level: Level) -> TopicContent {
    let lowered = topic.to_lowercase();
    let normalized = normalize_typos(&lowered);

    let (mut items, categories, mut facts) = match POOLS
        .iter()
        .find(|pool| pool.keys.iter().any(|key| normalized.contains(key)))
    {
        Some(pool) => {
            log::debug!("synthesizing {topic:?} from the {:?} pool", pool.keys[0]);
            (owned(pool.items), owned(pool.categories), owned(pool.facts))
        }
        None => {
            log::debug!("synthesizing {topic:?} from topic variations");
            universal_content(topic)
        }
    };

    if level.get() > 10 && items.len() < MAX_ITEMS {
        items.extend([
            format!("Advanced {topic}"),
            format!("Complex {topic}"),
            format!("Expert {topic}"),
        ]);
        facts.push(format!("Expert {topic} fact"));
    }

    let topic_words: Vec<&str> = lowered
        .split(' ')
        .filter(|word| word.chars().count() > 2)
        .collect();
    let correct: Vec<String> = items
        .iter()
        .enumerate()
        .filter(|(index, item)| {
            2 * index < items.len() || {
                let item = item.to_lowercase();
                topic_words.iter().any(|word| item.contains(word))
            }
        })
        .map(|(_, item)| item.clone())
        .take(MAX_CORRECT)
        .collect();

    let mut incorrect: Vec<String> = items
        .iter()
        .filter(|item| !correct.contains(item))
        .take(MAX_CORRECT)
        .cloned()
        .collect();
    let padding = MAX_INCORRECT.saturating_sub(incorrect.len());
    let fillers: Vec<String> = UNIVERSAL_DISTRACTORS
        .iter()
        .map(|entry| (*entry).to_owned())
        .filter(|entry| !correct.contains(entry) && !incorrect.contains(entry))
        .take(padding)
        .collect();
    incorrect.extend(fillers);

    TopicContent {
        items: correct
            .iter()
            .chain(incorrect.iter())
            .take(MAX_ITEMS)
            .cloned()
            .collect(),
        categories: categories.into_iter().take(MAX_CATEGORIES).collect(),
        facts: facts.into_iter().take(MAX_FACTS).collect(),
        correct_items: Some(correct),
        incorrect_items: Some(incorrect.into_iter().take(MAX_INCORRECT).collect()),
        generated_by: Some(GeneratedBy::Mock),
    }
}
