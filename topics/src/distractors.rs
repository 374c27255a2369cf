//! Topic-flavoured wrong answers used to pad custom challenges and grids.

use rand::{seq::SliceRandom, Rng};

use crate::normalize_typos;

const SMART_EGYPT: &[&str] = &[
    "Aztec pyramid", "Mayan temple", "Roman forum", "Greek agora", "Viking longship",
    "Samurai armor", "Medieval castle", "Renaissance art", "Merlin", "King Arthur", "Robin Hood",
    "Hercules", "Perseus", "Achilles", "Excalibur", "Holy Grail", "Pandora box", "Trojan horse",
];
const SMART_SPACE: &[&str] = &[
    "Flat Earth", "Geocentric model", "Aether", "Phlogiston", "Crystal spheres", "Firmament",
    "Turtles all the way", "Sky dome", "Cheese moon", "Canals on Mars", "Planet X", "Nibiru",
    "Hollow Earth", "Space whales", "Star gates", "Sky cities",
];
const SMART_DINOSAUR: &[&str] = &[
    "Dragon", "Godzilla", "Barney", "Yoshi", "Dino Flintstone", "Land Before Time",
    "Jurassic Park", "King Kong", "Mothra", "Rodan", "Mechagodzilla", "Kaiju", "Pokemon",
    "Charizard", "Aerodactyl", "Time machine", "Cave painting", "Stone age", "Ice age",
    "Woolly rhino", "Giant sloth", "Terror bird", "Megashark", "Titanboa", "Mammoth",
    "Saber-tooth", "Caveman", "Neanderthal", "Fossil fuel", "Coal", "Oil", "Gas", "Amber",
    "Tar pit", "Meteor", "Asteroid", "Comet", "Volcano", "Earthquake", "Tsunami", "Glacier",
    "Pangaea", "Gondwana", "Laurasia",
];
const SMART_ANIMAL: &[&str] = &[
    "Dragon", "Unicorn", "Phoenix", "Griffin", "Pegasus", "Chimera", "Minotaur", "Centaur",
    "Kraken", "Yeti", "Bigfoot", "Loch Ness", "Chupacabra", "Jackalope", "Drop bear", "Snipe",
    "Dodo clone", "Megalodon",
];
const SMART_MUSIC: &[&str] = &[
    "Kazoo", "Vuvuzela", "Spoons", "Washboard", "Jug", "Cowbell", "Whistle", "Noise", "Static",
    "Silence", "Mumbling", "Screaming", "Shouting", "Crying", "Beeping", "Buzzing", "Humming",
    "Clicking", "Tapping", "Scratching", "Popping", "Disco", "Polka", "Yodeling", "Rap", "Opera",
    "Punk", "Metal", "Techno",
];
const SMART_GENERIC: &[&str] = &[
    "Unknown item", "Mystery object", "Classified info", "Redacted data", "Missing file",
    "Corrupted entry", "Access denied", "Restricted access", "Coming soon", "Under review",
    "Beta version", "Prototype item", "Placeholder", "Template", "Example", "Sample data",
];
const CONTEXTUAL: &[&str] = &[
    "Unknown item", "Mystery object", "Classified info", "Redacted", "Error 404", "Missing data",
    "Corrupted file", "Access denied", "Top secret", "Restricted", "Confidential", "Eyes only",
    "Coming soon", "Under construction", "Beta version", "Prototype",
];

const EXTRA_EGYPT: &[&str] = &[
    "Babylon", "Mesopotamia", "Atlantis", "Troy", "Pompeii", "Machu Picchu", "Zeus", "Odin",
    "Thor", "Apollo", "Athena", "Jupiter", "Colosseum", "Parthenon", "Great Wall", "Taj Mahal",
    "Eiffel Tower", "Vikings", "Samurai", "Knights", "Spartans", "Romans", "Greeks",
    "Stonehenge", "Easter Island", "Petra", "Angkor Wat", "Chichen Itza",
];
const EXTRA_SPACE: &[&str] = &[
    "Quasar", "Pulsar", "Supernova", "Red giant", "White dwarf", "Neutron star", "Solar wind",
    "Aurora", "Cosmic rays", "Dark energy", "Exoplanet", "Binary star", "Spiral galaxy",
    "Elliptical galaxy", "Space debris", "Lunar eclipse", "Solar flare", "Asteroid belt",
    "Kuiper belt", "Oort cloud", "Space probe", "Ion drive", "Warp drive", "Light year",
    "Parsec", "Red shift", "Blue shift", "Big Bang",
];
const EXTRA_ANIMAL: &[&str] = &[
    "Cheetah", "Leopard", "Jaguar", "Cougar", "Lynx", "Bobcat", "Gazelle", "Antelope",
    "Wildebeest", "Hyena", "Jackal", "Coyote", "Otter", "Beaver", "Muskrat", "Badger",
    "Raccoon", "Opossum", "Platypus", "Echidna", "Wombat", "Tasmanian devil", "Dingo", "Lemur",
    "Gorilla", "Chimpanzee", "Orangutan", "Gibbon", "Baboon",
];
const EXTRA_DINOSAUR: &[&str] = &[
    "Brontosaurus", "Apatosaurus", "Gallimimus", "Protoceratops", "Styracosaurus",
    "Dilophosaurus", "Ceratosaurus", "Megalosaurus", "Oviraptor", "Ornithomimus",
    "Quetzalcoatlus", "Dimorphodon", "Rhamphorhynchus", "Ichthyosaurus", "Kronosaurus",
    "Dimetrodon", "Edaphosaurus", "Coelophysis", "Herrerasaurus", "Plateosaurus",
    "Mesozoic Era", "Pangaea", "Gondwana", "Laurasia", "Mass extinction", "Meteor impact",
    "Volcanic eruption", "Climate change", "Sea level rise", "Fossilization", "Paleontologist",
    "Excavation", "Carbon dating", "Sedimentary rock",
];
const EXTRA_MOVIE: &[&str] = &[
    "Action", "Drama", "Comedy", "Horror", "Thriller", "Romance", "Sci-Fi", "Fantasy",
    "Animation", "Documentary", "Musical", "Western", "Director", "Producer", "Actor", "Actress",
    "Screenplay", "Cinema", "Box office", "Premiere", "Sequel", "Prequel", "Remake",
    "Adaptation", "Oscar", "Emmy", "Golden Globe", "Cannes", "Sundance", "Festival",
];
const EXTRA_MUSIC: &[&str] = &[
    "Banjo", "Harp", "Organ", "Cello", "Oboe", "Tuba", "Xylophone", "Bassoon", "Clarinet",
    "Piccolo", "Viola", "Mandolin", "Accordion", "Bagpipes", "Ukulele", "Forte", "Adagio",
    "Staccato", "Legato", "Crescendo", "Diminuendo", "Allegro", "Sonata", "Waltz", "Polka",
    "Tango", "Samba", "Rumba", "Foxtrot", "Swing", "Opera", "Ballet", "Musical", "Recital",
    "Symphony", "Concerto", "Quartet",
];
const EXTRA_GENERIC: &[&str] = &[
    "Variant", "Type", "Model", "Version", "Style", "Form", "Method", "Approach", "Alternative",
    "Classic", "Modern", "Traditional", "Popular", "Rare", "Common", "Unique", "Basic",
    "Advanced", "Simple", "Complex", "Original", "Modified", "Enhanced", "Standard",
];

fn mentions(topic: &str, keys: &[&str]) -> bool {
    keys.iter().any(|key| topic.contains(key))
}

fn smart_pool(topic: &str) -> &'static [&'static str] {
    let normalized = normalize_typos(topic);
    if normalized.contains("egypt") {
        SMART_EGYPT
    } else if mentions(&normalized, &["space", "astro"]) {
        SMART_SPACE
    } else if mentions(&normalized, &["dinosaur", "dino"]) {
        SMART_DINOSAUR
    } else if normalized.contains("animal") {
        SMART_ANIMAL
    } else if mentions(&normalized, &["jazz", "music"]) {
        SMART_MUSIC
    } else {
        SMART_GENERIC
    }
}

fn push_unique(into: &mut Vec<String>, from: &[&str], count: usize) {
    for entry in from {
        if into.len() >= count {
            break;
        }
        if !into.iter().any(|existing| existing == entry) {
            into.push((*entry).to_owned());
        }
    }
}

/// Plausible but wrong answers for `topic`, at most `count` of them, without repeats.
pub(crate) fn smart_distractors(topic: &str, count: usize) -> Vec<String> {
    let mut distractors = Vec::with_capacity(count);
    push_unique(&mut distractors, smart_pool(topic), count);
    push_unique(&mut distractors, CONTEXTUAL, count);
    distractors
}

fn extra_pool(topic: &str) -> Vec<String> {
    let lowered = topic.to_lowercase();
    let normalized = normalize_typos(&lowered);
    let fixed: Option<&[&str]> = if normalized.contains("egypt") {
        Some(EXTRA_EGYPT)
    } else if mentions(&normalized, &["space", "astro"]) {
        Some(EXTRA_SPACE)
    } else if mentions(&lowered, &["animal", "zoo"]) {
        Some(EXTRA_ANIMAL)
    } else if mentions(&normalized, &["dinosaur", "dino", "prehistoric"]) {
        Some(EXTRA_DINOSAUR)
    } else if mentions(&lowered, &["movie", "film"]) {
        Some(EXTRA_MOVIE)
    } else if mentions(&lowered, &["jazz", "music"]) {
        Some(EXTRA_MUSIC)
    } else {
        None
    };

    match fixed {
        Some(pool) => pool.iter().map(|entry| (*entry).to_owned()).collect(),
        None => {
            let first = topic.split(' ').next().unwrap_or(topic);
            let suffixed = ["A", "B", "C", "1", "2", "3"]
                .iter()
                .map(|suffix| format!("{first}{suffix}"));
            EXTRA_GENERIC
                .iter()
                .map(|entry| (*entry).to_owned())
                .chain(suffixed)
                .collect()
        }
    }
}

/// Exactly `count` extra distractors for a custom grid.
///
/// Entries matching a correct answer (case-insensitively) are skipped. The
/// shuffled pool is used without repeats first and then cycled.
pub(crate) fn grid_distractors<R: Rng>(
    topic: &str,
    count: usize,
    correct: &[String],
    rng: &mut R,
) -> Vec<String> {
    let mut pool: Vec<String> = extra_pool(topic)
        .into_iter()
        .filter(|entry| {
            let lowered = entry.trim().to_lowercase();
            !correct
                .iter()
                .any(|answer| answer.trim().to_lowercase() == lowered)
        })
        .collect();
    if pool.is_empty() {
        return Vec::new();
    }
    pool.shuffle(rng);
    pool.iter().cycle().take(count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn smart_distractors_follow_topic_keywords() {
        let egypt = smart_distractors("Ancient egpyt", 3);
        assert_eq!(egypt, ["Aztec pyramid", "Mayan temple", "Roman forum"]);
        let generic = smart_distractors("knitting", 20);
        assert_eq!(generic.len(), 20);
        assert!(generic.contains(&"Error 404".to_owned()));
    }

    #[test]
    fn smart_distractors_never_repeat() {
        let many = smart_distractors("knitting", 500);
        let mut deduped = many.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), many.len());
    }

    #[test]
    fn grid_distractors_cycle_and_skip_correct_answers() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let correct = vec!["banjo".to_owned()];
        let extra = grid_distractors("Jazz", 80, &correct, &mut rng);
        assert_eq!(extra.len(), 80);
        assert!(extra.iter().all(|entry| entry != "Banjo"));
    }

    #[test]
    fn generic_pool_uses_first_topic_word() {
        let pool = extra_pool("Knitting patterns");
        assert!(pool.contains(&"KnittingA".to_owned()));
        assert!(pool.contains(&"Knitting3".to_owned()));
    }
}
