//! Marvel universe trivia.

use munch_core::{Category, Challenge, Grid, GridSize, Level, TopicError, TopicProvider};
use rand_chacha::ChaCha8Rng;

use crate::{
    family::{self, Family, RANDOM},
    fill,
};

const HEROES: &[&str] = &[
    "Spider-Man", "Iron Man", "Captain America", "Thor", "Hulk", "Black Widow", "Hawkeye",
    "Ant-Man", "Wasp", "Doctor Strange", "Wolverine", "Storm", "Cyclops", "Jean Grey", "Beast",
    "Rogue", "Gambit", "Nightcrawler", "Daredevil", "Punisher", "Luke Cage", "Jessica Jones",
    "Iron Fist", "Captain Marvel", "Ms. Marvel", "Falcon", "Winter Soldier", "War Machine",
    "Vision", "Scarlet Witch", "Quicksilver", "Black Panther", "Star-Lord", "Gamora", "Rocket",
    "Groot", "Drax", "Mantis", "Nebula",
];
const VILLAINS: &[&str] = &[
    "Thanos", "Loki", "Green Goblin", "Doctor Doom", "Red Skull", "Ultron", "Magneto",
    "Mystique", "Sabretooth", "Apocalypse", "Kingpin", "Bullseye", "Wilson Fisk", "Venom",
    "Carnage", "Doctor Octopus", "Sandman", "Electro", "Rhino", "Lizard", "Galactus",
    "Silver Surfer", "Ronan", "Ego", "Hela", "Vulture", "Mysterio", "Kraven", "Shocker",
    "Scorpion",
];
const TEAMS: &[&str] = &[
    "Avengers", "X-Men", "Fantastic Four", "Guardians", "Defenders", "S.H.I.E.L.D.", "Hydra",
    "Inhumans", "Eternals", "Young Avengers", "X-Force", "New Mutants", "Alpha Flight",
    "Champions", "Thunderbolts",
];
const POWERS: &[&str] = &[
    "Flight", "Strength", "Speed", "Invisibility", "Telepathy", "Telekinesis", "Healing",
    "Claws", "Web-slinging", "Lightning", "Fire", "Ice", "Metal", "Energy", "Magic", "Time",
    "Reality", "Mind", "Soul", "Power", "Space", "Phasing", "Shapeshifting",
];
const LOCATIONS: &[&str] = &[
    "Asgard", "Wakanda", "Atlantis", "Latveria", "Genosha", "New York", "Xavier School",
    "Stark Tower", "Baxter Building", "Sanctum", "SHIELD Base", "Hydra Base", "Savage Land",
    "Moon", "Space", "Quantum Realm", "Dark Dimension", "Knowhere",
];

/// Challenge satisfied by exact membership in a fixed list.
#[derive(Clone, Copy, Debug)]
struct Roster {
    description: &'static str,
    members: &'static [&'static str],
}

const fn roster(description: &'static str, members: &'static [&'static str]) -> Roster {
    Roster {
        description,
        members,
    }
}

const FAMILIES: &[Family<Roster>] = &[
    Family {
        id: "heroes",
        name: "Superheroes",
        rules: &[
            roster("Munch SUPERHEROES", HEROES),
            roster(
                "Munch X-Men heroes",
                &[
                    "Wolverine", "Storm", "Cyclops", "Jean Grey", "Beast", "Rogue", "Gambit",
                    "Nightcrawler",
                ],
            ),
            roster(
                "Munch Avengers heroes",
                &[
                    "Iron Man", "Captain America", "Thor", "Hulk", "Black Widow", "Hawkeye",
                    "Captain Marvel", "Falcon",
                ],
            ),
        ],
    },
    Family {
        id: "villains",
        name: "Villains",
        rules: &[
            roster("Munch VILLAINS", VILLAINS),
            roster(
                "Munch cosmic villains",
                &["Thanos", "Galactus", "Silver Surfer", "Ronan", "Ego", "Hela"],
            ),
            roster(
                "Munch Spider-Man villains",
                &[
                    "Green Goblin", "Doctor Octopus", "Venom", "Sandman", "Electro", "Rhino",
                    "Lizard", "Vulture", "Mysterio", "Kraven",
                ],
            ),
        ],
    },
    Family {
        id: "teams",
        name: "Teams",
        rules: &[
            roster("Munch TEAMS", TEAMS),
            roster(
                "Munch hero teams",
                &["Avengers", "X-Men", "Fantastic Four", "Guardians", "Defenders"],
            ),
        ],
    },
    Family {
        id: "powers",
        name: "Superpowers",
        rules: &[
            roster("Munch SUPERPOWERS", POWERS),
            roster(
                "Munch elemental powers",
                &["Fire", "Ice", "Lightning", "Energy", "Metal"],
            ),
            roster(
                "Munch physical powers",
                &["Flight", "Strength", "Speed", "Invisibility", "Healing", "Claws"],
            ),
        ],
    },
    Family {
        id: "locations",
        name: "Locations",
        rules: &[
            roster("Munch LOCATIONS", LOCATIONS),
            roster(
                "Munch cosmic locations",
                &["Asgard", "Moon", "Space", "Quantum Realm", "Dark Dimension", "Knowhere"],
            ),
            roster(
                "Munch Earth locations",
                &["Wakanda", "Atlantis", "Latveria", "New York", "Xavier School", "Stark Tower"],
            ),
        ],
    },
];

fn universe() -> Vec<&'static str> {
    [HEROES, VILLAINS, TEAMS, POWERS, LOCATIONS].concat()
}

/// Provider generating Marvel trivia challenges.
#[derive(Debug)]
pub struct MarvelTopic {
    rng: ChaCha8Rng,
    category: &'static str,
}

impl MarvelTopic {
    /// Creates the provider with the supplied random source.
    #[must_use]
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            category: RANDOM,
        }
    }
}

impl TopicProvider for MarvelTopic {
    fn name(&self) -> String {
        "Marvel Universe".to_owned()
    }

    fn categories(&self) -> Vec<Category> {
        family::categories(FAMILIES)
    }

    fn set_category(&mut self, category: &str) {
        self.category = family::resolve(FAMILIES, category, "heroes");
    }

    fn generate_challenge(&mut self, _level: Level) -> Result<Challenge, TopicError> {
        let Roster {
            description,
            members,
        } = *family::pick(FAMILIES, self.category, &mut self.rng)
            .ok_or_else(|| TopicError::GenerationFailed("no marvel rosters".to_owned()))?;
        Ok(Challenge::new(description, move |value| {
            members.iter().any(|member| *member == value)
        }))
    }

    fn generate_grid(&mut self, size: GridSize, challenge: &Challenge) -> Result<Grid, TopicError> {
        let universe = universe();
        Ok(fill::fill_from_pools(
            size,
            challenge,
            &universe,
            &universe,
            fill::correct_target(size.cell_count()),
            &mut self.rng,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn matching_is_exact() {
        let mut topic = MarvelTopic::new(ChaCha8Rng::seed_from_u64(1));
        topic.set_category("teams");
        let challenge = topic
            .generate_challenge(Level::FIRST)
            .expect("marvel challenges never fail");
        assert!(challenge.check_answer("Avengers"));
        assert!(!challenge.check_answer("avengers"));
        assert!(!challenge.check_answer("Thanos"));
    }

    #[test]
    fn small_rosters_still_fill_the_grid() {
        let mut topic = MarvelTopic::new(ChaCha8Rng::seed_from_u64(6));
        topic.set_category("powers");
        for _ in 0..8 {
            let challenge = topic
                .generate_challenge(Level::FIRST)
                .expect("marvel challenges never fail");
            let grid = topic
                .generate_grid(GridSize::DESKTOP, &challenge)
                .expect("marvel grids never fail");
            assert_eq!(grid.filled_count(), 48);
            let expected = if challenge.description() == "Munch SUPERPOWERS" {
                14
            } else {
                5
            };
            assert!(grid.correct_total() >= expected, "{}", challenge.description());
        }
    }

    #[test]
    fn unknown_category_uses_heroes() {
        let mut topic = MarvelTopic::new(ChaCha8Rng::seed_from_u64(2));
        topic.set_category("cosmic");
        let challenge = topic
            .generate_challenge(Level::FIRST)
            .expect("marvel challenges never fail");
        let description = challenge.description();
        assert!(description.contains("heroes") || description == "Munch SUPERHEROES");
    }
}
