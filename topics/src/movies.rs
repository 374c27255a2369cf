//! Movie trivia.

use munch_core::{Category, Challenge, Grid, GridSize, Level, TopicError, TopicProvider};
use rand_chacha::ChaCha8Rng;

use crate::{
    family::{self, Family, RANDOM},
    fill,
};

const MAX_CORRECT: usize = 8;

const ACTORS: &[&str] = &[
    "Tom Hanks", "Meryl Streep", "Leonardo DiCaprio", "Jennifer Lawrence", "Brad Pitt",
    "Angelina Jolie", "Will Smith", "Sandra Bullock", "Robert Downey Jr", "Scarlett Johansson",
    "Chris Evans", "Emma Stone", "Ryan Gosling", "Natalie Portman", "Matt Damon", "Julia Roberts",
    "Morgan Freeman", "Denzel Washington", "Hugh Jackman", "Anne Hathaway", "Christian Bale",
    "Amy Adams", "Ryan Reynolds", "Emma Watson", "Tom Cruise", "Nicole Kidman", "Johnny Depp",
    "Charlize Theron",
];
const DIRECTORS: &[&str] = &[
    "Steven Spielberg", "Martin Scorsese", "Christopher Nolan", "Quentin Tarantino",
    "Alfred Hitchcock", "Stanley Kubrick", "James Cameron", "Ridley Scott", "Tim Burton",
    "David Fincher", "Coen Brothers", "Peter Jackson", "Guillermo del Toro", "Denis Villeneuve",
    "Jordan Peele", "Greta Gerwig", "Rian Johnson", "Edgar Wright", "Wes Anderson", "Spike Lee",
];
const GENRES: &[&str] = &[
    "Action", "Comedy", "Drama", "Horror", "Romance", "Sci-Fi", "Fantasy", "Thriller", "Mystery",
    "Adventure", "Animation", "Documentary", "Musical", "Western", "Crime", "Biography",
];
const DECADES: &[&str] = &[
    "1970s Movies", "1980s Movies", "1990s Movies", "2000s Movies", "2010s Movies",
    "2020s Movies", "Classic Films", "Modern Cinema",
];
const FRANCHISES: &[&str] = &[
    "Marvel Cinematic Universe", "Star Wars", "Harry Potter", "Fast & Furious",
    "Mission Impossible", "James Bond", "Jurassic Park", "Terminator", "Star Trek",
    "Lord of the Rings", "Pirates of Caribbean", "X-Men", "Transformers", "Indiana Jones",
    "Batman Movies", "Spider-Man",
];
const AWARDS: &[&str] = &[
    "Oscar Winner", "Golden Globe Winner", "Cannes Winner", "BAFTA Winner", "Critics Choice",
    "Screen Actors Guild", "Directors Guild", "Sundance Winner",
];

#[derive(Clone, Copy, Debug)]
struct Shelf {
    description: &'static str,
    titles: &'static [&'static str],
}

const FAMILIES: &[Family<Shelf>] = &[
    Family {
        id: "actors",
        name: "Famous Actors",
        rules: &[Shelf {
            description: "Find all the FAMOUS ACTORS",
            titles: ACTORS,
        }],
    },
    Family {
        id: "directors",
        name: "Directors",
        rules: &[Shelf {
            description: "Find all the MOVIE DIRECTORS",
            titles: DIRECTORS,
        }],
    },
    Family {
        id: "genres",
        name: "Movie Genres",
        rules: &[Shelf {
            description: "Find all the MOVIE GENRES",
            titles: GENRES,
        }],
    },
    Family {
        id: "decades",
        name: "Movie Decades",
        rules: &[Shelf {
            description: "Find all the MOVIE TIME PERIODS",
            titles: DECADES,
        }],
    },
    Family {
        id: "franchises",
        name: "Movie Franchises",
        rules: &[Shelf {
            description: "Find all the MOVIE FRANCHISES",
            titles: FRANCHISES,
        }],
    },
    Family {
        id: "awards",
        name: "Award Winners",
        rules: &[Shelf {
            description: "Find all the AWARD CATEGORIES",
            titles: AWARDS,
        }],
    },
];

fn universe() -> Vec<&'static str> {
    [ACTORS, DIRECTORS, GENRES, DECADES, FRANCHISES, AWARDS].concat()
}

/// Provider generating movie trivia challenges.
#[derive(Debug)]
pub struct MovieTopic {
    rng: ChaCha8Rng,
    category: &'static str,
}

impl MovieTopic {
    /// Creates the provider with the supplied random source.
    #[must_use]
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            category: RANDOM,
        }
    }
}

impl TopicProvider for MovieTopic {
    fn name(&self) -> String {
        "Movie Trivia".to_owned()
    }

    fn categories(&self) -> Vec<Category> {
        family::categories(FAMILIES)
    }

    fn set_category(&mut self, category: &str) {
        self.category = family::resolve(FAMILIES, category, RANDOM);
    }

    fn generate_challenge(&mut self, _level: Level) -> Result<Challenge, TopicError> {
        let shelf = *family::pick(FAMILIES, self.category, &mut self.rng)
            .ok_or_else(|| TopicError::GenerationFailed("no movie shelves".to_owned()))?;
        Ok(Challenge::new(shelf.description, move |value| {
            shelf.titles.iter().any(|title| *title == value)
        }))
    }

    fn generate_grid(&mut self, size: GridSize, challenge: &Challenge) -> Result<Grid, TopicError> {
        let universe = universe();
        Ok(fill::fill_from_pools(
            size,
            challenge,
            &universe,
            &universe,
            MAX_CORRECT.min(size.cell_count()),
            &mut self.rng,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn grids_hold_at_most_eight_correct_titles() {
        let mut topic = MovieTopic::new(ChaCha8Rng::seed_from_u64(12));
        for _ in 0..12 {
            let challenge = topic
                .generate_challenge(Level::FIRST)
                .expect("movie challenges never fail");
            let grid = topic
                .generate_grid(GridSize::DESKTOP, &challenge)
                .expect("movie grids never fail");
            assert_eq!(grid.filled_count(), 48);
            assert_eq!(grid.correct_total(), 8, "{}", challenge.description());
        }
    }

    #[test]
    fn unknown_category_draws_from_every_shelf() {
        let mut topic = MovieTopic::new(ChaCha8Rng::seed_from_u64(3));
        topic.set_category("cartoons");
        let descriptions: std::collections::HashSet<String> = (0..60)
            .map(|_| {
                topic
                    .generate_challenge(Level::FIRST)
                    .expect("movie challenges never fail")
                    .description()
                    .to_owned()
            })
            .collect();
        assert!(descriptions.len() > 1);
    }
}
