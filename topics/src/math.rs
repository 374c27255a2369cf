//! Arithmetic challenges over the numbers 1 to 100.

use std::collections::HashSet;

use munch_core::{Category, Challenge, Grid, GridSize, Level, TopicError, TopicProvider};
use rand::{seq::SliceRandom, Rng};
use rand_chacha::ChaCha8Rng;

use crate::{
    family::{self, Family, RANDOM},
    fill,
};

const PRIMES: [i64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];
const SAMPLE_ATTEMPTS: usize = 50;
const DISTRACTOR_ATTEMPTS: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MathRule {
    MultipleOf(i64),
    FactorOf(i64),
    Even,
    Odd,
    GreaterThan(i64),
    LessThan(i64),
    Prime,
    PerfectSquare,
}

const FAMILIES: &[Family<MathRule>] = &[
    Family {
        id: "multiples",
        name: "Multiples",
        rules: &[
            MathRule::MultipleOf(3),
            MathRule::MultipleOf(5),
            MathRule::MultipleOf(7),
        ],
    },
    Family {
        id: "factors",
        name: "Factors",
        rules: &[MathRule::FactorOf(24), MathRule::FactorOf(36)],
    },
    Family {
        id: "primes",
        name: "Prime Numbers",
        rules: &[MathRule::Prime],
    },
    Family {
        id: "squares",
        name: "Perfect Squares",
        rules: &[MathRule::PerfectSquare],
    },
    Family {
        id: "even_odd",
        name: "Even/Odd",
        rules: &[MathRule::Even, MathRule::Odd],
    },
    Family {
        id: "greater_less",
        name: "Greater/Less Than",
        rules: &[MathRule::GreaterThan(50), MathRule::LessThan(25)],
    },
];

impl MathRule {
    fn description(self) -> String {
        match self {
            Self::MultipleOf(k) => format!("Munch multiples of {k}"),
            Self::FactorOf(k) => format!("Munch factors of {k}"),
            Self::Even => "Munch even numbers".to_owned(),
            Self::Odd => "Munch odd numbers".to_owned(),
            Self::GreaterThan(k) => format!("Munch numbers > {k}"),
            Self::LessThan(k) => format!("Munch numbers < {k}"),
            Self::Prime => "Munch prime numbers".to_owned(),
            Self::PerfectSquare => "Munch perfect squares".to_owned(),
        }
    }

    fn accepts(self, n: i64) -> bool {
        match self {
            Self::MultipleOf(k) => n > 0 && n % k == 0,
            Self::FactorOf(k) => n > 0 && k % n == 0,
            Self::Even => n > 0 && n % 2 == 0,
            Self::Odd => n > 0 && n % 2 == 1,
            Self::GreaterThan(k) => n > k,
            Self::LessThan(k) => n > 0 && n < k,
            Self::Prime => is_prime(n),
            Self::PerfectSquare => is_perfect_square(n),
        }
    }

    fn matches(self, value: &str) -> bool {
        parse_leading_int(value).map_or(false, |n| self.accepts(n))
    }

    /// Draws a number guaranteed to satisfy the rule.
    fn sample<R: Rng>(self, rng: &mut R) -> i64 {
        match self {
            Self::MultipleOf(k) => k * rng.gen_range(1..=100 / k),
            Self::FactorOf(k) => {
                let divisors: Vec<i64> = (1..=k).filter(|d| k % d == 0).collect();
                divisors.choose(rng).copied().unwrap_or(1)
            }
            Self::Even => 2 * rng.gen_range(1..=50),
            Self::Odd => 2 * rng.gen_range(1..=50) - 1,
            Self::GreaterThan(k) => rng.gen_range(k + 1..=k.max(50) + 50),
            Self::LessThan(k) => rng.gen_range(1..k.max(2)),
            Self::Prime => PRIMES.choose(rng).copied().unwrap_or(2),
            Self::PerfectSquare => {
                let root = rng.gen_range(1..=10_i64);
                root * root
            }
        }
    }
}

/// Parses the leading integer of `value`: optional whitespace and sign, then digits.
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

fn is_perfect_square(n: i64) -> bool {
    if n < 1 {
        return false;
    }
    let mut root = 1;
    while root * root < n {
        root += 1;
    }
    root * root == n
}

/// Provider generating arithmetic challenges.
#[derive(Debug)]
pub struct MathTopic {
    rng: ChaCha8Rng,
    category: &'static str,
    current: Option<MathRule>,
}

impl MathTopic {
    /// Creates the provider with the supplied random source.
    #[must_use]
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            category: RANDOM,
            current: None,
        }
    }

    fn correct_number(&mut self, challenge: &Challenge) -> Option<i64> {
        match self.current {
            Some(rule) if rule.description() == challenge.description() => {
                Some(rule.sample(&mut self.rng))
            }
            _ => (0..SAMPLE_ATTEMPTS)
                .map(|_| self.rng.gen_range(1..=100_i64))
                .find(|n| challenge.check_answer(&n.to_string())),
        }
    }
}

impl TopicProvider for MathTopic {
    fn name(&self) -> String {
        "Mathematics".to_owned()
    }

    fn categories(&self) -> Vec<Category> {
        family::categories(FAMILIES)
    }

    fn set_category(&mut self, category: &str) {
        self.category = family::resolve(FAMILIES, category, "multiples");
    }

    fn generate_challenge(&mut self, _level: Level) -> Result<Challenge, TopicError> {
        let rule = *family::pick(FAMILIES, self.category, &mut self.rng)
            .ok_or_else(|| TopicError::GenerationFailed("no math rules available".to_owned()))?;
        self.current = Some(rule);
        Ok(Challenge::new(rule.description(), move |value| {
            rule.matches(value)
        }))
    }

    fn generate_grid(&mut self, size: GridSize, challenge: &Challenge) -> Result<Grid, TopicError> {
        let cells = size.cell_count();
        let mut values: Vec<String> = Vec::with_capacity(cells);

        for _ in 0..fill::correct_target(cells) {
            if let Some(n) = self.correct_number(challenge) {
                values.push(n.to_string());
            }
        }

        let mut used: HashSet<i64> = HashSet::new();
        for range in [1..=100_i64, 101..=200_i64] {
            let mut attempts = 0;
            while values.len() < cells && attempts < DISTRACTOR_ATTEMPTS {
                attempts += 1;
                let n = self.rng.gen_range(range.clone());
                if !used.contains(&n) && !challenge.check_answer(&n.to_string()) {
                    let _ = used.insert(n);
                    values.push(n.to_string());
                }
            }
        }

        fill::recycle_to(&mut values, cells, challenge);
        Ok(fill::place_shuffled(size, values, challenge, &mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn provider(seed: u64, category: &str) -> MathTopic {
        let mut topic = MathTopic::new(ChaCha8Rng::seed_from_u64(seed));
        topic.set_category(category);
        topic
    }

    #[test]
    fn leading_integer_semantics() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  12abc"), Some(12));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn rules_follow_their_descriptions() {
        assert!(MathRule::MultipleOf(3).matches("9"));
        assert!(!MathRule::MultipleOf(3).matches("7"));
        assert!(!MathRule::MultipleOf(3).matches("0"));
        assert!(MathRule::FactorOf(24).matches("8"));
        assert!(!MathRule::FactorOf(24).matches("5"));
        assert!(MathRule::Odd.matches("15"));
        assert!(!MathRule::Odd.matches("-3"));
        assert!(MathRule::LessThan(25).matches("24"));
        assert!(!MathRule::LessThan(25).matches("0"));
        assert!(MathRule::Prime.matches("97"));
        assert!(!MathRule::Prime.matches("1"));
        assert!(MathRule::PerfectSquare.matches("49"));
        assert!(!MathRule::PerfectSquare.matches("50"));
    }

    #[test]
    fn samples_always_satisfy_their_rule() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for family in FAMILIES {
            for rule in family.rules {
                for _ in 0..200 {
                    let n = rule.sample(&mut rng);
                    assert!(rule.accepts(n), "{rule:?} sampled {n}");
                }
            }
        }
    }

    #[test]
    fn unknown_category_falls_back_to_multiples() {
        let mut topic = provider(2, "fractions");
        for level in 1..10 {
            let challenge = topic
                .generate_challenge(Level::new(level))
                .expect("math challenges never fail");
            assert!(challenge.description().starts_with("Munch multiples of"));
        }
    }

    #[test]
    fn grid_targets_thirty_percent_correct() {
        let mut topic = provider(5, "multiples");
        let challenge = topic
            .generate_challenge(Level::FIRST)
            .expect("math challenges never fail");
        let grid = topic
            .generate_grid(GridSize::DESKTOP, &challenge)
            .expect("math grids never fail");
        assert_eq!(grid.filled_count(), 48);
        assert_eq!(grid.correct_total(), 14);
    }

    #[test]
    fn greater_than_grid_is_still_full() {
        let mut topic = provider(8, "greater_less");
        for _ in 0..10 {
            let challenge = topic
                .generate_challenge(Level::FIRST)
                .expect("math challenges never fail");
            let grid = topic
                .generate_grid(GridSize::DESKTOP, &challenge)
                .expect("math grids never fail");
            assert_eq!(grid.filled_count(), 48);
            for (_, cell) in grid.iter() {
                assert_eq!(cell.is_correct(), challenge.check_answer(cell.value()));
            }
        }
    }
}
