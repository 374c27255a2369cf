//! Natural-language prompts paired with answer predicates.

use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

/// Predicate classifying a tile value as correct or incorrect.
pub type AnswerPredicate = dyn Fn(&str) -> bool + Send + Sync;

/// Prompt shown to the player together with the predicate that grades munches.
///
/// The predicate must be pure: repeated calls with the same value return the same
/// answer for as long as the grid it was generated for is alive.
#[derive(Clone)]
pub struct Challenge {
    description: String,
    predicate: Arc<AnswerPredicate>,
    hints: Vec<String>,
}

impl Challenge {
    /// Creates a challenge from its description and predicate.
    #[must_use]
    pub fn new<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
            hints: Vec::new(),
        }
    }

    /// Attaches optional hints displayed alongside the description.
    #[must_use]
    pub fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.hints = hints;
        self
    }

    /// Human readable prompt, e.g. "Munch multiples of 3".
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Hints attached to the challenge, possibly empty.
    #[must_use]
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Evaluates the predicate for `value`.
    ///
    /// A predicate that panics grades the value as incorrect instead of
    /// unwinding into the caller.
    #[must_use]
    pub fn check_answer(&self, value: &str) -> bool {
        let predicate = &self.predicate;
        match panic::catch_unwind(AssertUnwindSafe(|| predicate(value))) {
            Ok(verdict) => verdict,
            Err(_) => {
                log::warn!(
                    "answer predicate for {:?} panicked on {value:?}; treating as incorrect",
                    self.description
                );
                false
            }
        }
    }
}

impl fmt::Debug for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Challenge")
            .field("description", &self.description)
            .field("hints", &self.hints)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::Challenge;

    #[test]
    fn predicate_is_evaluated_against_values() {
        let challenge = Challenge::new("Munch even numbers", |value| {
            value.parse::<u32>().map_or(false, |n| n % 2 == 0)
        });
        assert!(challenge.check_answer("12"));
        assert!(!challenge.check_answer("7"));
        assert!(!challenge.check_answer("seven"));
    }

    #[test]
    fn panicking_predicate_is_treated_as_incorrect() {
        let challenge = Challenge::new("Munch broken things", |value| {
            if value == "boom" {
                panic!("predicate exploded");
            }
            true
        });
        assert!(!challenge.check_answer("boom"));
        assert!(challenge.check_answer("fine"), "other values still evaluate");
    }

    #[test]
    fn hints_are_optional() {
        let plain = Challenge::new("Munch primes", |_| false);
        assert!(plain.hints().is_empty());
        let hinted = plain.with_hints(vec!["Primes have two divisors".to_owned()]);
        assert_eq!(hinted.hints().len(), 1);
    }
}
