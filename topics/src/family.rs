//! Category families shared by the built-in providers.

use munch_core::Category;
use rand::{seq::SliceRandom, Rng};

/// Category id that draws from every family.
pub(crate) const RANDOM: &str = "random";

/// Group of challenge rules selectable as one category.
#[derive(Debug)]
pub(crate) struct Family<R: 'static> {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
    pub(crate) rules: &'static [R],
}

/// Lists `random` followed by every family.
pub(crate) fn categories<R>(families: &[Family<R>]) -> Vec<Category> {
    std::iter::once(Category::new(RANDOM, "Random Mix"))
        .chain(
            families
                .iter()
                .map(|family| Category::new(family.id, family.name)),
        )
        .collect()
}

/// Normalizes a requested category id; unknown ids fall back to `default`.
pub(crate) fn resolve<R>(
    families: &[Family<R>],
    requested: &str,
    default: &'static str,
) -> &'static str {
    if requested == RANDOM {
        return RANDOM;
    }
    families
        .iter()
        .find(|family| family.id == requested)
        .map_or(default, |family| family.id)
}

/// Picks a rule from the selected family, or from all families for `random`.
pub(crate) fn pick<'a, R, G: Rng>(
    families: &'a [Family<R>],
    selected: &str,
    rng: &mut G,
) -> Option<&'a R> {
    match families.iter().find(|family| family.id == selected) {
        Some(family) => family.rules.choose(rng),
        None => {
            let all: Vec<&R> = families.iter().flat_map(|family| family.rules).collect();
            all.choose(rng).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const FAMILIES: &[Family<u8>] = &[
        Family {
            id: "low",
            name: "Low",
            rules: &[1, 2],
        },
        Family {
            id: "high",
            name: "High",
            rules: &[9],
        },
    ];

    #[test]
    fn random_is_listed_first() {
        let ids: Vec<String> = categories(FAMILIES).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["random", "low", "high"]);
    }

    #[test]
    fn unknown_category_falls_back_to_default() {
        assert_eq!(resolve(FAMILIES, "nope", "low"), "low");
        assert_eq!(resolve(FAMILIES, "high", "low"), "high");
        assert_eq!(resolve(FAMILIES, RANDOM, "low"), RANDOM);
    }

    #[test]
    fn selected_family_restricts_the_draw() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(pick(FAMILIES, "high", &mut rng), Some(&9));
        }
        let mut seen_high = false;
        for _ in 0..50 {
            seen_high |= pick(FAMILIES, RANDOM, &mut rng) == Some(&9);
        }
        assert!(seen_high);
    }
}
