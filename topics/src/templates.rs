//! Challenge construction for custom topics.

use munch_core::{Challenge, Level};
use rand::{seq::SliceRandom, Rng};

use crate::distractors::smart_distractors;

const MIN_DISTRACTORS: usize = 40;
const DISTRACTOR_BUDGET: usize = 63;
/// Upper bounds derived from a 48-cell grid: 20% and 35% of the cells.
const SUBSET_MIN_CAP: usize = 9;
const SUBSET_MAX_CAP: usize = 16;

/// Description and answer lists backing one custom challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ChallengeData {
    pub(crate) description: String,
    pub(crate) correct: Vec<String>,
    pub(crate) incorrect: Vec<String>,
    pub(crate) hints: Vec<String>,
}

impl ChallengeData {
    /// Challenge grading values by case-insensitive membership in `correct`.
    pub(crate) fn challenge(&self) -> Challenge {
        let answers: Vec<String> = self
            .correct
            .iter()
            .map(|answer| answer.trim().to_lowercase())
            .collect();
        Challenge::new(self.description.clone(), move |value| {
            let value = value.trim().to_lowercase();
            answers.iter().any(|answer| *answer == value)
        })
        .with_hints(self.hints.clone())
    }
}

fn descriptions(topic: &str, level: Level) -> Vec<String> {
    let mut templates = vec![
        format!("Find all items related to {topic}"),
        format!("Select everything about {topic}"),
        format!("Munch the {topic} facts"),
        format!("Identify true statements about {topic}"),
        format!("Find all {topic} examples"),
        format!("Select items that belong to {topic}"),
        format!("Choose correct {topic} information"),
    ];
    if level.get() > 5 {
        templates.extend([
            format!("Find specific {topic} items"),
            format!("Select advanced {topic} concepts"),
            format!("Identify expert {topic} knowledge"),
            format!("Find complex {topic} examples"),
        ]);
    }
    templates
}

fn is_everything(description: &str) -> bool {
    description.contains("everything about")
        || description.contains("all items related to")
        || (description.contains("all") && description.contains("examples"))
}

fn hints_for(topic: &str, correct: usize) -> Vec<String> {
    vec![
        format!("Look for items containing \"{topic}\""),
        format!("{correct} correct answers to find"),
        format!("Think about what relates to {topic}"),
        "Some answers may be tricky!".to_owned(),
    ]
}

/// Builds a challenge for `topic` from already separated answer lists.
///
/// "Everything" templates keep every correct item. Other templates keep a
/// level-dependent random subset and demote the rest to distractors.
pub(crate) fn build_challenge<R: Rng>(
    topic: &str,
    correct: Vec<String>,
    mut incorrect: Vec<String>,
    level: Level,
    rng: &mut R,
) -> ChallengeData {
    if correct.is_empty() && incorrect.is_empty() {
        log::warn!("no items available for {topic:?}; using a placeholder challenge");
        return ChallengeData {
            description: format!("Find items about {topic}"),
            correct: vec![format!("{topic} item")],
            incorrect: vec!["Wrong answer".to_owned()],
            hints: Vec::new(),
        };
    }

    let templates = descriptions(topic, level);
    let description = templates
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| format!("Find items about {topic}"));

    let mut correct = correct;
    if !is_everything(&description) {
        let level = usize::try_from(level.get()).unwrap_or(usize::MAX);
        let min = level
            .saturating_div(4)
            .saturating_add(2)
            .min(SUBSET_MIN_CAP)
            .min(correct.len());
        let max = (min + 3).min(SUBSET_MAX_CAP).min(correct.len());
        let keep = rng.gen_range(min..=max);
        correct.shuffle(rng);
        let mut demoted = correct.split_off(keep);
        demoted.append(&mut incorrect);
        incorrect = demoted;
    }

    let wanted = MIN_DISTRACTORS.max(DISTRACTOR_BUDGET.saturating_sub(correct.len()));
    if incorrect.len() < wanted {
        incorrect.extend(smart_distractors(topic, wanted - incorrect.len()));
    }

    let hints = if level.get() > 10 {
        hints_for(topic, correct.len())
    } else {
        Vec::new()
    };
    log::debug!(
        "custom challenge {description:?}: {} correct, {} incorrect",
        correct.len(),
        incorrect.len()
    );
    ChallengeData {
        description,
        correct,
        incorrect,
        hints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn strings(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|index| format!("{prefix} {index}")).collect()
    }

    #[test]
    fn empty_content_yields_placeholder() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let data = build_challenge("Lego", Vec::new(), Vec::new(), Level::FIRST, &mut rng);
        assert_eq!(data.description, "Find items about Lego");
        assert_eq!(data.correct, ["Lego item"]);
        assert_eq!(data.incorrect, ["Wrong answer"]);
    }

    #[test]
    fn everything_templates_are_recognised() {
        assert!(is_everything("Select everything about jazz"));
        assert!(is_everything("Find all items related to jazz"));
        assert!(is_everything("Find all jazz examples"));
        assert!(!is_everything("Find complex jazz examples"));
        assert!(!is_everything("Munch the jazz facts"));
    }

    #[test]
    fn subsets_respect_level_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..50 {
            let data = build_challenge(
                "Jazz",
                strings("correct", 20),
                strings("wrong", 5),
                Level::new(8),
                &mut rng,
            );
            let kept = data.correct.len();
            if is_everything(&data.description) {
                assert_eq!(kept, 20);
            } else {
                assert!((4..=7).contains(&kept), "kept {kept}");
            }
            assert_eq!(kept + data.incorrect.len(), 63);
        }
    }

    #[test]
    fn predicate_ignores_case_and_padding() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let data = build_challenge(
            "Jazz",
            vec!["Miles Davis".to_owned()],
            vec!["Pizza".to_owned()],
            Level::new(12),
            &mut rng,
        );
        let challenge = data.challenge();
        assert!(challenge.check_answer("  miles DAVIS "));
        assert!(!challenge.check_answer("Pizza"));
        assert_eq!(challenge.hints().len(), 4);
    }
}
