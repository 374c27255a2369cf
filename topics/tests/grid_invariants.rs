use std::sync::Arc;

use munch_content::{ContentStore, MemoryContentStore, SaveRequest, TopicContent};
use munch_core::{generate_level, GridSize, Level, ProviderFactory, TopicId};
use munch_topics::{Catalog, CatalogConfig, CustomTopicProvider};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn topic_strategy() -> impl Strategy<Value = TopicId> {
    prop::sample::select(TopicId::ALL.to_vec())
}

fn size_strategy() -> impl Strategy<Value = GridSize> {
    prop_oneof![
        Just(GridSize::new(5, 4)),
        Just(GridSize::new(6, 5)),
        Just(GridSize::new(7, 5)),
        Just(GridSize::new(8, 6)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_provider_fills_the_grid_consistently(
        seed in any::<u64>(),
        topic in topic_strategy(),
        size in size_strategy(),
        level in 1u32..20,
    ) {
        let mut catalog = Catalog::new(CatalogConfig::offline(seed));
        let mut provider = catalog.create(topic, "deep sea creatures");
        for category in provider.categories() {
            provider.set_category(&category.id);
            let content = generate_level(provider.as_mut(), Level::new(level), size)
                .map_err(|error| TestCaseError::fail(error.to_string()))?;
            let grid = &content.grid;
            prop_assert_eq!(grid.filled_count(), size.cell_count());
            for (coord, cell) in grid.iter() {
                prop_assert!(!cell.is_munched(), "{} starts munched", coord);
                prop_assert_eq!(
                    cell.is_correct(),
                    content.challenge.check_answer(cell.value()),
                    "{} disagrees with its challenge", coord
                );
            }
        }
    }
}

#[test]
fn built_in_topics_always_offer_something_to_munch() {
    let mut catalog = Catalog::new(CatalogConfig::offline(77));
    for topic in [TopicId::Math, TopicId::Words, TopicId::Marvel, TopicId::Movies] {
        let mut provider = catalog.create(topic, "");
        for level in 1..=12 {
            let content = generate_level(provider.as_mut(), Level::new(level), GridSize::DESKTOP)
                .expect("built-in topics never fail");
            assert!(
                content.grid.correct_total() > 0,
                "{topic} level {level}: {}",
                content.challenge.description()
            );
        }
    }
}

#[test]
fn custom_provider_survives_a_store_with_no_backend() {
    let store = Arc::new(MemoryContentStore::new());
    let mut provider =
        CustomTopicProvider::new("Lighthouses", store, ChaCha8Rng::seed_from_u64(8));
    let content = generate_level(&mut provider, Level::new(3), GridSize::DESKTOP)
        .expect("synthesis always succeeds");
    provider.flush_pending_saves();
    assert_eq!(content.grid.filled_count(), 48);
    assert!(content.grid.correct_total() > 0);
}

#[test]
fn off_topic_content_still_yields_a_winnable_board() {
    let store = Arc::new(MemoryContentStore::new());
    let items = ["Pizza", "Rainbow", "Guitar", "Castle", "Robot", "Moon"];
    let _ = store
        .save(&SaveRequest {
            topic: "Volcanoes".to_owned(),
            subtopic: "all".to_owned(),
            content: TopicContent {
                items: items.iter().map(|item| (*item).to_owned()).collect(),
                ..TopicContent::default()
            },
        })
        .expect("valid save");

    for seed in 0..5 {
        let mut provider = CustomTopicProvider::new(
            "Volcanoes",
            Arc::clone(&store) as Arc<dyn ContentStore>,
            ChaCha8Rng::seed_from_u64(seed),
        );
        let content = generate_level(&mut provider, Level::FIRST, GridSize::for_viewport(1280))
            .expect("custom topics fall back instead of failing");
        provider.flush_pending_saves();
        assert_eq!(content.grid.filled_count(), 48, "seed {seed}");
        assert!(content.grid.correct_total() > 0, "seed {seed}");
    }
}
