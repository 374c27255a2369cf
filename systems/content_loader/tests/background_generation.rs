use std::{sync::Arc, time::Duration};

use munch_content::{ContentError, MemoryContentStore};
use munch_core::{Command, Event, GamePhase, TopicId};
use munch_system_content_loader::{Config, ContentLoader};
use munch_topics::{Catalog, CatalogConfig};
use munch_world::{self as world, query, World, WorldConfig};

const PATIENCE: Duration = Duration::from_secs(10);

fn custom_world() -> World {
    let store = MemoryContentStore::new().with_generator(|_| Err(ContentError::Unavailable));
    let catalog = Catalog::new(CatalogConfig::new(5, Arc::new(store)));
    let mut world = World::new(WorldConfig::default(), Box::new(catalog));
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SetCustomTopic {
            text: "Ancient Egypt".to_owned(),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SelectTopic {
            topic: Some(TopicId::Custom),
        },
        &mut events,
    );
    assert_eq!(query::phase(&world), GamePhase::Loading);
    world
}

fn wait_for_completion(loader: &ContentLoader) -> Command {
    let mut commands = Vec::new();
    assert!(loader.wait(PATIENCE, &mut commands), "generation timed out");
    commands.remove(0)
}

#[test]
fn completed_jobs_start_the_level() {
    let mut world = custom_world();
    let mut loader = ContentLoader::spawn(Config::default()).expect("worker thread");

    let mut commands = Vec::new();
    loader.handle(world::take_generation_job(&mut world), &mut commands);
    if commands.is_empty() {
        commands.push(wait_for_completion(&loader));
    }

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    assert_eq!(query::phase(&world), GamePhase::Playing);
    assert_eq!(
        query::provider_name(&world).as_deref(),
        Some("Custom: Ancient Egypt")
    );
    assert_eq!(query::grid(&world).filled_count(), 48);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::LevelStarted { .. })));
}

#[test]
fn completions_for_abandoned_selections_are_ignored() {
    let mut world = custom_world();
    let loader = ContentLoader::spawn(Config::new(1)).expect("worker thread");
    let job = world::take_generation_job(&mut world).expect("job issued");
    loader.submit(job).expect("queue has room");

    let mut events = Vec::new();
    world::apply(&mut world, Command::SelectTopic { topic: None }, &mut events);
    let completion = wait_for_completion(&loader);

    events.clear();
    world::apply(&mut world, completion, &mut events);
    assert!(events.is_empty());
    assert_eq!(query::phase(&world), GamePhase::TopicSelection);
}

#[test]
fn drain_is_empty_without_work() {
    let loader = ContentLoader::spawn(Config::default()).expect("worker thread");
    let mut commands = Vec::new();
    assert_eq!(loader.drain(&mut commands), 0);
    assert!(!loader.wait(Duration::from_millis(10), &mut commands));
    assert!(commands.is_empty());
}
