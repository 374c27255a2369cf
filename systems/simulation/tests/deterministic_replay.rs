use std::time::Duration;

use munch_core::{Command, Event, GamePhase, TopicId};
use munch_system_simulation::Simulation;
use munch_topics::{Catalog, CatalogConfig};
use munch_world::{self as world, query, World, WorldConfig};

const FRAME: Duration = Duration::from_millis(100);
const MAX_FRAMES: usize = 1_200;

#[test]
fn replay_with_equal_seeds_is_identical() {
    let first = replay(42);
    let second = replay(42);

    assert_eq!(first.events, second.events, "replay diverged between runs");
    assert_eq!(first.phase, second.phase);
}

#[test]
fn idle_player_is_eventually_caught() {
    let outcome = replay(7);

    assert_eq!(outcome.phase, GamePhase::GameOver);
    assert!(outcome
        .events
        .iter()
        .any(|event| matches!(event, Event::PlayerCaught { .. })));
    assert!(outcome
        .events
        .iter()
        .any(|event| matches!(event, Event::EnemyMoved { .. })));
}

#[test]
fn enemies_wait_for_their_move_interval() {
    let mut world = World::new(
        WorldConfig::default(),
        Box::new(Catalog::new(CatalogConfig::offline(3))),
    );
    let mut simulation = Simulation::new(3);
    let mut log = Vec::new();
    apply_all(
        &mut world,
        &mut simulation,
        Command::SelectTopic {
            topic: Some(TopicId::Words),
        },
        &mut log,
    );

    let since_last_move = |world: &World| query::enemies(world)[0].since_last_move;
    assert_eq!(since_last_move(&world), None);

    apply_all(&mut world, &mut simulation, Command::Tick { dt: FRAME }, &mut log);
    assert_eq!(since_last_move(&world), Some(Duration::ZERO));

    for _ in 0..19 {
        apply_all(&mut world, &mut simulation, Command::Tick { dt: FRAME }, &mut log);
    }
    assert_eq!(since_last_move(&world), Some(Duration::from_millis(1_900)));

    apply_all(&mut world, &mut simulation, Command::Tick { dt: FRAME }, &mut log);
    assert_eq!(since_last_move(&world), Some(Duration::ZERO));
}

struct ReplayOutcome {
    events: Vec<Event>,
    phase: GamePhase,
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut world = World::new(
        WorldConfig::default(),
        Box::new(Catalog::new(CatalogConfig::offline(seed))),
    );
    let mut simulation = Simulation::new(seed);
    let mut log = Vec::new();

    apply_all(
        &mut world,
        &mut simulation,
        Command::SelectTopic {
            topic: Some(TopicId::Math),
        },
        &mut log,
    );
    for _ in 0..MAX_FRAMES {
        if query::phase(&world) != GamePhase::Playing {
            break;
        }
        apply_all(&mut world, &mut simulation, Command::Tick { dt: FRAME }, &mut log);
    }

    ReplayOutcome {
        events: log,
        phase: query::phase(&world),
    }
}

fn apply_all(
    world: &mut World,
    simulation: &mut Simulation,
    command: Command,
    log: &mut Vec<Event>,
) {
    let mut pending = vec![command];
    while !pending.is_empty() {
        let mut events = Vec::new();
        for command in pending.drain(..) {
            world::apply(world, command, &mut events);
        }
        log.extend(events.iter().cloned());
        simulation.handle(&events, &query::playfield_view(world), &mut pending);
    }
}
