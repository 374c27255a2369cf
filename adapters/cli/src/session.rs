//! Wires the world to its systems and drives the command cascade.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use munch_core::{Command, Event};
use munch_system_content_loader::{Config as LoaderConfig, ContentLoader};
use munch_system_simulation::Simulation;
use munch_topics::{Catalog, CatalogConfig};
use munch_world::{self as world, query, World, WorldConfig};

use crate::config::Settings;

/// A world together with the systems that react to its events.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    simulation: Simulation,
    loader: ContentLoader,
}

impl Session {
    pub(crate) fn new(settings: &Settings) -> Result<Self> {
        let catalog = Catalog::new(CatalogConfig::new(
            settings.seed,
            settings.content_store(),
        ));
        let loader = ContentLoader::spawn(LoaderConfig::default())
            .context("failed to start the content loader thread")?;
        Ok(Self {
            world: World::new(WorldConfig::default(), Box::new(catalog)),
            simulation: Simulation::new(settings.seed),
            loader,
        })
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Applies `commands` and every command the systems answer with.
    pub(crate) fn dispatch(&mut self, commands: Vec<Command>) -> Vec<Event> {
        let mut pending = commands;
        let mut emitted = Vec::new();
        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            events.iter().for_each(log_event);
            self.simulation
                .handle(&events, &query::playfield_view(&self.world), &mut pending);
            self.loader
                .handle(world::take_generation_job(&mut self.world), &mut pending);
            emitted.extend(events);
        }
        emitted
    }

    /// Blocks until the outstanding background generation completes.
    pub(crate) fn await_generation(&mut self, patience: Duration) -> Result<Vec<Event>> {
        let mut commands = Vec::new();
        if self.loader.drain(&mut commands) == 0 && !self.loader.wait(patience, &mut commands) {
            bail!("content generation did not finish within {patience:?}");
        }
        Ok(self.dispatch(commands))
    }
}

fn log_event(event: &Event) {
    match event {
        Event::LevelStarted { level, challenge } => {
            log::info!("level {level}: {challenge}");
        }
        Event::LevelCompleted { level, bonus } => {
            log::info!("level {level} cleared (+{bonus})");
        }
        Event::PlayerCaught { enemy } => log::info!("caught by {enemy}"),
        Event::GenerationFailed { topic, message } => log::warn!("{topic}: {message}"),
        Event::PhaseChanged { from, to } => log::info!("{from} -> {to}"),
        Event::TimeAdvanced { .. } | Event::SoundRequested { .. } => {}
        other => log::debug!("{other:?}"),
    }
}
