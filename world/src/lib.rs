#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Munch.
//!
//! The [`World`] owns the game phase machine and every piece of mutable game
//! state. Adapters and systems mutate it exclusively through [`apply`] and read
//! it through the [`query`] module.

mod preferences;
mod spawn;

use std::{fmt, time::Duration};

use munch_core::{
    generate_level, Challenge, Command, Enemy, EnemyId, EnemyStep, Event, GamePhase,
    GenerationJob, GenerationResult, GenerationTicket, Grid, GridSize, Level, LevelContent,
    MoveDelta, Player, ProviderFactory, RenderMode, SoundCue, TopicId, TopicProvider,
};

use preferences::Preferences;

const BASE_TIME_BUDGET_SECS: u64 = 60;
const TIME_BUDGET_PER_LEVEL_SECS: u64 = 10;
const MUNCH_POINTS_PER_LEVEL: u32 = 10;
const COMPLETION_BONUS_PER_LEVEL: u32 = 100;

/// Configuration parameters required to construct a [`World`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    grid_size: GridSize,
    starting_lives: u32,
    max_lives: u32,
    level_transition_delay: Duration,
}

impl WorldConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(
        grid_size: GridSize,
        starting_lives: u32,
        max_lives: u32,
        level_transition_delay: Duration,
    ) -> Self {
        Self {
            grid_size,
            starting_lives,
            max_lives,
            level_transition_delay,
        }
    }

    /// Returns a copy using `grid_size` for generated levels.
    #[must_use]
    pub const fn with_grid_size(mut self, grid_size: GridSize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Grid dimensions used until a viewport is configured.
    #[must_use]
    pub const fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// Lives granted at the start of a play-through.
    #[must_use]
    pub const fn starting_lives(&self) -> u32 {
        self.starting_lives
    }

    /// Cap applied to the bonus life awarded on level completion.
    #[must_use]
    pub const fn max_lives(&self) -> u32 {
        self.max_lives
    }

    /// Pause between completing a level and starting the next one.
    #[must_use]
    pub const fn level_transition_delay(&self) -> Duration {
        self.level_transition_delay
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(GridSize::DESKTOP, 3, 5, Duration::from_millis(1_500))
    }
}

/// Represents the authoritative Munch game state.
pub struct World {
    config: WorldConfig,
    factory: Box<dyn ProviderFactory>,
    preferences: Preferences,
    phase: GamePhase,
    topic: Option<TopicId>,
    provider: Option<Box<dyn TopicProvider>>,
    render_mode: RenderMode,
    grid_size: GridSize,
    grid: Grid,
    challenge: Option<Challenge>,
    player: Player,
    enemies: Vec<Enemy>,
    score: u32,
    lives: u32,
    level: Level,
    time_remaining: Duration,
    transition: Option<Duration>,
    epoch: u64,
    outstanding: Option<GenerationTicket>,
    pending_job: Option<GenerationJob>,
}

impl World {
    /// Creates a world waiting for topic selection.
    #[must_use]
    pub fn new(config: WorldConfig, factory: Box<dyn ProviderFactory>) -> Self {
        let grid_size = config.grid_size();
        Self {
            config,
            factory,
            preferences: Preferences::new(),
            phase: GamePhase::TopicSelection,
            topic: None,
            provider: None,
            render_mode: RenderMode::default(),
            grid_size,
            grid: Grid::new(grid_size),
            challenge: None,
            player: Player::at(grid_size.center()),
            enemies: Vec::new(),
            score: 0,
            lives: config.starting_lives(),
            level: Level::FIRST,
            time_remaining: Duration::ZERO,
            transition: None,
            epoch: 0,
            outstanding: None,
            pending_job: None,
        }
    }

    fn set_phase(&mut self, phase: GamePhase, out_events: &mut Vec<Event>) {
        if self.phase != phase {
            log::debug!("phase {} -> {}", self.phase, phase);
            out_events.push(Event::PhaseChanged {
                from: self.phase,
                to: phase,
            });
            self.phase = phase;
        }
    }

    fn invalidate_generation(&mut self) {
        if let Some(ticket) = self.outstanding.take() {
            log::debug!("abandoning generation ticket {}", ticket.epoch());
        }
        self.pending_job = None;
        self.transition = None;
    }

    fn select_topic(&mut self, topic: Option<TopicId>, out_events: &mut Vec<Event>) {
        self.invalidate_generation();
        self.enemies.clear();
        match topic {
            None => {
                log::info!("returning to topic selection");
                self.topic = None;
                self.provider = None;
                out_events.push(Event::TopicSelected { topic: None });
                self.set_phase(GamePhase::TopicSelection, out_events);
            }
            Some(topic) => {
                let mut provider = self.factory.create(topic, self.preferences.custom_topic());
                self.preferences.apply_to(topic, provider.as_mut());
                log::info!("selected topic {topic} ({})", provider.name());
                self.topic = Some(topic);
                self.provider = Some(provider);
                out_events.push(Event::TopicSelected { topic: Some(topic) });
                self.start_game(out_events);
            }
        }
    }

    fn start_game(&mut self, out_events: &mut Vec<Event>) {
        let Some(mut provider) = self.provider.take() else {
            log::debug!("start requested without an available provider");
            return;
        };
        self.transition = None;
        self.epoch = self.epoch.saturating_add(1);
        let ticket = GenerationTicket::new(self.epoch);

        if provider.requires_loading() {
            log::info!(
                "generating level {} for {} in the background",
                self.level,
                provider.name()
            );
            self.outstanding = Some(ticket);
            self.pending_job = Some(GenerationJob::new(
                ticket,
                self.level,
                self.grid_size,
                provider,
            ));
            self.set_phase(GamePhase::Loading, out_events);
            out_events.push(Event::GenerationRequested { ticket });
            return;
        }

        let outcome = generate_level(provider.as_mut(), self.level, self.grid_size);
        self.provider = Some(provider);
        match outcome {
            Ok(content) => self.begin_level(content, out_events),
            Err(error) => self.fail_generation(&error.to_string(), out_events),
        }
    }

    fn complete_generation(&mut self, result: GenerationResult, out_events: &mut Vec<Event>) {
        let GenerationResult {
            ticket,
            provider,
            outcome,
        } = result;
        if self.outstanding != Some(ticket) || self.phase == GamePhase::Playing {
            log::info!("discarding stale generation result {}", ticket.epoch());
            return;
        }
        self.outstanding = None;
        self.provider = Some(provider);
        match outcome {
            Ok(content) => self.begin_level(content, out_events),
            Err(error) => self.fail_generation(&error.to_string(), out_events),
        }
    }

    fn begin_level(&mut self, content: LevelContent, out_events: &mut Vec<Event>) {
        let LevelContent { challenge, grid } = content;
        let size = grid.size();
        log::info!(
            "level {} started: {:?} ({} correct cells)",
            self.level,
            challenge.description(),
            grid.correct_total()
        );
        out_events.push(Event::LevelStarted {
            level: self.level,
            challenge: challenge.description().to_owned(),
        });
        self.grid = grid;
        self.challenge = Some(challenge);
        self.player = Player::at(size.center());
        self.enemies.clear();
        if self.lives == 0 {
            self.lives = self.config.starting_lives();
        }
        self.time_remaining = time_budget(self.level);
        self.set_phase(GamePhase::Playing, out_events);
        self.spawn_enemies(out_events);
    }

    fn fail_generation(&mut self, message: &str, out_events: &mut Vec<Event>) {
        let topic = self.topic.take();
        log::warn!("content generation failed: {message}");
        self.provider = None;
        self.challenge = None;
        self.enemies.clear();
        if let Some(topic) = topic {
            out_events.push(Event::GenerationFailed {
                topic,
                message: failure_notice(topic).to_owned(),
            });
        }
        self.set_phase(GamePhase::TopicSelection, out_events);
    }

    fn spawn_enemies(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Playing || !self.enemies.is_empty() {
            return;
        }
        self.enemies = spawn::roster(self.level, self.grid.size());
        log::debug!("spawned {} enemies", self.enemies.len());
        out_events.push(Event::EnemiesSpawned {
            count: self.enemies.len(),
        });
    }

    fn move_player(&mut self, column: i64, row: i64, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Playing || !self.grid.size().contains_signed(column, row) {
            return;
        }
        let from = self.player.position;
        let to = self.grid.size().clamp(column, row);
        self.player.position = to;
        self.player.last_move = MoveDelta::between(from, to);
        self.player.moving = true;
        out_events.push(Event::SoundRequested {
            cue: SoundCue::PlayerMove,
        });
        out_events.push(Event::PlayerMoved { from, to });
    }

    fn munch(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let position = self.player.position;
        let Some(challenge) = self.challenge.as_ref() else {
            return;
        };
        let Some(cell) = self.grid.cell_mut(position) else {
            return;
        };
        if cell.is_empty() || cell.is_munched() {
            return;
        }

        if challenge.check_answer(cell.value()) {
            let _ = cell.mark_munched();
            self.score = self
                .score
                .saturating_add(MUNCH_POINTS_PER_LEVEL.saturating_mul(self.level.get()));
            out_events.push(Event::SoundRequested {
                cue: SoundCue::Munch,
            });
            out_events.push(Event::CellMunched {
                cell: position,
                correct: true,
            });
            out_events.push(Event::ScoreChanged { score: self.score });
            if self.grid.correct_remaining() == 0 {
                self.complete_level(out_events);
            }
        } else {
            self.lives = self.lives.saturating_sub(1);
            out_events.push(Event::SoundRequested { cue: SoundCue::Hit });
            out_events.push(Event::CellMunched {
                cell: position,
                correct: false,
            });
            out_events.push(Event::LivesChanged { lives: self.lives });
            if self.lives == 0 {
                self.game_over(out_events);
            }
        }
    }

    fn complete_level(&mut self, out_events: &mut Vec<Event>) {
        let completed = self.level;
        let bonus = COMPLETION_BONUS_PER_LEVEL.saturating_mul(completed.get());
        log::info!("level {completed} complete, bonus {bonus}");
        out_events.push(Event::SoundRequested {
            cue: SoundCue::Success,
        });
        self.level = completed.next();
        self.lives = self
            .lives
            .saturating_add(1)
            .min(self.config.max_lives())
            .max(self.lives);
        self.score = self.score.saturating_add(bonus);
        out_events.push(Event::LevelCompleted {
            level: completed,
            bonus,
        });
        out_events.push(Event::ScoreChanged { score: self.score });
        out_events.push(Event::LivesChanged { lives: self.lives });
        self.set_phase(GamePhase::Paused, out_events);
        self.transition = Some(self.config.level_transition_delay());
    }

    fn game_over(&mut self, out_events: &mut Vec<Event>) {
        log::info!("game over at level {} with score {}", self.level, self.score);
        self.enemies.clear();
        self.transition = None;
        self.set_phase(GamePhase::GameOver, out_events);
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.score = 0;
        self.lives = self.config.starting_lives();
        self.level = Level::FIRST;
        self.enemies.clear();
        self.time_remaining = Duration::ZERO;
        self.invalidate_generation();
        out_events.push(Event::ScoreChanged { score: self.score });
        out_events.push(Event::LivesChanged { lives: self.lives });
        if let Some(topic) = self.topic {
            self.select_topic(Some(topic), out_events);
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if let Some(remaining) = self.transition {
            let remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                self.transition = None;
                self.start_game(out_events);
            } else {
                self.transition = Some(remaining);
            }
            return;
        }
        if self.phase != GamePhase::Playing {
            return;
        }
        self.time_remaining = self.time_remaining.saturating_sub(dt);
        for enemy in &mut self.enemies {
            if let Some(elapsed) = enemy.since_last_move.as_mut() {
                *elapsed = elapsed.saturating_add(dt);
            }
        }
        out_events.push(Event::TimeAdvanced { dt });
    }

    fn advance_enemies(&mut self, steps: Vec<EnemyStep>, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let size = self.grid.size();
        for step in steps {
            if !size.contains(step.to) {
                continue;
            }
            let Some(enemy) = self.enemies.iter_mut().find(|enemy| enemy.id == step.enemy) else {
                continue;
            };
            if enemy.position.manhattan_distance(step.to) > 1 {
                continue;
            }
            let from = enemy.position;
            enemy.target = step.target;
            enemy.since_last_move = Some(Duration::ZERO);
            enemy.moving = from != step.to;
            if enemy.moving {
                enemy.position = step.to;
                out_events.push(Event::EnemyMoved {
                    enemy: step.enemy,
                    from,
                    to: step.to,
                });
                out_events.push(Event::SoundRequested {
                    cue: SoundCue::EnemyMove,
                });
            }
        }
    }

    fn player_caught(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Playing {
            return;
        }
        log::info!("{enemy} caught the player");
        out_events.push(Event::SoundRequested { cue: SoundCue::Hit });
        out_events.push(Event::PlayerCaught { enemy });
        self.game_over(out_events);
    }

    fn toggle_pause(&mut self, out_events: &mut Vec<Event>) {
        if self.transition.is_some() {
            return;
        }
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused, out_events),
            GamePhase::Paused => self.set_phase(GamePhase::Playing, out_events),
            _ => {}
        }
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("phase", &self.phase)
            .field("topic", &self.topic)
            .field("level", &self.level)
            .field("score", &self.score)
            .field("lives", &self.lives)
            .field("enemies", &self.enemies.len())
            .field("outstanding", &self.outstanding)
            .finish_non_exhaustive()
    }
}

fn time_budget(level: Level) -> Duration {
    Duration::from_secs(
        BASE_TIME_BUDGET_SECS
            .saturating_add(u64::from(level.get()).saturating_mul(TIME_BUDGET_PER_LEVEL_SECS)),
    )
}

fn failure_notice(topic: TopicId) -> &'static str {
    match topic {
        TopicId::Custom => {
            "Failed to generate custom board. Please try a different topic or check your spelling."
        }
        _ => "Failed to start game. Please try again.",
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SelectTopic { topic } => world.select_topic(topic, out_events),
        Command::SetCategoryPreference { topic, category } => {
            world.preferences.set_category(topic, category);
        }
        Command::SetCustomTopic { text } => {
            if let Err(reason) = world.preferences.set_custom_topic(&text) {
                log::info!("rejected custom topic {text:?}: {reason}");
                out_events.push(Event::CustomTopicRejected { reason });
            }
        }
        Command::StartGame => world.start_game(out_events),
        Command::RestartGame => world.restart(out_events),
        Command::TogglePause => world.toggle_pause(out_events),
        Command::ToggleRenderMode => {
            world.render_mode = world.render_mode.toggled();
            out_events.push(Event::RenderModeChanged {
                mode: world.render_mode,
            });
        }
        Command::ConfigureViewport { width_px } => {
            world.grid_size = GridSize::for_viewport(width_px);
        }
        Command::MovePlayer { column, row } => world.move_player(column, row, out_events),
        Command::MunchCurrentCell => world.munch(out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::AdvanceEnemies { steps } => world.advance_enemies(steps, out_events),
        Command::PlayerCaught { enemy } => world.player_caught(enemy, out_events),
        Command::SpawnEnemies => world.spawn_enemies(out_events),
        Command::CompleteGeneration { result } => world.complete_generation(result, out_events),
    }
}

/// Checks out the generation job issued by the last start, if any.
///
/// The job carries the active provider; the world expects it back through
/// [`Command::CompleteGeneration`].
#[must_use]
pub fn take_generation_job(world: &mut World) -> Option<GenerationJob> {
    world.pending_job.take()
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use munch_core::{
        Category, Challenge, Enemy, GamePhase, Grid, GridCoord, GridSize, Level, Player,
        PlayfieldView, RenderMode, TopicId,
    };
    use serde::{Deserialize, Serialize};

    use super::World;

    /// Current game phase.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Selected topic, if any.
    #[must_use]
    pub fn topic(world: &World) -> Option<TopicId> {
        world.topic
    }

    /// Display name of the active provider, when it is not checked out.
    #[must_use]
    pub fn provider_name(world: &World) -> Option<String> {
        world.provider.as_ref().map(|provider| provider.name())
    }

    /// Sub-categories offered by the active provider.
    #[must_use]
    pub fn categories(world: &World) -> Vec<Category> {
        world
            .provider
            .as_ref()
            .map(|provider| provider.categories())
            .unwrap_or_default()
    }

    /// Saved sub-category for `topic`.
    #[must_use]
    pub fn category_preference(world: &World, topic: TopicId) -> Option<&str> {
        world.preferences.category(topic)
    }

    /// Name used when the custom topic is selected.
    #[must_use]
    pub fn custom_topic(world: &World) -> &str {
        world.preferences.custom_topic()
    }

    /// Active render mode.
    #[must_use]
    pub fn render_mode(world: &World) -> RenderMode {
        world.render_mode
    }

    /// Grid of the current level.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Grid size that the next generated level will use.
    #[must_use]
    pub fn next_grid_size(world: &World) -> GridSize {
        world.grid_size
    }

    /// Challenge of the current level.
    #[must_use]
    pub fn challenge(world: &World) -> Option<&Challenge> {
        world.challenge.as_ref()
    }

    /// The player's avatar.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Enemies in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        &world.enemies
    }

    /// Current score.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Remaining lives.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Current level.
    #[must_use]
    pub fn level(world: &World) -> Level {
        world.level
    }

    /// Time left on the level clock.
    #[must_use]
    pub fn time_remaining(world: &World) -> Duration {
        world.time_remaining
    }

    /// Whether a level-complete pause is counting down.
    #[must_use]
    pub fn is_transitioning(world: &World) -> bool {
        world.transition.is_some()
    }

    /// Whether a background generation result is still awaited.
    #[must_use]
    pub fn awaiting_generation(world: &World) -> bool {
        world.outstanding.is_some()
    }

    /// Captures the read-only view consumed by systems.
    #[must_use]
    pub fn playfield_view(world: &World) -> PlayfieldView<'_> {
        PlayfieldView::new(
            world.phase,
            world.level,
            world.grid.size(),
            &world.player,
            &world.enemies,
        )
    }

    /// Serializable copy of the state a renderer needs.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        GameSnapshot {
            phase: world.phase,
            topic: world.topic,
            render_mode: world.render_mode,
            level: world.level,
            score: world.score,
            lives: world.lives,
            time_remaining_ms: u64::try_from(world.time_remaining.as_millis())
                .unwrap_or(u64::MAX),
            challenge: world
                .challenge
                .as_ref()
                .map(|challenge| challenge.description().to_owned()),
            hints: world
                .challenge
                .as_ref()
                .map(|challenge| challenge.hints().to_vec())
                .unwrap_or_default(),
            player: world.player,
            enemies: world.enemies.clone(),
            grid: world.grid.clone(),
        }
    }

    /// Point-in-time copy of the game state aggregate.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct GameSnapshot {
        /// Game phase.
        pub phase: GamePhase,
        /// Selected topic.
        pub topic: Option<TopicId>,
        /// Render mode.
        pub render_mode: RenderMode,
        /// Current level.
        pub level: Level,
        /// Current score.
        pub score: u32,
        /// Remaining lives.
        pub lives: u32,
        /// Level clock in milliseconds.
        pub time_remaining_ms: u64,
        /// Challenge description.
        pub challenge: Option<String>,
        /// Challenge hints.
        pub hints: Vec<String>,
        /// Player avatar.
        pub player: Player,
        /// Enemies in spawn order.
        pub enemies: Vec<Enemy>,
        /// Answer grid.
        pub grid: Grid,
    }

    impl GameSnapshot {
        /// Coordinates of correct cells that are still waiting to be munched.
        #[must_use]
        pub fn remaining_targets(&self) -> Vec<GridCoord> {
            self.grid
                .iter()
                .filter(|(_, cell)| !cell.is_empty() && cell.is_correct() && !cell.is_munched())
                .map(|(coord, _)| coord)
                .collect()
        }
    }
}
