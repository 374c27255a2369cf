#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Munch engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable views such as
//! [`PlayfieldView`], and respond exclusively with new command batches.
//!
//! Content is produced by [`TopicProvider`] implementations which pair a
//! [`Challenge`] with a fully populated [`Grid`].

mod challenge;
mod grid;
mod provider;
mod topic_name;

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use challenge::{AnswerPredicate, Challenge};
pub use grid::{Grid, GridCell, GridSize};
pub use provider::{
    generate_level, Category, GenerationJob, GenerationResult, GenerationTicket, LevelContent,
    ProviderFactory, TopicError, TopicProvider,
};
pub use topic_name::{validate_custom_topic, DEFAULT_CUSTOM_TOPIC};

/// Difficulty level of a play-through, starting at one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(u32);

impl Level {
    /// Level every play-through starts on.
    pub const FIRST: Level = Level(1);

    /// Creates a level, coercing zero onto the first level.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self::FIRST
        } else {
            Self(value)
        }
    }

    /// Retrieves the numeric level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Level that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridCoord {
    column: u32,
    row: u32,
}

impl GridCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: GridCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Coordinate translated by `delta` without bounds checks, as signed values.
    #[must_use]
    pub fn offset(self, delta: MoveDelta) -> (i64, i64) {
        (
            i64::from(self.column) + i64::from(delta.dx),
            i64::from(self.row) + i64::from(delta.dy),
        )
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every cardinal direction in clockwise order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Single-cell delta represented by the direction.
    #[must_use]
    pub const fn delta(self) -> MoveDelta {
        match self {
            Self::North => MoveDelta::new(0, -1),
            Self::East => MoveDelta::new(1, 0),
            Self::South => MoveDelta::new(0, 1),
            Self::West => MoveDelta::new(-1, 0),
        }
    }
}

/// Signed movement delta measured in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveDelta {
    /// Horizontal component.
    pub dx: i32,
    /// Vertical component.
    pub dy: i32,
}

impl MoveDelta {
    /// Creates a delta from its components.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Delta travelled from `from` to `to`.
    #[must_use]
    pub fn between(from: GridCoord, to: GridCoord) -> Self {
        let dx = i64::from(to.column()) - i64::from(from.column());
        let dy = i64::from(to.row()) - i64::from(from.row());
        Self::new(
            i32::try_from(dx).unwrap_or_default(),
            i32::try_from(dy).unwrap_or_default(),
        )
    }

    /// Scales both components by `factor`.
    #[must_use]
    pub const fn scaled(self, factor: i32) -> Self {
        Self::new(
            self.dx.saturating_mul(factor),
            self.dy.saturating_mul(factor),
        )
    }
}

/// The player's avatar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Cell occupied by the avatar.
    pub position: GridCoord,
    /// Delta of the last accepted move.
    pub last_move: MoveDelta,
    /// Whether the avatar has moved since the level started.
    pub moving: bool,
}

impl Player {
    /// Creates a stationary player at `position`.
    #[must_use]
    pub const fn at(position: GridCoord) -> Self {
        Self {
            position,
            last_move: MoveDelta::new(0, 0),
            moving: false,
        }
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy-{}", self.0)
    }
}

/// Enemy archetype; fully determines the movement policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Mostly chases the player, sometimes wanders.
    Basic,
    /// Always steps toward the player.
    Fast,
    /// Steps toward where the player is heading.
    Smart,
}

impl EnemyKind {
    /// Archetype assigned to the `index`-th enemy spawned on `level`.
    ///
    /// Levels up to five only spawn basic enemies; later levels alternate
    /// fast and smart enemies starting with fast.
    #[must_use]
    pub const fn for_spawn(level: Level, index: usize) -> Self {
        if level.get() <= 5 {
            Self::Basic
        } else if index % 2 == 0 {
            Self::Fast
        } else {
            Self::Smart
        }
    }

    /// Nominal speed attribute exposed to renderers.
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Basic => 1.0,
            Self::Fast => 1.5,
            Self::Smart => 1.2,
        }
    }
}

/// An enemy chasing the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Identifier unique within the level.
    pub id: EnemyId,
    /// Cell occupied by the enemy.
    pub position: GridCoord,
    /// Cell the movement policy last aimed at.
    pub target: GridCoord,
    /// Nominal speed attribute.
    pub speed: f32,
    /// Movement archetype, fixed at creation.
    pub kind: EnemyKind,
    /// Time accumulated since the last move; `None` until the first move.
    pub since_last_move: Option<Duration>,
    /// Whether the enemy moved on its last eligible step.
    pub moving: bool,
}

impl Enemy {
    /// Creates an enemy that is immediately eligible to move.
    #[must_use]
    pub fn new(id: EnemyId, position: GridCoord, kind: EnemyKind) -> Self {
        Self {
            id,
            position,
            target: position,
            speed: kind.speed(),
            kind,
            since_last_move: None,
            moving: false,
        }
    }

    /// Reports whether at least `interval` elapsed since the enemy last moved.
    #[must_use]
    pub fn is_ready(&self, interval: Duration) -> bool {
        self.since_last_move
            .map_or(true, |elapsed| elapsed >= interval)
    }
}

/// Outcome of planning a single enemy move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyStep {
    /// Enemy the step applies to.
    pub enemy: EnemyId,
    /// Cell the enemy moves to; equal to its position when it stays put.
    pub to: GridCoord,
    /// Cell the policy aimed at.
    pub target: GridCoord,
}

/// Phase of the game state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Waiting for the player to choose a topic.
    #[default]
    TopicSelection,
    /// Content for a dynamic topic is being generated.
    Loading,
    /// Level in progress.
    Playing,
    /// Level suspended by the player or a level-complete beat.
    Paused,
    /// Play-through ended.
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TopicSelection => "topic_selection",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::GameOver => "game_over",
        };
        f.write_str(label)
    }
}

/// Presentation style requested from the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderMode {
    /// Flat tile layer.
    TwoD,
    /// Scene graph.
    #[default]
    ThreeD,
}

impl RenderMode {
    /// The other render mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::TwoD => Self::ThreeD,
            Self::ThreeD => Self::TwoD,
        }
    }
}

/// Sound effects requested from the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player moved.
    PlayerMove,
    /// Correct cell munched.
    Munch,
    /// Wrong cell munched or player caught.
    Hit,
    /// Level completed.
    Success,
    /// Enemy moved.
    EnemyMove,
}

/// Topics available for selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicId {
    /// Arithmetic challenges.
    Math,
    /// Vocabulary challenges.
    Words,
    /// Marvel universe trivia.
    Marvel,
    /// Movie trivia.
    Movies,
    /// Player supplied topic backed by the content service.
    Custom,
}

impl TopicId {
    /// Every selectable topic.
    pub const ALL: [TopicId; 5] = [
        TopicId::Math,
        TopicId::Words,
        TopicId::Marvel,
        TopicId::Movies,
        TopicId::Custom,
    ];

    /// Stable identifier used on the command line and in preferences.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Words => "words",
            Self::Marvel => "marvel",
            Self::Movies => "movies",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown topic identifier.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown topic `{0}`")]
pub struct UnknownTopic(pub String);

impl FromStr for TopicId {
    type Err = UnknownTopic;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownTopic(value.to_owned()))
    }
}

/// Reasons a custom topic name is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopicRejection {
    /// Fewer than two characters after trimming.
    #[error("topic must be at least 2 characters long")]
    TooShort,
    /// More than fifty characters after trimming.
    #[error("topic must be at most 50 characters long")]
    TooLong,
    /// Only digits.
    #[error("topic cannot be only numbers")]
    NumbersOnly,
    /// No alphabetic character.
    #[error("topic must contain letters")]
    NoLetters,
    /// Contains a blocked word.
    #[error("please choose an appropriate topic")]
    Inappropriate,
}

/// Read-only view of the playfield consumed by systems.
#[derive(Clone, Copy, Debug)]
pub struct PlayfieldView<'a> {
    phase: GamePhase,
    level: Level,
    size: GridSize,
    player: &'a Player,
    enemies: &'a [Enemy],
}

impl<'a> PlayfieldView<'a> {
    /// Captures a view over the provided state.
    #[must_use]
    pub const fn new(
        phase: GamePhase,
        level: Level,
        size: GridSize,
        player: &'a Player,
        enemies: &'a [Enemy],
    ) -> Self {
        Self {
            phase,
            level,
            size,
            player,
            enemies,
        }
    }

    /// Current game phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Current level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Dimensions of the active grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// The player's avatar.
    #[must_use]
    pub const fn player(&self) -> &'a Player {
        self.player
    }

    /// Enemies in deterministic spawn order.
    #[must_use]
    pub const fn enemies(&self) -> &'a [Enemy] {
        self.enemies
    }
}

/// Commands that express all permissible world mutations.
#[derive(Debug)]
pub enum Command {
    /// Selects a topic, or returns to topic selection when `None`.
    SelectTopic {
        /// Topic to play; `None` returns to the menu.
        topic: Option<TopicId>,
    },
    /// Stores the sub-category applied whenever `topic` is selected.
    SetCategoryPreference {
        /// Topic the preference belongs to.
        topic: TopicId,
        /// Category identifier passed to the provider.
        category: String,
    },
    /// Validates and stores the name used by the custom topic.
    SetCustomTopic {
        /// Raw topic text entered by the player.
        text: String,
    },
    /// Generates content for the current level of the selected topic.
    StartGame,
    /// Resets the play-through and re-selects the previous topic.
    RestartGame,
    /// Toggles between playing and paused.
    TogglePause,
    /// Flips between the 2D and 3D renderers.
    ToggleRenderMode,
    /// Picks the grid size used for subsequent levels.
    ConfigureViewport {
        /// Viewport width in pixels.
        width_px: u32,
    },
    /// Moves the player to the provided cell.
    MovePlayer {
        /// Requested column; may be out of bounds.
        column: i64,
        /// Requested row; may be out of bounds.
        row: i64,
    },
    /// Munches the cell under the player.
    MunchCurrentCell,
    /// Advances the world clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Commits planned moves for enemies that were eligible this tick.
    AdvanceEnemies {
        /// Planned steps in enemy order.
        steps: Vec<EnemyStep>,
    },
    /// Reports that an enemy reached the player's cell.
    PlayerCaught {
        /// Enemy that caught the player.
        enemy: EnemyId,
    },
    /// Spawns the level's enemies if none are alive.
    SpawnEnemies,
    /// Hands finished content generation back to the world.
    CompleteGeneration {
        /// Outcome of the generation job.
        result: GenerationResult,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The game phase changed.
    PhaseChanged {
        /// Phase before the transition.
        from: GamePhase,
        /// Phase after the transition.
        to: GamePhase,
    },
    /// A topic was selected or cleared.
    TopicSelected {
        /// Selected topic, `None` when returning to the menu.
        topic: Option<TopicId>,
    },
    /// A custom topic name was refused.
    CustomTopicRejected {
        /// Why the name was refused.
        reason: TopicRejection,
    },
    /// Content generation was handed off to a background job.
    GenerationRequested {
        /// Ticket the completion must carry.
        ticket: GenerationTicket,
    },
    /// The active provider could not produce content.
    GenerationFailed {
        /// Topic whose provider failed.
        topic: TopicId,
        /// Message suitable for a toast.
        message: String,
    },
    /// A level started with fresh content.
    LevelStarted {
        /// Level now being played.
        level: Level,
        /// Challenge description.
        challenge: String,
    },
    /// Simulated time advanced while playing.
    TimeAdvanced {
        /// Elapsed duration.
        dt: Duration,
    },
    /// The player moved.
    PlayerMoved {
        /// Previous cell.
        from: GridCoord,
        /// New cell.
        to: GridCoord,
    },
    /// A cell was munched.
    CellMunched {
        /// Munched cell.
        cell: GridCoord,
        /// Whether the value satisfied the challenge.
        correct: bool,
    },
    /// The score changed.
    ScoreChanged {
        /// New score.
        score: u32,
    },
    /// The number of lives changed.
    LivesChanged {
        /// Remaining lives.
        lives: u32,
    },
    /// Every correct cell was munched.
    LevelCompleted {
        /// Level that was completed.
        level: Level,
        /// Bonus score awarded.
        bonus: u32,
    },
    /// Enemies were spawned for the level.
    EnemiesSpawned {
        /// Number of enemies created.
        count: usize,
    },
    /// An enemy moved.
    EnemyMoved {
        /// Enemy that moved.
        enemy: EnemyId,
        /// Previous cell.
        from: GridCoord,
        /// New cell.
        to: GridCoord,
    },
    /// An enemy caught the player.
    PlayerCaught {
        /// Enemy responsible.
        enemy: EnemyId,
    },
    /// A sound effect should be played.
    SoundRequested {
        /// Cue to play.
        cue: SoundCue,
    },
    /// The render mode changed.
    RenderModeChanged {
        /// Active mode.
        mode: RenderMode,
    },
}
