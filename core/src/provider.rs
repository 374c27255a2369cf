//! Topic provider contract and the generation job protocol.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Challenge, Grid, GridSize, Level, TopicId};

/// Sub-topic filter offered by a provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier passed to [`TopicProvider::set_category`].
    pub id: String,
    /// Display name shown to the player.
    pub name: String,
}

impl Category {
    /// Creates a new category descriptor.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Failure reported by a provider once every fallback has been exhausted.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TopicError {
    /// The provider could not produce content for the topic.
    #[error("topic generation failed: {0}")]
    GenerationFailed(String),
    /// The provider returned a grid whose shape does not match the request.
    #[error("generated grid is malformed: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    MalformedGrid {
        /// Requested number of columns.
        expected_width: u32,
        /// Requested number of rows.
        expected_height: u32,
        /// Columns present in the returned grid.
        actual_width: u32,
        /// Rows present in the returned grid.
        actual_height: u32,
    },
}

/// Pluggable source of challenges and grids for a subject domain.
pub trait TopicProvider: Send {
    /// Display name of the topic.
    fn name(&self) -> String;

    /// Sub-topic filters supported by the provider.
    fn categories(&self) -> Vec<Category>;

    /// Restricts future challenges to the provided category.
    fn set_category(&mut self, category: &str);

    /// Whether generation may touch external services and must run off the game loop.
    fn requires_loading(&self) -> bool {
        false
    }

    /// Produces the challenge for the provided level.
    fn generate_challenge(&mut self, level: Level) -> Result<Challenge, TopicError>;

    /// Produces a fully populated grid for `challenge`.
    fn generate_grid(&mut self, size: GridSize, challenge: &Challenge) -> Result<Grid, TopicError>;
}

/// Source of fresh providers for the selectable topics.
pub trait ProviderFactory: Send {
    /// Instantiates the provider for `topic`; `custom_topic` names the subject of
    /// [`TopicId::Custom`].
    fn create(&mut self, topic: TopicId, custom_topic: &str) -> Box<dyn TopicProvider>;
}

/// Challenge and grid generated together for one level.
#[derive(Clone, Debug)]
pub struct LevelContent {
    /// Challenge governing the grid.
    pub challenge: Challenge,
    /// Grid whose cell correctness was computed against `challenge`.
    pub grid: Grid,
}

/// Runs both halves of the provider contract and validates the resulting grid.
pub fn generate_level(
    provider: &mut dyn TopicProvider,
    level: Level,
    size: GridSize,
) -> Result<LevelContent, TopicError> {
    let challenge = provider.generate_challenge(level)?;
    let grid = provider.generate_grid(size, &challenge)?;
    if grid.size() != size || !grid.is_well_formed() {
        return Err(TopicError::MalformedGrid {
            expected_width: size.width(),
            expected_height: size.height(),
            actual_width: grid.width(),
            actual_height: grid.height(),
        });
    }
    Ok(LevelContent { challenge, grid })
}

/// Identifies one content generation request.
///
/// The world only adopts a completion whose ticket matches the request it is
/// still waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    /// Creates a ticket for the provided epoch.
    #[must_use]
    pub const fn new(epoch: u64) -> Self {
        Self(epoch)
    }

    /// Epoch the ticket was issued for.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.0
    }
}

/// Generation work checked out of the world together with the provider that performs it.
pub struct GenerationJob {
    ticket: GenerationTicket,
    level: Level,
    size: GridSize,
    provider: Box<dyn TopicProvider>,
}

impl GenerationJob {
    /// Bundles a provider with the level and grid size it must generate.
    #[must_use]
    pub fn new(
        ticket: GenerationTicket,
        level: Level,
        size: GridSize,
        provider: Box<dyn TopicProvider>,
    ) -> Self {
        Self {
            ticket,
            level,
            size,
            provider,
        }
    }

    /// Ticket identifying the request.
    #[must_use]
    pub const fn ticket(&self) -> GenerationTicket {
        self.ticket
    }

    /// Level content is generated for.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Executes the provider, returning it alongside the outcome.
    #[must_use]
    pub fn run(mut self) -> GenerationResult {
        let outcome = generate_level(self.provider.as_mut(), self.level, self.size);
        GenerationResult {
            ticket: self.ticket,
            provider: self.provider,
            outcome,
        }
    }
}

impl fmt::Debug for GenerationJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationJob")
            .field("ticket", &self.ticket)
            .field("level", &self.level)
            .field("size", &self.size)
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Completed generation handed back to the world.
pub struct GenerationResult {
    /// Ticket of the request that produced the result.
    pub ticket: GenerationTicket,
    /// Provider returned to the world for subsequent levels.
    pub provider: Box<dyn TopicProvider>,
    /// Generated content or the terminal failure.
    pub outcome: Result<LevelContent, TopicError>,
}

impl fmt::Debug for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationResult")
            .field("ticket", &self.ticket)
            .field("provider", &self.provider.name())
            .field("outcome", &self.outcome)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GridCell, GridCoord};

    struct FixedProvider {
        grid_size: Option<GridSize>,
    }

    impl TopicProvider for FixedProvider {
        fn name(&self) -> String {
            "Fixed".to_owned()
        }

        fn categories(&self) -> Vec<Category> {
            vec![Category::new("random", "Random Mix")]
        }

        fn set_category(&mut self, _category: &str) {}

        fn generate_challenge(&mut self, _level: Level) -> Result<Challenge, TopicError> {
            Ok(Challenge::new("Munch the letter a", |value| value == "a"))
        }

        fn generate_grid(
            &mut self,
            size: GridSize,
            challenge: &Challenge,
        ) -> Result<Grid, TopicError> {
            let size = self.grid_size.unwrap_or(size);
            let mut grid = Grid::new(size);
            for coord in size.coords() {
                let value = if coord.column() == 0 { "a" } else { "b" };
                let _ = grid.place(
                    coord,
                    GridCell::filled(value, challenge.check_answer(value)),
                );
            }
            Ok(grid)
        }
    }

    #[test]
    fn job_returns_provider_with_outcome() {
        let job = GenerationJob::new(
            GenerationTicket::new(7),
            Level::FIRST,
            GridSize::new(3, 2),
            Box::new(FixedProvider { grid_size: None }),
        );
        let result = job.run();
        assert_eq!(result.ticket, GenerationTicket::new(7));
        assert_eq!(result.provider.name(), "Fixed");
        let content = result.outcome.expect("fixed provider always succeeds");
        assert_eq!(content.grid.correct_total(), 2);
        assert!(content
            .grid
            .cell(GridCoord::new(0, 1))
            .map_or(false, GridCell::is_correct));
    }

    #[test]
    fn mismatched_grid_is_reported_as_malformed() {
        let mut provider = FixedProvider {
            grid_size: Some(GridSize::new(2, 2)),
        };
        let error = generate_level(&mut provider, Level::FIRST, GridSize::new(5, 4))
            .expect_err("grid size mismatch must be rejected");
        assert!(matches!(error, TopicError::MalformedGrid { .. }));
    }
}
