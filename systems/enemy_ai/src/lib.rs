#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement policies for the enemies that chase the player.
//!
//! Every policy moves at most one cell along a cardinal axis per step. The
//! axis is chosen by comparing the distance to the goal: the longer axis wins
//! and ties favour vertical movement.

use std::time::Duration;

use munch_core::{Direction, Enemy, EnemyKind, EnemyStep, GridCoord, GridSize, Level, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const BASE_MOVE_INTERVAL: Duration = Duration::from_millis(2_000);
const MIN_MOVE_INTERVAL: Duration = Duration::from_millis(500);
const INTERVAL_STEP: Duration = Duration::from_millis(100);
const MAX_SPEEDUP_LEVELS: u32 = 15;
const CHASE_PROBABILITY: f64 = 0.7;
const PREDICTION_STEPS: i32 = 2;

/// Minimum time between two moves of the same enemy on `level`.
#[must_use]
pub fn move_interval(level: Level) -> Duration {
    let speedup = INTERVAL_STEP * level.get().saturating_sub(1).min(MAX_SPEEDUP_LEVELS);
    BASE_MOVE_INTERVAL
        .saturating_sub(speedup)
        .max(MIN_MOVE_INTERVAL)
}

/// Plans enemy moves using a seeded random source.
#[derive(Debug)]
pub struct EnemyAi {
    rng: ChaCha8Rng,
}

impl EnemyAi {
    /// Creates a planner whose random choices derive from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Plans the next step of `enemy` according to its archetype.
    pub fn plan(&mut self, enemy: &Enemy, player: &Player, size: GridSize) -> EnemyStep {
        let (to, target) = match enemy.kind {
            EnemyKind::Basic => {
                let to = if self.rng.gen_bool(CHASE_PROBABILITY) {
                    step_toward(enemy.position, player.position)
                } else {
                    self.wander(enemy.position, size)
                };
                (to, to)
            }
            EnemyKind::Fast => (
                step_toward(enemy.position, player.position),
                player.position,
            ),
            EnemyKind::Smart => {
                let prediction = predict(player, size);
                (step_toward(enemy.position, prediction), prediction)
            }
        };
        EnemyStep {
            enemy: enemy.id,
            to: size.clamp(i64::from(to.column()), i64::from(to.row())),
            target,
        }
    }

    fn wander(&mut self, from: GridCoord, size: GridSize) -> GridCoord {
        let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        let (column, row) = from.offset(direction.delta());
        size.clamp(column, row)
    }
}

impl Default for EnemyAi {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Cell the player will reach after repeating their last move twice, clamped
/// to the grid. A stationary player is predicted to stay put.
fn predict(player: &Player, size: GridSize) -> GridCoord {
    if !player.moving {
        return player.position;
    }
    let (column, row) = player
        .position
        .offset(player.last_move.scaled(PREDICTION_STEPS));
    size.clamp(column, row)
}

/// One cardinal step from `from` toward `goal`.
fn step_toward(from: GridCoord, goal: GridCoord) -> GridCoord {
    let dx = i64::from(goal.column()) - i64::from(from.column());
    let dy = i64::from(goal.row()) - i64::from(from.row());
    let (column, row) = (i64::from(from.column()), i64::from(from.row()));
    let (column, row) = if dx.abs() > dy.abs() {
        (column + dx.signum(), row)
    } else if dy != 0 {
        (column, row + dy.signum())
    } else {
        (column, row)
    };
    GridCoord::new(
        u32::try_from(column).unwrap_or(from.column()),
        u32::try_from(row).unwrap_or(from.row()),
    )
}
