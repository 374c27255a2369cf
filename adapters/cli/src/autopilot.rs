//! Input source that plays the game without a human.

use std::time::Duration;

use munch_core::{Challenge, Command, Enemy, GamePhase, Grid, GridCoord, Player};
use munch_world::{query, World};

/// Walks toward the nearest cell that satisfies the challenge and munches it.
///
/// Actions are debounced the way a keyboard handler would be, so the player
/// acts at most once per `debounce` of simulated time.
#[derive(Debug)]
pub(crate) struct Autopilot {
    debounce: Duration,
    since_action: Duration,
}

impl Autopilot {
    pub(crate) fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            since_action: debounce,
        }
    }

    /// Advances the debounce clock by `dt` and queues at most one action.
    pub(crate) fn handle(&mut self, dt: Duration, world: &World, out: &mut Vec<Command>) {
        self.since_action = self.since_action.saturating_add(dt);
        if query::phase(world) != GamePhase::Playing || self.since_action < self.debounce {
            return;
        }
        let Some(challenge) = query::challenge(world) else {
            return;
        };
        if let Some(command) = next_action(
            query::grid(world),
            challenge,
            query::player(world),
            query::enemies(world),
        ) {
            self.since_action = Duration::ZERO;
            out.push(command);
        }
    }
}

fn next_action(
    grid: &Grid,
    challenge: &Challenge,
    player: &Player,
    enemies: &[Enemy],
) -> Option<Command> {
    let wanted = |coord: GridCoord| {
        grid.cell(coord).is_some_and(|cell| {
            !cell.is_empty() && !cell.is_munched() && challenge.check_answer(cell.value())
        })
    };
    if wanted(player.position) {
        return Some(Command::MunchCurrentCell);
    }

    let goal = grid
        .iter()
        .map(|(coord, _)| coord)
        .filter(|coord| wanted(*coord))
        .min_by_key(|coord| coord.manhattan_distance(player.position))?;

    let occupied = |coord: GridCoord| enemies.iter().any(|enemy| enemy.position == coord);
    let here = (
        i64::from(player.position.column()),
        i64::from(player.position.row()),
    );
    let dx = (i64::from(goal.column()) - here.0).signum();
    let dy = (i64::from(goal.row()) - here.1).signum();
    let horizontal = (here.0 + dx, here.1);
    let vertical = (here.0, here.1 + dy);
    let preferred = if dx != 0 {
        [horizontal, vertical]
    } else {
        [vertical, horizontal]
    };

    let (column, row) = preferred
        .into_iter()
        .filter(|step| *step != here)
        .find(|(column, row)| !occupied(grid.size().clamp(*column, *row)))
        .unwrap_or(preferred[0]);
    Some(Command::MovePlayer { column, row })
}

#[cfg(test)]
mod tests {
    use super::*;
    use munch_core::{EnemyId, EnemyKind, GridCell, GridSize};

    fn grid() -> Grid {
        let mut grid = Grid::new(GridSize::new(5, 4));
        for coord in GridSize::new(5, 4).coords() {
            let value = if coord == GridCoord::new(4, 0) { "9" } else { "7" };
            let _ = grid.place(coord, GridCell::filled(value, value == "9"));
        }
        grid
    }

    fn nines() -> Challenge {
        Challenge::new("nines", |value| value == "9")
    }

    #[test]
    fn munches_when_standing_on_an_answer() {
        let player = Player::at(GridCoord::new(4, 0));
        assert!(matches!(
            next_action(&grid(), &nines(), &player, &[]),
            Some(Command::MunchCurrentCell)
        ));
    }

    #[test]
    fn steps_toward_the_nearest_answer() {
        let player = Player::at(GridCoord::new(1, 2));
        assert!(matches!(
            next_action(&grid(), &nines(), &player, &[]),
            Some(Command::MovePlayer { column: 2, row: 2 })
        ));
    }

    #[test]
    fn sidesteps_an_enemy_in_the_way() {
        let player = Player::at(GridCoord::new(1, 2));
        let enemy = Enemy::new(EnemyId::new(0), GridCoord::new(2, 2), EnemyKind::Basic);
        assert!(matches!(
            next_action(&grid(), &nines(), &player, &[enemy]),
            Some(Command::MovePlayer { column: 1, row: 1 })
        ));
    }

    #[test]
    fn idles_once_everything_is_munched() {
        let mut grid = grid();
        if let Some(cell) = grid.cell_mut(GridCoord::new(4, 0)) {
            let _ = cell.mark_munched();
        }
        let player = Player::at(GridCoord::new(0, 0));
        assert!(next_action(&grid, &nines(), &player, &[]).is_none());
    }
}
