//! Enemy spawn slots and level roster.

use munch_core::{Enemy, EnemyId, EnemyKind, GridCoord, GridSize, Level};

const MAX_ENEMIES: u32 = 4;

/// Number of enemies spawned at the start of `level`.
pub(crate) const fn enemy_count(level: Level) -> usize {
    let count = 1 + level.get() / 3;
    if count > MAX_ENEMIES {
        MAX_ENEMIES as usize
    } else {
        count as usize
    }
}

/// Spawn slots in priority order: corners, top and bottom midpoints, then left
/// and right midpoints.
fn slots(size: GridSize) -> [GridCoord; 8] {
    let last_column = size.width().saturating_sub(1);
    let last_row = size.height().saturating_sub(1);
    let mid_column = size.width() / 2;
    let mid_row = size.height() / 2;
    [
        GridCoord::new(0, 0),
        GridCoord::new(last_column, 0),
        GridCoord::new(0, last_row),
        GridCoord::new(last_column, last_row),
        GridCoord::new(mid_column, 0),
        GridCoord::new(mid_column, last_row),
        GridCoord::new(0, mid_row),
        GridCoord::new(last_column, mid_row),
    ]
}

/// Creates the enemies for `level` on a grid of `size`.
pub(crate) fn roster(level: Level, size: GridSize) -> Vec<Enemy> {
    let slots = slots(size);
    (0..enemy_count(level))
        .map(|index| {
            let id = EnemyId::new(u32::try_from(index).unwrap_or(u32::MAX));
            Enemy::new(id, slots[index % slots.len()], EnemyKind::for_spawn(level, index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_count_grows_every_third_level() {
        let counts: Vec<usize> = (1..=12).map(|level| enemy_count(Level::new(level))).collect();
        assert_eq!(counts, [1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 4]);
    }

    #[test]
    fn roster_fills_corners_first() {
        let enemies = roster(Level::new(9), GridSize::DESKTOP);
        let positions: Vec<GridCoord> = enemies.iter().map(|enemy| enemy.position).collect();
        assert_eq!(
            positions,
            [
                GridCoord::new(0, 0),
                GridCoord::new(7, 0),
                GridCoord::new(0, 5),
                GridCoord::new(7, 5),
            ]
        );
        assert_eq!(enemies[3].id.to_string(), "enemy-3");
        assert!(enemies.iter().all(|enemy| enemy.kind == EnemyKind::Fast
            || enemy.kind == EnemyKind::Smart));
    }

    #[test]
    fn early_levels_only_spawn_basic_enemies() {
        let enemies = roster(Level::new(3), GridSize::new(5, 4));
        assert_eq!(enemies.len(), 2);
        assert!(enemies.iter().all(|enemy| enemy.kind == EnemyKind::Basic));
        assert_eq!(enemies[1].position, GridCoord::new(4, 0));
    }
}
