//! Plain-text rendering of the answer grid.

use std::fmt::Write as _;

use munch_core::{Enemy, Grid, GridCoord, Player};

const CELL_WIDTH: usize = 12;

/// Renders `grid` as one text row per grid row.
///
/// Markers: `@` player, `!` enemy, `*` munched, `.` empty.
pub(crate) fn render(grid: &Grid, player: Option<&Player>, enemies: &[Enemy]) -> String {
    let mut out = String::new();
    let separator = format!(
        "+{}\n",
        format!("{}+", "-".repeat(CELL_WIDTH)).repeat(grid.width() as usize)
    );
    out.push_str(&separator);
    for row in 0..grid.height() {
        out.push('|');
        for column in 0..grid.width() {
            let coord = GridCoord::new(column, row);
            let text = label(grid, coord, player, enemies);
            let _ = write!(out, "{text:^width$}|", width = CELL_WIDTH);
        }
        out.push('\n');
        out.push_str(&separator);
    }
    out
}

fn label(grid: &Grid, coord: GridCoord, player: Option<&Player>, enemies: &[Enemy]) -> String {
    let marker = if player.is_some_and(|player| player.position == coord) {
        '@'
    } else if enemies.iter().any(|enemy| enemy.position == coord) {
        '!'
    } else {
        ' '
    };
    let Some(cell) = grid.cell(coord) else {
        return marker.to_string();
    };
    if cell.is_empty() {
        return format!("{marker}.");
    }
    let value: String = cell.value().chars().take(CELL_WIDTH - 3).collect();
    let munched = if cell.is_munched() { "*" } else { "" };
    format!("{marker}{value}{munched}").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use munch_core::{EnemyId, EnemyKind, GridCell, GridSize};

    #[test]
    fn markers_show_actors_and_munched_cells() {
        let mut grid = Grid::new(GridSize::new(3, 1));
        let _ = grid.place(GridCoord::new(0, 0), GridCell::filled("9", true));
        let _ = grid.place(GridCoord::new(1, 0), GridCell::filled("Thunderstorm Warning", false));
        if let Some(cell) = grid.cell_mut(GridCoord::new(0, 0)) {
            let _ = cell.mark_munched();
        }
        let player = Player::at(GridCoord::new(0, 0));
        let enemy = Enemy::new(EnemyId::new(0), GridCoord::new(2, 0), EnemyKind::Basic);

        let board = render(&grid, Some(&player), &[enemy]);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], lines[2]);
        assert!(lines[1].contains("@9*"));
        assert!(lines[1].contains("Thunderst"));
        assert!(!lines[1].contains("Thunderstorm"));
        assert!(lines[1].contains("!."));
    }
}
