//! Grid geometry and answer cells.

use serde::{Deserialize, Serialize};

use crate::GridCoord;

const MOBILE_BREAKPOINT_PX: u32 = 640;
const SMALL_TABLET_BREAKPOINT_PX: u32 = 768;
const TABLET_BREAKPOINT_PX: u32 = 1024;

/// Dimensions of the answer grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Grid used on desktop-sized viewports.
    pub const DESKTOP: GridSize = GridSize::new(8, 6);

    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Selects the grid dimensions for a viewport of the provided pixel width.
    ///
    /// Narrow viewports receive fewer, larger tiles.
    #[must_use]
    pub const fn for_viewport(width_px: u32) -> Self {
        if width_px < MOBILE_BREAKPOINT_PX {
            Self::new(5, 4)
        } else if width_px < SMALL_TABLET_BREAKPOINT_PX {
            Self::new(6, 5)
        } else if width_px < TABLET_BREAKPOINT_PX {
            Self::new(7, 5)
        } else {
            Self::DESKTOP
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells addressed by the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.width) * u64::from(self.height);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: GridCoord) -> bool {
        coord.column() < self.width && coord.row() < self.height
    }

    /// Reports whether the signed coordinate pair lies inside the grid.
    #[must_use]
    pub fn contains_signed(&self, column: i64, row: i64) -> bool {
        column >= 0 && row >= 0 && column < i64::from(self.width) && row < i64::from(self.height)
    }

    /// Cell at the centre of the grid, rounding toward the origin.
    #[must_use]
    pub const fn center(&self) -> GridCoord {
        GridCoord::new(self.width / 2, self.height / 2)
    }

    /// Clamps a signed coordinate pair into the grid bounds.
    ///
    /// A zero-sized grid clamps everything onto the origin.
    #[must_use]
    pub fn clamp(&self, column: i64, row: i64) -> GridCoord {
        let max_column = i64::from(self.width.saturating_sub(1));
        let max_row = i64::from(self.height.saturating_sub(1));
        let column = column.clamp(0, max_column);
        let row = row.clamp(0, max_row);
        GridCoord::new(
            u32::try_from(column).unwrap_or(0),
            u32::try_from(row).unwrap_or(0),
        )
    }

    /// Iterates every coordinate of the grid in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> {
        let width = self.width;
        (0..self.height)
            .flat_map(move |row| (0..width).map(move |column| GridCoord::new(column, row)))
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DESKTOP
    }
}

/// A single grid position holding either an answer value or nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    value: String,
    correct: bool,
    munched: bool,
    empty: bool,
}

impl GridCell {
    /// Creates an explicit empty cell that carries no value.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            value: String::new(),
            correct: false,
            munched: false,
            empty: true,
        }
    }

    /// Creates a filled answer cell.
    ///
    /// `correct` is fixed for the lifetime of the grid.
    #[must_use]
    pub fn filled(value: impl Into<String>, correct: bool) -> Self {
        Self {
            value: value.into(),
            correct,
            munched: false,
            empty: false,
        }
    }

    /// Answer text displayed on the cell.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value satisfied the challenge when the grid was generated.
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        self.correct
    }

    /// Whether the cell has been munched.
    #[must_use]
    pub const fn is_munched(&self) -> bool {
        self.munched
    }

    /// Whether the cell is an explicit empty cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.empty
    }

    /// Marks the cell as munched, returning `true` if this changed its state.
    ///
    /// Empty cells can never be munched and munched cells stay munched.
    pub fn mark_munched(&mut self) -> bool {
        if self.empty || self.munched {
            return false;
        }
        self.munched = true;
        true
    }
}

/// Rectangular matrix of [`GridCell`] values stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: GridSize,
    cells: Vec<GridCell>,
}

impl Grid {
    /// Creates a grid of the provided size where every cell is empty.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![GridCell::empty(); size.cell_count()],
        }
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size.width()
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size.height()
    }

    /// Returns the cell at the provided coordinate, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, coord: GridCoord) -> Option<&GridCell> {
        self.size.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Returns a mutable reference to the cell at the provided coordinate.
    pub fn cell_mut(&mut self, coord: GridCoord) -> Option<&mut GridCell> {
        self.size
            .index(coord)
            .and_then(|index| self.cells.get_mut(index))
    }

    /// Replaces the cell at `coord`, returning `false` when out of bounds.
    pub fn place(&mut self, coord: GridCoord, cell: GridCell) -> bool {
        match self.cell_mut(coord) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Iterates the rows of the grid from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        let width = usize::try_from(self.size.width()).unwrap_or(0).max(1);
        self.cells.chunks(width)
    }

    /// Iterates every cell together with its coordinate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &GridCell)> {
        self.size.coords().zip(self.cells.iter())
    }

    /// Number of cells that carry a value.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Number of filled cells marked correct.
    #[must_use]
    pub fn correct_total(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| !cell.is_empty() && cell.is_correct())
            .count()
    }

    /// Number of correct cells that have not been munched yet.
    #[must_use]
    pub fn correct_remaining(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| !cell.is_empty() && cell.is_correct() && !cell.is_munched())
            .count()
    }

    /// Reports whether the backing storage matches the declared dimensions.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.size.cell_count()
            && self
                .cells
                .iter()
                .all(|cell| cell.is_empty() || !cell.value().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_breakpoints_select_expected_sizes() {
        assert_eq!(GridSize::for_viewport(375), GridSize::new(5, 4));
        assert_eq!(GridSize::for_viewport(640), GridSize::new(6, 5));
        assert_eq!(GridSize::for_viewport(800), GridSize::new(7, 5));
        assert_eq!(GridSize::for_viewport(1024), GridSize::new(8, 6));
        assert_eq!(GridSize::for_viewport(2560), GridSize::DESKTOP);
    }

    #[test]
    fn clamp_keeps_coordinates_inside_bounds() {
        let size = GridSize::new(8, 6);
        assert_eq!(size.clamp(-3, 2), GridCoord::new(0, 2));
        assert_eq!(size.clamp(12, 9), GridCoord::new(7, 5));
        assert_eq!(size.clamp(4, 3), GridCoord::new(4, 3));
    }

    #[test]
    fn new_grid_is_fully_populated_with_empty_cells() {
        let grid = Grid::new(GridSize::new(5, 4));
        assert_eq!(grid.rows().count(), 4);
        assert!(grid.rows().all(|row| row.len() == 5));
        assert!(grid.iter().all(|(_, cell)| cell.is_empty()));
        assert!(grid.is_well_formed());
    }

    #[test]
    fn munching_is_monotonic_and_ignores_empty_cells() {
        let mut cell = GridCell::filled("9", true);
        assert!(cell.mark_munched());
        assert!(!cell.mark_munched(), "second munch must be a no-op");
        assert!(cell.is_munched());

        let mut empty = GridCell::empty();
        assert!(!empty.mark_munched());
        assert!(!empty.is_munched());
    }

    #[test]
    fn correct_counters_track_munched_cells() {
        let mut grid = Grid::new(GridSize::new(2, 2));
        assert!(grid.place(GridCoord::new(0, 0), GridCell::filled("3", true)));
        assert!(grid.place(GridCoord::new(1, 0), GridCell::filled("6", true)));
        assert!(grid.place(GridCoord::new(0, 1), GridCell::filled("7", false)));
        assert!(!grid.place(GridCoord::new(2, 0), GridCell::filled("9", true)));

        assert_eq!(grid.correct_total(), 2);
        assert_eq!(grid.correct_remaining(), 2);
        assert!(grid
            .cell_mut(GridCoord::new(1, 0))
            .map(GridCell::mark_munched)
            .unwrap_or(false));
        assert_eq!(grid.correct_remaining(), 1);
        assert_eq!(grid.filled_count(), 3);
    }
}
