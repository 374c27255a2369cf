//! Grid population helpers shared by every provider.

use munch_core::{Challenge, Grid, GridCell, GridCoord, GridSize};
use rand::{seq::SliceRandom, Rng};

/// Number of correct answers aimed for in a grid of `cells` cells.
pub(crate) const fn correct_target(cells: usize) -> usize {
    cells * 3 / 10
}

/// Shuffles `values` and assigns them to shuffled positions of a fresh grid.
///
/// Cell correctness is computed against `challenge` at placement time. Values
/// beyond the cell count are dropped.
pub(crate) fn place_shuffled<R: Rng>(
    size: GridSize,
    mut values: Vec<String>,
    challenge: &Challenge,
    rng: &mut R,
) -> Grid {
    values.shuffle(rng);
    let mut positions: Vec<GridCoord> = size.coords().collect();
    positions.shuffle(rng);

    let mut grid = Grid::new(size);
    for (coord, value) in positions.into_iter().zip(values) {
        let correct = challenge.check_answer(&value);
        let _ = grid.place(coord, GridCell::filled(value, correct));
    }
    grid
}

/// Draws `count` values from `pool` that fail `challenge`.
///
/// Candidates are used once each in random order; when they run out the pool
/// is reshuffled and reused.
pub(crate) fn draw_distractors<R: Rng>(
    pool: &[&str],
    challenge: &Challenge,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let candidates: Vec<&str> = pool
        .iter()
        .copied()
        .filter(|value| !challenge.check_answer(value))
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut drawn = Vec::with_capacity(count);
    while drawn.len() < count {
        let mut round = candidates.clone();
        round.shuffle(rng);
        drawn.extend(
            round
                .into_iter()
                .take(count - drawn.len())
                .map(str::to_owned),
        );
    }
    drawn
}

/// Repeats entries of `values` until it holds `target` values.
///
/// Entries failing `challenge` are repeated first so the correct density is
/// not inflated; an empty list stays empty.
pub(crate) fn recycle_to(values: &mut Vec<String>, target: usize, challenge: &Challenge) {
    if values.len() >= target || values.is_empty() {
        return;
    }
    let mut source: Vec<String> = values
        .iter()
        .filter(|value| !challenge.check_answer(value))
        .cloned()
        .collect();
    if source.is_empty() {
        source = values.clone();
    }
    for value in source.iter().cycle() {
        if values.len() >= target {
            break;
        }
        values.push(value.clone());
    }
}

/// Picks every entry of `pool` satisfying `challenge`, shuffled, up to `limit`.
pub(crate) fn draw_correct<R: Rng>(
    pool: &[&str],
    challenge: &Challenge,
    limit: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut matches: Vec<String> = pool
        .iter()
        .filter(|value| challenge.check_answer(value))
        .map(|value| (*value).to_owned())
        .collect();
    matches.shuffle(rng);
    matches.truncate(limit);
    matches
}

/// Fills a grid with up to 30% correct answers and distractors from the pools.
pub(crate) fn fill_from_pools<R: Rng>(
    size: GridSize,
    challenge: &Challenge,
    correct_pool: &[&str],
    distractor_pool: &[&str],
    correct_limit: usize,
    rng: &mut R,
) -> Grid {
    let cells = size.cell_count();
    let mut values = draw_correct(correct_pool, challenge, correct_limit, rng);
    let needed = cells.saturating_sub(values.len());
    values.extend(draw_distractors(distractor_pool, challenge, needed, rng));
    recycle_to(&mut values, cells, challenge);
    place_shuffled(size, values, challenge, rng)
}
