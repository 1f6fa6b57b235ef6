//! # Cellular Automaton
//!
//! Random fill and majority-rule smoothing.
//!
//! ## The Rule
//!
//! For every cell, count the walls among its 8 neighbors (cells outside the
//! grid count as walls):
//!
//! | walls | next state |
//! |-------|------------|
//! | > 4   | wall       |
//! | < 4   | open       |
//! | = 4   | unchanged  |
//!
//! ## Double Buffering
//!
//! A pass reads only from the source grid and writes only to the
//! destination grid. Updating in place would let cells late in scan order
//! see half-smoothed neighbors.

use crate::grid::{CaveGrid, Tile};
use crate::rng::CaveRng;

/// Neighbor wall count at which a cell keeps its previous state.
pub const TIE_THRESHOLD: u8 = 4;

/// Fills `grid` with noise: border cells become walls, interior cells become
/// walls with probability `fill_percent / 100`.
///
/// Draws exactly one value per interior cell, scanning `x` outer and `y`
/// inner, so a given seed always lays the same noise.
pub fn random_fill(grid: &mut CaveGrid, rng: &mut CaveRng, fill_percent: u8) {
    let width = grid.width();
    let height = grid.height();
    let threshold = i32::from(fill_percent);

    for x in 0..width {
        for y in 0..height {
            let tile = if grid.is_border(x, y) {
                Tile::WALL
            } else {
                Tile::from_wall(rng.next(0, 100) < threshold)
            };
            grid.set(x, y, tile);
        }
    }
}

/// Counts walls among the 8 neighbors of `(x, y)`.
///
/// Neighbors outside the grid count as walls, so a corner cell always sees
/// at least 5.
#[must_use]
pub fn surrounding_wall_count(grid: &CaveGrid, x: u32, y: u32) -> u8 {
    let (cx, cy) = (i64::from(x), i64::from(y));
    let mut walls = 0;
    for nx in cx - 1..=cx + 1 {
        for ny in cy - 1..=cy + 1 {
            if (nx, ny) != (cx, cy) && grid.is_wall(nx, ny) {
                walls += 1;
            }
        }
    }
    walls
}

/// Applies the majority rule to one cell.
#[inline]
#[must_use]
pub const fn next_tile(current: Tile, neighbor_walls: u8) -> Tile {
    if neighbor_walls > TIE_THRESHOLD {
        Tile::WALL
    } else if neighbor_walls < TIE_THRESHOLD {
        Tile::OPEN
    } else {
        current
    }
}

/// Runs one smoothing pass from `src` into `dst`.
///
/// `dst` is resized to match `src`; its previous contents are discarded.
/// Returns the number of cells whose state changed.
pub fn smooth_pass(src: &CaveGrid, dst: &mut CaveGrid) -> usize {
    let width = src.width();
    let height = src.height();
    dst.reset(width, height, Tile::WALL);

    let mut changed = 0;
    let tiles = dst.tiles_mut();
    let mut index = 0;
    for x in 0..width {
        for y in 0..height {
            let current = src.get(x, y).unwrap_or(Tile::WALL);
            let next = next_tile(current, surrounding_wall_count(src, x, y));
            if next != current {
                changed += 1;
            }
            tiles[index] = next;
            index += 1;
        }
    }
    changed
}

/// Runs `iterations` smoothing passes on `grid`, using `scratch` as the
/// second buffer. The buffers are swapped after every pass, so on return
/// `grid` holds the final state and `scratch` the one before it.
///
/// Returns the number of changed cells for each pass.
pub fn smooth(grid: &mut CaveGrid, scratch: &mut CaveGrid, iterations: u32) -> Vec<usize> {
    let mut changes = Vec::new();
    for pass in 0..iterations {
        let changed = smooth_pass(grid, scratch);
        std::mem::swap(grid, scratch);
        tracing::trace!(pass, changed, "smoothing pass complete");
        changes.push(changed);
    }
    changes
}
