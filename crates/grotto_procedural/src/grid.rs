//! # Cave Grid
//!
//! Binary occupancy grid produced by the generator.
//!
//! ## Layout
//!
//! Cells are stored column-major (`x * height + y`), matching the `[x][y]`
//! indexing hosts use when placing one visual unit per wall. Each cell is a
//! one-byte [`Tile`], so the whole grid can be handed out as raw `0`/`1`
//! bytes without copying.
//!
//! ## Bounds
//!
//! Reads outside the grid are never an error: [`CaveGrid::is_wall`] reports
//! them as walls, which is what the smoothing rule expects at the edges.

use std::fmt;

use bytemuck::{Pod, Zeroable};

/// A single cell of the cave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Tile(u8);

impl Tile {
    /// Open floor.
    pub const OPEN: Self = Self(0);
    /// Solid wall.
    pub const WALL: Self = Self(1);

    /// Returns the tile for a wall flag.
    #[inline]
    #[must_use]
    pub const fn from_wall(wall: bool) -> Self {
        if wall {
            Self::WALL
        } else {
            Self::OPEN
        }
    }

    /// Returns true for walls.
    #[inline]
    #[must_use]
    pub const fn is_wall(self) -> bool {
        self.0 != 0
    }

    /// Returns the raw cell value (`1` wall, `0` open).
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Character used by the text dump.
    #[inline]
    #[must_use]
    pub const fn glyph(self) -> char {
        if self.is_wall() {
            '#'
        } else {
            '.'
        }
    }
}

/// A `width x height` grid of tiles.
#[derive(Clone, PartialEq, Eq)]
pub struct CaveGrid {
    /// Number of columns (x extent).
    width: u32,
    /// Number of rows (y extent).
    height: u32,
    /// Tiles, indexed as `x * height + y`.
    cells: Vec<Tile>,
}

impl CaveGrid {
    /// Creates a grid with every cell set to `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Tile) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; cell_count(width, height)],
        }
    }

    /// Builds a grid from text rows, `#` for walls and `.` for open cells.
    ///
    /// Row `i` becomes `y = i`. Returns `None` for ragged rows, an empty
    /// input or unknown characters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grotto_procedural::CaveGrid;
    ///
    /// let grid = CaveGrid::from_rows(&["###", "#.#", "###"]).unwrap();
    /// assert!(!grid.is_wall(1, 1));
    /// assert_eq!(grid.wall_count(), 8);
    /// ```
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = u32::try_from(rows.len()).ok()?;
        let width = u32::try_from(rows.first()?.chars().count()).ok()?;
        if width == 0 {
            return None;
        }

        let mut grid = Self::new(width, height, Tile::OPEN);
        for (y, row) in (0..height).zip(rows) {
            if row.chars().count() != width as usize {
                return None;
            }
            for (x, ch) in (0..width).zip(row.chars()) {
                let tile = match ch {
                    '#' => Tile::WALL,
                    '.' => Tile::OPEN,
                    _ => return None,
                };
                grid.set(x, y, tile);
            }
        }
        Some(grid)
    }

    /// Returns the grid width.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the grid height.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x as usize * self.height as usize + y as usize)
    }

    /// Gets the tile at `(x, y)`, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Tile> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Sets the tile at `(x, y)`. Writes outside the grid are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = tile;
        }
    }

    /// Returns true if `(x, y)` is a wall. Anything outside the grid is a wall.
    #[inline]
    #[must_use]
    pub fn is_wall(&self, x: i64, y: i64) -> bool {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.get(x, y).map_or(true, Tile::is_wall),
            _ => true,
        }
    }

    /// Returns true if `(x, y)` lies on the outer ring of the grid.
    #[inline]
    #[must_use]
    pub const fn is_border(&self, x: u32, y: u32) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Number of wall cells.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|t| t.is_wall()).count()
    }

    /// Fraction of non-border cells that are walls, `0.0` if there are none.
    #[must_use]
    pub fn interior_wall_ratio(&self) -> f64 {
        if self.width < 3 || self.height < 3 {
            return 0.0;
        }
        let mut interior = 0u64;
        let mut walls = 0u64;
        for x in 1..self.width - 1 {
            for y in 1..self.height - 1 {
                interior += 1;
                if self.get(x, y).is_some_and(Tile::is_wall) {
                    walls += 1;
                }
            }
        }
        walls as f64 / interior as f64
    }

    /// Iterates over the coordinates of every wall, `x` outer and `y` inner.
    ///
    /// A host places exactly one visual unit per yielded position and skips
    /// everything else.
    pub fn wall_positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let height = self.height;
        (0..self.width)
            .flat_map(move |x| (0..height).map(move |y| (x, y)))
            .zip(self.cells.iter())
            .filter_map(|(pos, tile)| tile.is_wall().then_some(pos))
    }

    /// Raw cell bytes in storage order (`x * height + y`).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    /// Mutable access to the tiles in storage order.
    #[inline]
    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.cells
    }

    /// Resizes to `width x height` and sets every cell to `fill`, keeping the
    /// allocation when it is large enough.
    pub(crate) fn reset(&mut self, width: u32, height: u32, fill: Tile) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(cell_count(width, height), fill);
    }
}

impl Default for CaveGrid {
    fn default() -> Self {
        Self::new(0, 0, Tile::OPEN)
    }
}

impl fmt::Debug for CaveGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaveGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("walls", &self.wall_count())
            .finish()
    }
}

/// One line per `y`, `#` for walls and `.` for open cells.
impl fmt::Display for CaveGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = String::with_capacity(self.width as usize);
        for y in 0..self.height {
            line.clear();
            line.extend((0..self.width).filter_map(|x| self.get(x, y)).map(Tile::glyph));
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[inline]
fn cell_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
