// grid.rs - Toroidal cell grid for Conway's Game of Life

use std::fmt;

use rand::Rng;

use crate::error::{LifeError, Result};

// Default playing area (40x30 cells)
pub const DEFAULT_WIDTH: usize = 40;
pub const DEFAULT_HEIGHT: usize = 30;

/// Fixed-size boolean cell matrix with wraparound adjacency.
///
/// Cells are addressed as `(x, y)` with `x` the column (left to right) and
/// `y` the row (top to bottom). The dimensions never change once a grid has
/// been built; loading a saved game produces a new grid instead.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>, // row-major, index = y * width + x
}

impl Grid {
    /// All-dead grid.
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero, got {width}x{height}");
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Grid where every cell is independently live with `probability`.
    ///
    /// # Panics
    /// If `probability` is outside `[0, 1]` or a dimension is zero.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, probability: f64, rng: &mut R) -> Self {
        let mut grid = Self::new(width, height);
        for cell in grid.cells.iter_mut() {
            *cell = rng.gen_bool(probability);
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) is outside the {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if self.contains(x, y) {
            Ok(y * self.width + x)
        } else {
            Err(LifeError::OutOfBounds { x, y, width: self.width, height: self.height })
        }
    }

    /// # Panics
    /// If `(x, y)` is out of bounds.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    /// # Panics
    /// If `(x, y)` is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.index(x, y);
        self.cells[i] = alive;
    }

    pub fn try_get(&self, x: usize, y: usize) -> Result<bool> {
        Ok(self.cells[self.checked_index(x, y)?])
    }

    pub fn try_set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        let i = self.checked_index(x, y)?;
        self.cells[i] = alive;
        Ok(())
    }

    /// Flips a cell and returns its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool> {
        let i = self.checked_index(x, y)?;
        self.cells[i] = !self.cells[i];
        Ok(self.cells[i])
    }

    /// Live cells among the eight neighbors of `(x, y)`, wrapping at every edge.
    ///
    /// Offsets are folded back with `(x + dx + width) % width`, so on grids
    /// narrower than three cells the same neighbor can be counted twice.
    ///
    /// # Panics
    /// If `(x, y)` is out of bounds. Wrapping only applies to neighbors.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) is outside the {}x{} grid",
            self.width,
            self.height
        );
        let (w, h) = (self.width as isize, self.height as isize);
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = ((x as isize + dx + w) % w) as usize;
                let ny = ((y as isize + dy + h) % h) as usize;
                if self.cells[ny * self.width + nx] {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Sets every cell to `alive`.
    pub fn fill(&mut self, alive: bool) {
        self.cells.fill(alive);
    }

    /// `(x, y, alive)` for every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let w = self.width;
        self.cells.iter().enumerate().map(move |(i, &alive)| (i % w, i / w, alive))
    }

    pub(crate) fn row(&self, y: usize) -> &[bool] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

// Rendered in the save-file form, one row per line.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for &alive in self.row(y) {
                f.write_str(if alive { "1" } else { "0" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.width, self.height)?;
        fmt::Display::fmt(self, f)
    }
}
