//! Rectangle decomposition of integer grids
//!
//! Two interchangeable strategies turn a [`Grid`] into a list of
//! [`Wall`]s. The naive strategy emits every cell as its own 1x1
//! rectangle. The greedy strategy merges runs of equal-valued cells
//! into larger rectangles, row-first.

use std::collections::HashSet;

use crate::grid::Grid;
use crate::rect::Rect;

/// A decomposed rectangle tagged with its source cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    /// Covered cell area, in cell units
    pub rect: Rect,

    /// The grid value shared by every covered cell
    pub value: i32,
}

impl Wall {
    /// Create a wall from a cell rectangle and its value
    #[inline]
    pub fn new(rect: Rect, value: i32) -> Self {
        Self { rect, value }
    }
}

/// Grid values excluded from greedy decomposition.
///
/// Zero is always treated as empty space; the set starts out holding
/// only zero and callers add further values to carve out cells that
/// should not produce walls (decorative zones, triggers handled
/// elsewhere).
#[derive(Debug, Clone)]
pub struct IgnoredValues {
    values: HashSet<i32>,
}

impl Default for IgnoredValues {
    fn default() -> Self {
        let mut values = HashSet::new();
        values.insert(0);
        Self { values }
    }
}

impl IgnoredValues {
    /// Add a value to the ignored set
    pub fn ignore(&mut self, value: i32) {
        self.values.insert(value);
    }

    /// Check whether a value may produce walls
    #[inline]
    pub fn accepts(&self, value: i32) -> bool {
        !self.values.contains(&value)
    }
}

/// Strategy used to decompose an integer grid into walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshStrategy {
    /// One 1x1 wall per cell, no filtering
    #[default]
    Naive,

    /// Maximal merged rectangles, skipping zero and ignored values
    Greedy,
}

impl MeshStrategy {
    /// Run the selected decomposition over a grid
    pub fn mesh(self, grid: &Grid, ignored: &IgnoredValues) -> Vec<Wall> {
        match self {
            MeshStrategy::Naive => naive_mesh(grid),
            MeshStrategy::Greedy => greedy_mesh(grid, ignored),
        }
    }
}

/// Decompose a grid into one 1x1 wall per cell.
///
/// Every cell is emitted, including zero and ignored values; the caller
/// gets an exact cell-for-cell image of the grid. Scan order is row by
/// row, left to right.
pub fn naive_mesh(grid: &Grid) -> Vec<Wall> {
    let mut walls = Vec::with_capacity(grid.width() * grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            walls.push(Wall::new(
                Rect::new(x as i32, y as i32, 1, 1),
                grid.get(x, y),
            ));
        }
    }
    walls
}

/// Decompose a grid into maximal equal-valued rectangles.
///
/// Scans row by row, left to right, over a private working copy of the
/// grid. Each non-zero cell starts a maximal horizontal run of its
/// value; runs of ignored values are skipped whole. An accepted run
/// locks its width and grows downward one row at a time, for as long as
/// the run anchored directly below spans exactly the same width - a
/// narrower or wider run below stops the growth. Finished rectangles
/// are zeroed out of the working copy, so no cell is ever claimed
/// twice and later rows skip consumed cells.
///
/// The output is deterministic: rectangles appear in the order their
/// top-left cells are reached by the scan.
pub fn greedy_mesh(grid: &Grid, ignored: &IgnoredValues) -> Vec<Wall> {
    let mut work = grid.clone();
    let mut walls = Vec::new();

    for y in 0..work.height() {
        let mut x = 0;
        while x < work.width() {
            let value = work.get(x, y);
            if value == 0 {
                x += 1;
                continue;
            }

            let w = run_width(&work, x, y);
            if ignored.accepts(value) {
                let mut h = 1;
                while y + h < work.height()
                    && work.get(x, y + h) == value
                    && run_width(&work, x, y + h) == w
                {
                    h += 1;
                }

                work.fill(x, y, w, h, 0);
                walls.push(Wall::new(
                    Rect::new(x as i32, y as i32, w as i32, h as i32),
                    value,
                ));
            }
            x += w;
        }
    }
    walls
}

/// Width of the maximal equal-valued run starting at `(x, y)`.
///
/// The right grid edge terminates the run; there is no sentinel value.
fn run_width(grid: &Grid, x: usize, y: usize) -> usize {
    let value = grid.get(x, y);
    let mut w = 1;
    while x + w < grid.width() && grid.get(x + w, y) == value {
        w += 1;
    }
    w
}
