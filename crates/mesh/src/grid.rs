//! Logical 2D grid of integer cell values

use thiserror::Error;

/// Error raised when a flat value array cannot be reshaped into a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Flat array length does not match the declared dimensions
    #[error("Grid size mismatch: expected {expected} cells, got {got}")]
    SizeMismatch { expected: usize, got: usize },

    /// Declared dimensions multiply past the addressable cell count
    #[error("Grid too large: {width}x{height} cells")]
    Oversized { width: usize, height: usize },
}

/// A dense 2D grid of `i32` cell values.
///
/// Cells are addressed as `(x, y)` with `x` running left to right and
/// `y` top to bottom. Zero-sized grids are valid and hold no cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Cell storage, x-major: the cell at `(x, y)` lives at `x * height + y`.
    cells: Vec<i32>,
}

impl Grid {
    /// Create a zeroed grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Reshape a flat row-major array into a grid.
    ///
    /// The source order is the one integer-grid layers are stored in:
    /// the first `width` entries form the top row, the next `width`
    /// entries the row below it, and so on. `get(x, y)` returns
    /// `flat[y * width + x]`.
    pub fn from_flat(width: usize, height: usize, flat: &[i32]) -> Result<Self, GridError> {
        let expected = width
            .checked_mul(height)
            .ok_or(GridError::Oversized { width, height })?;
        if flat.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                got: flat.len(),
            });
        }
        let mut grid = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                grid.set(x, y, flat[y * width + x]);
            }
        }
        Ok(grid)
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the value at `(x, y)`
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        debug_assert!(x < self.width && y < self.height);
        self.cells[x * self.height + y]
    }

    /// Set the value at `(x, y)`
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: i32) {
        debug_assert!(x < self.width && y < self.height);
        self.cells[x * self.height + y] = value;
    }

    /// Overwrite a rectangular area with a value.
    ///
    /// The area must lie fully inside the grid.
    pub(crate) fn fill(&mut self, x: usize, y: usize, w: usize, h: usize, value: i32) {
        for cx in x..x + w {
            for cy in y..y + h {
                self.set(cx, cy, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_axis_mapping() {
        // Row-major source: first row 1,2,3 then second row 4,5,6.
        let grid = Grid::from_flat(3, 2, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(1, 0), 2);
        assert_eq!(grid.get(2, 0), 3);
        assert_eq!(grid.get(0, 1), 4);
        assert_eq!(grid.get(1, 1), 5);
        assert_eq!(grid.get(2, 1), 6);
    }

    #[test]
    fn test_from_flat_size_mismatch() {
        let err = Grid::from_flat(3, 2, &[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::SizeMismatch {
                expected: 6,
                got: 3
            }
        );
    }

    #[test]
    fn test_oversized_dimensions() {
        let err = Grid::from_flat(usize::MAX, 2, &[]).unwrap_err();
        assert_eq!(
            err,
            GridError::Oversized {
                width: usize::MAX,
                height: 2
            }
        );
    }

    #[test]
    fn test_zero_sized() {
        let grid = Grid::from_flat(0, 0, &[]).unwrap();
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.height(), 0);

        let empty_rows = Grid::from_flat(4, 0, &[]).unwrap();
        assert_eq!(empty_rows.width(), 4);
        assert_eq!(empty_rows.height(), 0);
    }

    #[test]
    fn test_fill() {
        let mut grid = Grid::from_flat(3, 3, &[1; 9]).unwrap();
        grid.fill(1, 1, 2, 2, 0);
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(1, 1), 0);
        assert_eq!(grid.get(2, 2), 0);
        assert_eq!(grid.get(0, 2), 1);
    }
}
