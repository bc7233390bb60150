//! Dense 2D grid storage

use std::ops::{Index, IndexMut};

/// A fixed-size row-major 2D array
///
/// Element `(x, y)` lives at `y * width + x`. The grid never changes size
/// after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Create a grid filled with `T::default()`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![T::default(); width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Create a grid by calling `f(x, y)` once per element in row-major order
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self { width, height, cells }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major index of `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid. A column past the edge would
    /// otherwise alias the next row.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Checked access
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// One row as a slice
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.cells[self.index_of(x, y)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        let i = self.index_of(x, y);
        &mut self.cells[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "(3, 0) outside 3x3 grid")]
    fn test_index_past_row_end_panics() {
        let grid: Grid<u8> = Grid::new(3, 3);
        let _ = grid[(3, 0)];
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn test_index_mut_out_of_bounds_panics() {
        let mut grid: Grid<u8> = Grid::new(2, 2);
        grid[(0, 2)] = 1;
    }

    #[test]
    fn test_new_is_default_filled() {
        let grid: Grid<u8> = Grid::new(3, 2);
        assert_eq!(grid.len(), 6);
        assert!(grid.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_row_major_layout() {
        let grid = Grid::from_fn(3, 2, |x, y| y * 10 + x);
        assert_eq!(grid.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid[(2, 1)], 12);
        assert_eq!(grid.row(1), &[10, 11, 12]);
    }

    #[test]
    fn test_index_mut() {
        let mut grid: Grid<u8> = Grid::new(4, 4);
        grid[(3, 2)] = 7;
        assert_eq!(grid.as_slice()[2 * 4 + 3], 7);
    }

    #[test]
    fn test_checked_get() {
        let grid: Grid<u8> = Grid::new(2, 2);
        assert_eq!(grid.get(1, 1), Some(&0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }
}
