//! Grid coordinates

use std::fmt;

/// A cell coordinate on the logical grid
///
/// Plain value type: two cells are the same cell when their coordinates match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tuple() {
        assert_eq!(Cell::from((3, 4)), Cell::new(3, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Cell::new(1, 2)), "(1, 2)");
    }

    #[test]
    fn test_ordering_by_value() {
        let mut cells = vec![Cell::new(2, 0), Cell::new(0, 1), Cell::new(0, 0)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(2, 0)]);
    }
}
