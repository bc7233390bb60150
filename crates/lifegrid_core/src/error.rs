//! World construction errors

use std::fmt;

use crate::Cell;

/// Error type for building a [`World`](crate::World)
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// Width or height is zero
    InvalidDimension { width: usize, height: usize },
    /// Fill probability outside `[0, 1]`
    InvalidDensity(f64),
    /// A seeded live cell lies outside the grid
    CellOutOfBounds { cell: Cell, width: usize, height: usize },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::InvalidDimension { width, height } => {
                write!(f, "Invalid world dimensions {}x{}: both must be positive", width, height)
            }
            WorldError::InvalidDensity(density) => {
                write!(f, "Invalid density {}: expected a probability in [0, 1]", density)
            }
            WorldError::CellOutOfBounds { cell, width, height } => {
                write!(f, "Cell {} is outside the {}x{} world", cell, width, height)
            }
        }
    }
}

impl std::error::Error for WorldError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_display() {
        let err = WorldError::InvalidDimension { width: 0, height: 5 };
        let msg = format!("{}", err);
        assert!(msg.contains("0x5"));
    }

    #[test]
    fn test_density_display() {
        let msg = format!("{}", WorldError::InvalidDensity(1.5));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = WorldError::CellOutOfBounds {
            cell: Cell::new(9, 1),
            width: 4,
            height: 4,
        };
        assert_eq!(format!("{}", err), "Cell (9, 1) is outside the 4x4 world");
    }
}
