//! Incremental Game of Life world
//!
//! The World keeps two grids:
//! - the cell states (`width × height`, each 0 or 1)
//! - the neighbour counts (`(width + 2) × (height + 2)`)
//!
//! Logical cell `(x, y)` reads its count at padded position `(x + 1, y + 1)`.
//! The outer ring of the count grid absorbs increments from edge cells and is
//! never read back, so births and deaths never need bounds checks.
//!
//! Counts are built once at construction and from then on only change through
//! [`World::apply_birth`] and [`World::apply_death`].

use crate::{bernoulli, Cell, ChangeSet, Grid, WorldError};

const ALIVE: u8 = 1;
const DEAD: u8 = 0;

/// Cell states plus neighbour-count accumulators
#[derive(Clone, Debug)]
pub struct World {
    cells: Grid<u8>,
    neighbours: Grid<u8>,
    population: usize,
    generation: u64,
}

impl World {
    /// Create a world, calling `generator` once per cell in row-major order
    pub fn new(
        width: usize,
        height: usize,
        mut generator: impl FnMut() -> bool,
    ) -> Result<Self, WorldError> {
        Self::from_fn(width, height, |_, _| generator())
    }

    /// Create a world from a coordinate-aware generator
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> bool,
    ) -> Result<Self, WorldError> {
        check_dimensions(width, height)?;
        let cells = Grid::from_fn(width, height, |x, y| if f(x, y) { ALIVE } else { DEAD });
        Ok(Self::from_cells(cells))
    }

    /// Create a world where exactly `live` are alive
    pub fn from_live_cells(width: usize, height: usize, live: &[Cell]) -> Result<Self, WorldError> {
        check_dimensions(width, height)?;
        let mut cells: Grid<u8> = Grid::new(width, height);
        for &cell in live {
            if cell.x >= width || cell.y >= height {
                return Err(WorldError::CellOutOfBounds { cell, width, height });
            }
            cells[(cell.x, cell.y)] = ALIVE;
        }
        Ok(Self::from_cells(cells))
    }

    /// Create a randomly filled world where each cell is alive with probability `density`
    pub fn random(
        width: usize,
        height: usize,
        density: f64,
        seed: Option<u64>,
    ) -> Result<Self, WorldError> {
        let generator = bernoulli(density, seed)?;
        Self::new(width, height, generator)
    }

    /// Derive the neighbour counts with one full scan
    fn from_cells(cells: Grid<u8>) -> Self {
        let (width, height) = (cells.width(), cells.height());
        let mut world = Self {
            neighbours: Grid::new(width + 2, height + 2),
            cells,
            population: 0,
            generation: 0,
        };

        for y in 0..height {
            for x in 0..width {
                if world.cells[(x, y)] == ALIVE {
                    world.population += 1;
                    world.for_each_neighbour_slot(x, y, |n| *n += 1);
                }
            }
        }

        log::debug!(
            "Created {}x{} world with {} live cells",
            width,
            height,
            world.population
        );
        world
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cells.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.cells.height()
    }

    /// Number of live cells
    #[inline]
    pub fn population(&self) -> usize {
        self.population
    }

    /// Number of ticks computed so far
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `(x, y)` is alive
    ///
    /// Panics if `(x, y)` is outside the world.
    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[(x, y)] == ALIVE
    }

    /// Live cells among the 8 neighbours of `(x, y)`, in `0..=8`
    #[inline]
    pub fn neighbour_count(&self, x: usize, y: usize) -> u8 {
        assert!(
            x < self.width() && y < self.height(),
            "({x}, {y}) outside {}x{} world",
            self.width(),
            self.height()
        );
        self.neighbours[(x + 1, y + 1)]
    }

    /// All live cells in row-major order
    pub fn live_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width();
        self.cells
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(_, &state)| state == ALIVE)
            .map(move |(i, _)| Cell::new(i % width, i / width))
    }

    /// A change set sized for this world
    pub fn change_set(&self) -> ChangeSet {
        ChangeSet::with_capacity(self.cells.len())
    }

    /// Bring a dead cell to life and bump its 8 neighbour counts
    ///
    /// The cell must currently be dead. Only checked in debug builds; calling
    /// this on a live cell breaks the neighbour counts.
    pub fn apply_birth(&mut self, x: usize, y: usize) {
        debug_assert_eq!(self.cells[(x, y)], DEAD, "birth on live cell ({x}, {y})");
        self.cells[(x, y)] = ALIVE;
        self.population += 1;
        self.for_each_neighbour_slot(x, y, |n| *n += 1);
    }

    /// Kill a live cell and drop its 8 neighbour counts
    ///
    /// The cell must currently be alive.
    pub fn apply_death(&mut self, x: usize, y: usize) {
        debug_assert_eq!(self.cells[(x, y)], ALIVE, "death on dead cell ({x}, {y})");
        self.cells[(x, y)] = DEAD;
        self.population -= 1;
        self.for_each_neighbour_slot(x, y, |n| *n -= 1);
    }

    /// Advance one generation and report what changed in `changes`
    ///
    /// Every decision is made against the pre-tick counts; nothing is mutated
    /// until the scan is complete.
    pub fn tick(&mut self, changes: &mut ChangeSet) {
        changes.clear();

        let width = self.width();
        for y in 0..self.height() {
            let states = self.cells.row(y);
            let counts = &self.neighbours.row(y + 1)[1..=width];
            for (x, (&state, &count)) in states.iter().zip(counts).enumerate() {
                if state == ALIVE {
                    if !(2..=3).contains(&count) {
                        changes.push_death(Cell::new(x, y));
                    }
                } else if count == 3 {
                    changes.push_birth(Cell::new(x, y));
                }
            }
        }

        for &cell in changes.deaths() {
            self.apply_death(cell.x, cell.y);
        }
        for &cell in changes.births() {
            self.apply_birth(cell.x, cell.y);
        }
        self.generation += 1;

        log::trace!(
            "Generation {}: {} births, {} deaths, population {}",
            self.generation,
            changes.births().len(),
            changes.deaths().len(),
            self.population
        );
    }

    /// Visit the 8 padded count slots around logical `(x, y)`
    #[inline]
    fn for_each_neighbour_slot(&mut self, x: usize, y: usize, mut f: impl FnMut(&mut u8)) {
        // Padded neighbours of (x + 1, y + 1) span x..=x + 2, y..=y + 2.
        for py in y..y + 3 {
            for px in x..x + 3 {
                if px != x + 1 || py != y + 1 {
                    f(&mut self.neighbours[(px, py)]);
                }
            }
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), WorldError> {
    if width == 0 || height == 0 {
        return Err(WorldError::InvalidDimension { width, height });
    }
    Ok(())
}
