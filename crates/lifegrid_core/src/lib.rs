//! Core types for the lifegrid simulation
//!
//! This crate provides the incremental Game of Life engine (B3/S23):
//!
//! - [`Grid`] - Dense row-major 2D storage
//! - [`Cell`] - A grid coordinate
//! - [`ChangeSet`] - Births and deaths produced by one generation
//! - [`World`] - Cell states plus padded neighbour-count accumulators
//! - [`bernoulli`] - Probability-seeded initial state generator
//! - [`WorldError`] - Construction errors

mod cell;
mod change_set;
mod error;
mod generator;
mod grid;
mod world;

pub use cell::Cell;
pub use change_set::{CellChange, ChangeSet};
pub use error::WorldError;
pub use generator::{bernoulli, DEFAULT_DENSITY};
pub use grid::Grid;
pub use world::World;
