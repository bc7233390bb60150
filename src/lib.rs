//! lifegrid - incremental Game of Life
//!
//! Library half of the application: configuration, the systems `main` wires
//! together, and a headless [`run`] entry point.

pub mod config;
pub mod input;
pub mod runner;
pub mod systems;

pub use runner::{run, RunSummary};
