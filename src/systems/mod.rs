//! Application systems
//!
//! The pieces `main` wires together: tick scheduling, simulation, window, and GPU rendering.

mod render;
mod scheduler;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use scheduler::{TickScheduler, MAX_TICKS_PER_SECOND};
pub use simulation::{SimulationResult, SimulationSystem};
pub use window::{format_title, WindowError, WindowSystem};
