//! Incremental Life Rendering
//!
//! This crate turns [`ChangeSet`]s into pixels. After the first frame only
//! the cells named in a change set are touched.
//!
//! ## Key Components
//!
//! - [`Renderer`] - The capability the simulation drives
//! - [`FrameBuffer`] - Bitmap backend: paints scaled cells into a CPU RGBA buffer
//! - [`CellCommands`] - Immediate-mode backend: records one fill per changed cell
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::BlitPipeline`] - Uploads frame regions and draws them to the surface

pub mod context;
pub mod pipeline;

mod cell_commands;
mod frame_buffer;
mod renderer;

pub use cell_commands::{CellCommands, CellFill, Frame};
pub use frame_buffer::{DirtyRect, FrameBuffer};
pub use renderer::{Palette, Renderer};

// Re-export core types for convenience
pub use lifegrid_core::{Cell, CellChange, ChangeSet, World};
