//! Presentation pipeline
//!
//! The renderer backends produce RGBA frames on the CPU; this module owns the
//! texture they are uploaded into and the pass that draws it to the surface.

pub mod blit_pipeline;

pub use blit_pipeline::BlitPipeline;
