//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The selected renderer backend
//! - Uploading changed regions and presenting frames

use std::sync::Arc;
use winit::window::Window;
use lifegrid_core::{ChangeSet, World};
use lifegrid_render::{
    context::{ContextError, RenderContext},
    pipeline::BlitPipeline,
    CellCommands, FrameBuffer, Renderer,
};
use crate::config::{RenderBackend, RenderingConfig};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU context could not be created
    Context(ContextError),
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// The frame texture would exceed the device's 2D texture limit
    FrameTooLarge {
        width: u64,
        height: u64,
        max_dimension: u32,
    },
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(err) => write!(f, "GPU context error: {}", err),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::FrameTooLarge { width, height, max_dimension } => write!(
                f,
                "Frame of {}x{} pixels exceeds the GPU texture limit of {}",
                width, height, max_dimension
            ),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Context(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(err: ContextError) -> Self {
        RenderError::Context(err)
    }
}

enum Backend {
    Bitmap(FrameBuffer),
    Direct(CellCommands),
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    blit: BlitPipeline,
    backend: Backend,
    background: wgpu::Color,
}

impl RenderSystem {
    /// Create render system for a `grid_width × grid_height` world
    pub fn new(
        window: Arc<Window>,
        config: &RenderingConfig,
        (grid_width, grid_height): (usize, usize),
        cell_size: u32,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        // Direct mode draws one texel per cell.
        let texel_size = match config.backend {
            RenderBackend::Bitmap => cell_size,
            RenderBackend::Direct => 1,
        };
        let (texture_width, texture_height) = frame_texture_size(
            (grid_width, grid_height),
            texel_size,
            context.device.limits().max_texture_dimension_2d,
        )?;

        let palette = config.palette();
        let backend = match config.backend {
            RenderBackend::Bitmap => {
                Backend::Bitmap(FrameBuffer::new(grid_width, grid_height, cell_size, palette))
            }
            RenderBackend::Direct => {
                Backend::Direct(CellCommands::new(grid_width, grid_height, palette))
            }
        };

        let blit = BlitPipeline::new(
            &context.device,
            context.config.format,
            texture_width,
            texture_height,
        );
        let (width, height) = blit.texture_size();
        log::info!("Render backend {:?}: {}x{} frame texture", config.backend, width, height);

        let bg = config.background_color;
        Ok(Self {
            context,
            blit,
            backend,
            background: wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// Upload pending changes and present a frame
    pub fn render_frame(&mut self) -> Result<(), RenderError> {
        self.upload();

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.context.resize(self.context.size);
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.blit.draw(&mut encoder, &view, self.background);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Push whatever the backend painted since the last frame into the texture
    fn upload(&mut self) {
        let queue = &self.context.queue;
        match &mut self.backend {
            Backend::Bitmap(frame) => {
                if let Some(rect) = frame.take_dirty() {
                    self.blit.upload_rect(queue, rect, frame.as_bytes(), frame.width());
                }
            }
            Backend::Direct(commands) => {
                let frame = commands.drain();
                if let Some(full) = frame.full {
                    self.blit.upload_frame(queue, &full);
                }
                for fill in frame.fills {
                    self.blit
                        .upload_texel(queue, fill.cell.x as u32, fill.cell.y as u32, fill.color);
                }
            }
        }
    }
}

/// Pixel size of the frame texture, checked against the device limit
fn frame_texture_size(
    (grid_width, grid_height): (usize, usize),
    cell_size: u32,
    max_dimension: u32,
) -> Result<(u32, u32), RenderError> {
    match FrameBuffer::pixel_size(grid_width, grid_height, cell_size) {
        Some((width, height)) if width <= max_dimension && height <= max_dimension => {
            Ok((width, height))
        }
        _ => {
            let cell_size = u64::from(cell_size.max(1));
            Err(RenderError::FrameTooLarge {
                width: (grid_width as u64).saturating_mul(cell_size),
                height: (grid_height as u64).saturating_mul(cell_size),
                max_dimension,
            })
        }
    }
}

impl Renderer for RenderSystem {
    fn repaint(&mut self, world: &World) {
        match &mut self.backend {
            Backend::Bitmap(frame) => frame.repaint(world),
            Backend::Direct(commands) => commands.repaint(world),
        }
    }

    fn render(&mut self, changes: &ChangeSet) {
        match &mut self.backend {
            Backend::Bitmap(frame) => frame.render(changes),
            Backend::Direct(commands) => commands.render(changes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_texture_size_within_limit() {
        assert_eq!(frame_texture_size((320, 180), 4, 8192).unwrap(), (1280, 720));
        assert_eq!(frame_texture_size((8192, 1), 1, 8192).unwrap(), (8192, 1));
    }

    #[test]
    fn test_frame_texture_size_over_limit() {
        let err = frame_texture_size((3000, 10), 4, 8192).unwrap_err();
        assert!(matches!(
            err,
            RenderError::FrameTooLarge { width: 12000, height: 40, max_dimension: 8192 }
        ));
        assert_eq!(
            err.to_string(),
            "Frame of 12000x40 pixels exceeds the GPU texture limit of 8192"
        );
    }

    #[test]
    fn test_frame_texture_size_u32_overflow() {
        let err = frame_texture_size((70_000, 2), 70_000, u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            RenderError::FrameTooLarge { width: 4_900_000_000, height: 140_000, .. }
        ));
    }

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_context_error_is_source() {
        use std::error::Error;

        let err: RenderError = ContextError::NoAdapter.into();
        assert!(err.source().is_some());
        assert!(format!("{}", err).contains("No compatible GPU adapter"));
        assert!(RenderError::SurfaceLost.source().is_none());
    }
}
