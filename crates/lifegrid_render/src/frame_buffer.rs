//! Bitmap renderer backend
//!
//! Each cell covers a `cell_size × cell_size` block of RGBA pixels. Painting
//! grows a dirty rectangle so the presenter only uploads what changed.

use lifegrid_core::{Cell, ChangeSet, World};

use crate::{Palette, Renderer};

/// Axis-aligned pixel rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DirtyRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Smallest rectangle covering both
    pub fn union(self, other: DirtyRect) -> DirtyRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        DirtyRect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// CPU-side RGBA8 bitmap of the grid
pub struct FrameBuffer {
    grid_width: usize,
    grid_height: usize,
    cell_size: u32,
    width: u32,
    height: u32,
    palette: Palette,
    pixels: Vec<[u8; 4]>,
    dirty: Option<DirtyRect>,
}

impl FrameBuffer {
    /// Pixel dimensions of a frame for the given grid, or `None` if either
    /// side does not fit in a `u32`. A zero `cell_size` counts as 1.
    pub fn pixel_size(grid_width: usize, grid_height: usize, cell_size: u32) -> Option<(u32, u32)> {
        let cell_size = cell_size.max(1);
        let width = u32::try_from(grid_width).ok()?.checked_mul(cell_size)?;
        let height = u32::try_from(grid_height).ok()?.checked_mul(cell_size)?;
        Some((width, height))
    }

    /// Create a buffer for a `grid_width × grid_height` world, all dead
    ///
    /// # Panics
    ///
    /// Panics if [`pixel_size`](Self::pixel_size) returns `None`.
    pub fn new(grid_width: usize, grid_height: usize, cell_size: u32, palette: Palette) -> Self {
        let cell_size = cell_size.max(1);
        let Some((width, height)) = Self::pixel_size(grid_width, grid_height, cell_size) else {
            panic!("{grid_width}x{grid_height} cells at {cell_size}px overflow the frame size");
        };
        Self {
            grid_width,
            grid_height,
            cell_size,
            width,
            height,
            palette,
            pixels: vec![palette.dead; width as usize * height as usize],
            dirty: Some(DirtyRect::new(0, 0, width, height)),
        }
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn pixel(&self, px: u32, py: u32) -> [u8; 4] {
        self.pixels[py as usize * self.width as usize + px as usize]
    }

    /// Raw RGBA bytes, row-major, `width() * 4` bytes per row
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Region touched since the last call
    pub fn take_dirty(&mut self) -> Option<DirtyRect> {
        self.dirty.take()
    }

    fn fill_cell(&mut self, cell: Cell, color: [u8; 4]) {
        debug_assert!(cell.x < self.grid_width && cell.y < self.grid_height);
        let size = self.cell_size;
        let stride = self.width() as usize;
        let x0 = cell.x * size as usize;
        let y0 = cell.y * size as usize;
        for py in y0..y0 + size as usize {
            let start = py * stride + x0;
            self.pixels[start..start + size as usize].fill(color);
        }

        let rect = DirtyRect::new(x0 as u32, y0 as u32, size, size);
        self.dirty = Some(match self.dirty {
            Some(dirty) => dirty.union(rect),
            None => rect,
        });
    }
}

impl Renderer for FrameBuffer {
    fn repaint(&mut self, world: &World) {
        debug_assert_eq!((world.width(), world.height()), (self.grid_width, self.grid_height));
        self.pixels.fill(self.palette.dead);
        for cell in world.live_cells() {
            self.fill_cell(cell, self.palette.live);
        }
        self.dirty = Some(DirtyRect::new(0, 0, self.width(), self.height()));
    }

    fn render(&mut self, changes: &ChangeSet) {
        for change in changes.iter() {
            self.fill_cell(change.cell(), self.palette.color(change.is_alive()));
        }
    }
}
