//! Immediate-mode renderer backend
//!
//! Instead of keeping a bitmap, records one fill per changed cell. The
//! presenter replays them as single-texel writes into a grid-sized texture.

use lifegrid_core::{Cell, ChangeSet, World};

use crate::{Palette, Renderer};

/// Paint one cell with one colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellFill {
    pub cell: Cell,
    pub color: [u8; 4],
}

/// Work handed to the presenter by [`CellCommands::drain`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Whole-grid texels (one per cell), present after a repaint
    pub full: Option<Vec<[u8; 4]>>,
    /// Fills to apply on top of `full`, in recording order
    pub fills: Vec<CellFill>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.full.is_none() && self.fills.is_empty()
    }
}

/// Pending draw commands for the presenter
pub struct CellCommands {
    grid_width: usize,
    grid_height: usize,
    palette: Palette,
    full_frame: Option<Vec<[u8; 4]>>,
    fills: Vec<CellFill>,
}

impl CellCommands {
    pub fn new(grid_width: usize, grid_height: usize, palette: Palette) -> Self {
        Self {
            grid_width,
            grid_height,
            palette,
            full_frame: Some(vec![palette.dead; grid_width * grid_height]),
            fills: Vec::new(),
        }
    }

    pub fn grid_size(&self) -> (usize, usize) {
        (self.grid_width, self.grid_height)
    }

    /// Take everything recorded since the last drain
    pub fn drain(&mut self) -> Frame {
        Frame {
            full: self.full_frame.take(),
            fills: std::mem::take(&mut self.fills),
        }
    }
}

impl Renderer for CellCommands {
    fn repaint(&mut self, world: &World) {
        debug_assert_eq!((world.width(), world.height()), (self.grid_width, self.grid_height));
        let mut frame = vec![self.palette.dead; self.grid_width * self.grid_height];
        for cell in world.live_cells() {
            frame[cell.y * self.grid_width + cell.x] = self.palette.live;
        }
        self.full_frame = Some(frame);
        self.fills.clear();
    }

    fn render(&mut self, changes: &ChangeSet) {
        let width = self.grid_width;
        let palette = self.palette;
        match &mut self.full_frame {
            // Not presented yet: fold the changes into the pending frame.
            Some(frame) => {
                for change in changes.iter() {
                    let cell = change.cell();
                    frame[cell.y * width + cell.x] = palette.color(change.is_alive());
                }
            }
            None => {
                self.fills.extend(changes.iter().map(|change| CellFill {
                    cell: change.cell(),
                    color: palette.color(change.is_alive()),
                }));
            }
        }
    }
}
