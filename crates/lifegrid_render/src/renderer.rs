//! Renderer capability

use lifegrid_core::{ChangeSet, World};

/// Something that can display a [`World`] incrementally
pub trait Renderer {
    /// Paint the whole world (first frame, or after the world is replaced)
    fn repaint(&mut self, world: &World);

    /// Paint only the cells named in `changes`
    fn render(&mut self, changes: &ChangeSet);
}

/// Live and dead cell colours (RGBA8)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub live: [u8; 4],
    pub dead: [u8; 4],
}

impl Palette {
    pub const CLASSIC: Palette = Palette {
        live: [255, 255, 255, 255],
        dead: [0, 0, 0, 255],
    };

    pub fn new(live: [u8; 4], dead: [u8; 4]) -> Self {
        Self { live, dead }
    }

    #[inline]
    pub fn color(&self, alive: bool) -> [u8; 4] {
        if alive {
            self.live
        } else {
            self.dead
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::CLASSIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_color() {
        let palette = Palette::new([1, 2, 3, 4], [5, 6, 7, 8]);
        assert_eq!(palette.color(true), [1, 2, 3, 4]);
        assert_eq!(palette.color(false), [5, 6, 7, 8]);
    }

    #[test]
    fn test_default_is_classic() {
        assert_eq!(Palette::default(), Palette::CLASSIC);
    }
}
