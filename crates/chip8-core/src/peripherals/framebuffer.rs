//! 64x32 monochrome framebuffer with XOR sprite drawing.
//!
//! Pixels are stored one per byte, row-major, and only ever hold 0 or 1.
//! Sprite drawing wraps on both axes instead of clipping.

/// Framebuffer width in pixels.
pub const DISPLAY_WIDTH: usize = 64;

/// Framebuffer height in pixels.
pub const DISPLAY_HEIGHT: usize = 32;

/// Total pixel count.
pub const DISPLAY_PIXELS: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Sprite rows are always eight pixels wide.
pub const SPRITE_WIDTH: usize = 8;

/// Monochrome pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Framebuffer {
    pixels: Box<[u8]>,
    dirty: bool,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            pixels: vec![0; DISPLAY_PIXELS].into_boxed_slice(),
            dirty: false,
        }
    }
}

impl Framebuffer {
    /// Row-major pixel values, exactly [`DISPLAY_PIXELS`] entries of 0 or 1.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reads a pixel; coordinates wrap.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[Self::index(x, y)]
    }

    /// Linear index for `(x, y)` with wraparound on both axes.
    #[must_use]
    pub const fn index(x: usize, y: usize) -> usize {
        (x % DISPLAY_WIDTH) + (y % DISPLAY_HEIGHT) * DISPLAY_WIDTH
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.dirty = true;
    }

    /// XORs `rows` onto the grid with the top-left corner at `(x, y)`.
    ///
    /// Each row is one byte, most significant bit leftmost. Returns `true`
    /// when any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collision = false;

        for (dy, row) in rows.iter().enumerate() {
            for dx in 0..SPRITE_WIDTH {
                if row & (0x80 >> dx) == 0 {
                    continue;
                }
                let pixel = &mut self.pixels[Self::index(x + dx, y + dy)];
                if *pixel == 1 {
                    collision = true;
                }
                *pixel ^= 1;
            }
        }

        self.dirty = true;
        collision
    }

    /// Returns true when the grid changed since the last [`Self::take_dirty`].
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reports and clears the changed-since-last-repaint flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Number of lit pixels.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|pixel| **pixel == 1).count()
    }
}

#[cfg(test)]
mod tests {
    use super::{Framebuffer, DISPLAY_HEIGHT, DISPLAY_PIXELS, DISPLAY_WIDTH};

    #[test]
    fn default_is_blank_and_full_size() {
        let fb = Framebuffer::default();
        assert_eq!(fb.pixels().len(), DISPLAY_PIXELS);
        assert_eq!(fb.lit_count(), 0);
        assert!(!fb.is_dirty());
    }

    #[test]
    fn drawing_twice_toggles_off_and_reports_collision() {
        let mut fb = Framebuffer::default();

        assert!(!fb.draw_sprite(0, 0, &[0xFF]));
        assert_eq!(fb.lit_count(), 8);

        assert!(fb.draw_sprite(0, 0, &[0xFF]));
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn sprite_wraps_horizontally_and_vertically() {
        let mut fb = Framebuffer::default();
        fb.draw_sprite(DISPLAY_WIDTH - 4, DISPLAY_HEIGHT - 1, &[0xFF, 0x80]);

        for x in DISPLAY_WIDTH - 4..DISPLAY_WIDTH {
            assert_eq!(fb.pixel(x, DISPLAY_HEIGHT - 1), 1);
        }
        for x in 0..4 {
            assert_eq!(fb.pixel(x, DISPLAY_HEIGHT - 1), 1);
        }
        assert_eq!(fb.pixel(DISPLAY_WIDTH - 4, 0), 1);
        assert_eq!(fb.lit_count(), 9);
    }

    #[test]
    fn non_overlapping_draw_does_not_collide() {
        let mut fb = Framebuffer::default();
        fb.draw_sprite(0, 0, &[0xF0]);
        assert!(!fb.draw_sprite(0, 0, &[0x0F]));
        assert_eq!(fb.lit_count(), 8);
    }

    #[test]
    fn clear_and_dirty_tracking() {
        let mut fb = Framebuffer::default();
        fb.draw_sprite(10, 10, &[0x81]);
        assert!(fb.take_dirty());
        assert!(!fb.take_dirty());

        fb.clear();
        assert!(fb.is_dirty());
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn index_wraps_out_of_range_coordinates() {
        assert_eq!(Framebuffer::index(64, 0), 0);
        assert_eq!(Framebuffer::index(65, 33), 1 + DISPLAY_WIDTH);
    }
}
