//! Host-facing devices: display and keypad.

/// 64x32 monochrome framebuffer.
pub mod framebuffer;
/// Sixteen-key hexadecimal keypad.
pub mod keypad;

pub use framebuffer::{
    Framebuffer, DISPLAY_HEIGHT, DISPLAY_PIXELS, DISPLAY_WIDTH, SPRITE_WIDTH,
};
pub use keypad::{Keypad, KEY_COUNT};
