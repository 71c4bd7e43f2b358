//! Memory model primitives and fixed address-space layout.

/// Bounds-checked access helpers.
pub mod access;
/// Built-in hexadecimal font table.
pub mod font;
/// Fixed memory layout.
pub mod map;

pub use access::{read_u16_be, validate_span, INSTRUCTION_BYTES};
pub use font::{glyph_address, FONT_SET, GLYPH_BYTES};
pub use map::{font_range, FONT_END, FONT_START, PROGRAM_END, PROGRAM_START};

/// Size in bytes of the flat address space (4 KiB).
pub const MEMORY_BYTES: usize = 0x1000;

/// Largest ROM image that fits between [`PROGRAM_START`] and the end of memory.
pub const MAX_ROM_BYTES: usize = MEMORY_BYTES - PROGRAM_START as usize;

/// Allocates a zeroed 4 KiB backing store.
#[must_use]
pub fn new_address_space() -> Box<[u8]> {
    vec![0; MEMORY_BYTES].into_boxed_slice()
}
