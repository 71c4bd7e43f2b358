//! Fixed CHIP-8 memory layout.
//!
//! `0x000..=0x04F` holds the font, `0x050..=0x1FF` is left zeroed for the
//! interpreter, and ROMs load from `0x200` to the last byte.

use std::ops::RangeInclusive;

/// Inclusive start address of the built-in font table.
pub const FONT_START: u16 = 0x000;
/// Inclusive end address of the built-in font table.
pub const FONT_END: u16 = 0x04F;
/// Inclusive start address of the program region (ROM load address).
pub const PROGRAM_START: u16 = 0x200;
/// Inclusive end address of the program region.
pub const PROGRAM_END: u16 = 0xFFF;

const _: () = assert_layout();

const fn assert_layout() {
    assert!(
        (FONT_END - FONT_START + 1) as usize == crate::memory::FONT_SET.len(),
        "font region must hold exactly the font table"
    );
    assert!(FONT_END < PROGRAM_START, "font must sit below programs");
    assert!(
        PROGRAM_END as usize + 1 == crate::memory::MEMORY_BYTES,
        "program region must end at the last byte"
    );
}

/// Index range of the font table inside memory.
#[must_use]
pub const fn font_range() -> RangeInclusive<usize> {
    FONT_START as usize..=FONT_END as usize
}

#[cfg(test)]
mod tests {
    use super::{font_range, PROGRAM_END, PROGRAM_START};
    use crate::{FONT_SET, MAX_ROM_BYTES};

    #[test]
    fn font_range_covers_the_glyph_table() {
        assert_eq!(font_range().count(), FONT_SET.len());
        assert_eq!(*font_range().start(), 0);
    }

    #[test]
    fn program_region_holds_the_largest_rom() {
        assert_eq!(
            usize::from(PROGRAM_END - PROGRAM_START) + 1,
            MAX_ROM_BYTES
        );
    }
}
