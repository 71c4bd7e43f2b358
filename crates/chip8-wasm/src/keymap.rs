//! Browser keyboard layout for the sixteen-key hex keypad.
//!
//! The left-hand block `1234 / QWER / ASDF / ZXCV` maps onto the COSMAC VIP
//! layout, and the arrow keys alias the keys most games use for movement.

/// Maps a `KeyboardEvent.key` value to a keypad index.
#[must_use]
pub fn key_index(key: &str) -> Option<u8> {
    let index = match key.to_ascii_lowercase().as_str() {
        "1" => 0x1,
        "2" | "arrowup" => 0x2,
        "3" => 0x3,
        "4" => 0xC,
        "q" | "arrowleft" => 0x4,
        "w" => 0x5,
        "e" | "arrowright" => 0x6,
        "r" => 0xD,
        "a" => 0x7,
        "s" | "arrowdown" => 0x8,
        "d" => 0x9,
        "f" => 0xE,
        "z" => 0xA,
        "x" => 0x0,
        "c" => 0xB,
        "v" => 0xF,
        _ => return None,
    };
    Some(index)
}
