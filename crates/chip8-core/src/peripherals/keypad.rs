/// Number of hexadecimal keys.
pub const KEY_COUNT: usize = 16;

/// Sixteen key-held flags, written by the host and read by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    /// Sets or clears the held flag for `key`. Keys above `0xF` are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(slot) = self.keys.get_mut(usize::from(key)) {
            *slot = pressed;
        }
    }

    /// Marks `key` as held.
    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    /// Marks `key` as released.
    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    /// Returns true when `key` is held. Keys above `0xF` never are.
    #[must_use]
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(usize::from(key)).copied().unwrap_or(false)
    }

    /// Lowest-numbered held key.
    #[must_use]
    pub fn first_pressed(&self) -> Option<u8> {
        (0_u8..).zip(self.keys).find_map(|(key, held)| held.then_some(key))
    }

    /// Releases every key.
    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    /// Held flags in key order.
    #[must_use]
    pub const fn as_array(&self) -> &[bool; KEY_COUNT] {
        &self.keys
    }
}
