//! `VF` side effects of arithmetic instructions.

/// Describes how `VF` changes after the result register is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagsUpdate {
    /// `VF` keeps whatever the result write left in it.
    #[default]
    None,
    /// `VF` is overwritten with 1 or 0.
    Set(bool),
}

impl FlagsUpdate {
    /// Value written to `VF`, if any.
    #[must_use]
    pub const fn value(self) -> Option<u8> {
        match self {
            Self::None => None,
            Self::Set(flag) => Some(flag as u8),
        }
    }
}
