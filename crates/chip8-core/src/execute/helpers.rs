//! Helper functions for instruction execution.

/// Program-counter movement chosen by an instruction handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcUpdate {
    /// Move past this instruction (`PC += 2`).
    Advance,
    /// Move past this instruction and the next one (`PC += 4`).
    Skip,
    /// Set PC to an absolute address.
    Jump(u16),
    /// Leave PC on this instruction so it runs again.
    Hold,
}

impl PcUpdate {
    /// `Skip` when `condition` holds, otherwise `Advance`.
    #[must_use]
    pub const fn skip_if(condition: bool) -> Self {
        if condition {
            Self::Skip
        } else {
            Self::Advance
        }
    }

    /// Resolves the next PC from the current one.
    #[must_use]
    pub const fn apply(self, pc: u16) -> u16 {
        match self {
            Self::Advance => pc.wrapping_add(2),
            Self::Skip => pc.wrapping_add(4),
            Self::Jump(target) => target,
            Self::Hold => pc,
        }
    }
}

/// Hundreds, tens and ones digits of `value`.
#[must_use]
pub const fn bcd_digits(value: u8) -> [u8; 3] {
    [value / 100, (value / 10) % 10, value % 10]
}
