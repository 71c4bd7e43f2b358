use crate::PROGRAM_START;

/// Number of general-purpose registers (`V0..VF`).
pub const GENERAL_REGISTER_COUNT: usize = 16;

/// General-purpose register identifier.
///
/// `VF` doubles as the carry, borrow, shift-out and collision flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    V0 = 0x0,
    V1 = 0x1,
    V2 = 0x2,
    V3 = 0x3,
    V4 = 0x4,
    V5 = 0x5,
    V6 = 0x6,
    V7 = 0x7,
    V8 = 0x8,
    V9 = 0x9,
    VA = 0xA,
    VB = 0xB,
    VC = 0xC,
    VD = 0xD,
    VE = 0xE,
    VF = 0xF,
}

impl Register {
    /// Ordered list of all registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::V0,
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
        Self::V9,
        Self::VA,
        Self::VB,
        Self::VC,
        Self::VD,
        Self::VE,
        Self::VF,
    ];

    /// Returns the array index for this register (`0..=15`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes the low nibble of `bits` into a register.
    #[must_use]
    pub const fn from_nibble(bits: u8) -> Self {
        Self::ALL[(bits & 0x0F) as usize]
    }
}

/// Register file: `V0..VF`, the index register `I` and the program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    v: [u8; GENERAL_REGISTER_COUNT],
    i: u16,
    pc: u16,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self {
            v: [0; GENERAL_REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
        }
    }
}

impl RegisterFile {
    /// Reads a general-purpose register.
    #[must_use]
    pub const fn v(&self, reg: Register) -> u8 {
        self.v[reg.index()]
    }

    /// Writes a general-purpose register.
    pub fn set_v(&mut self, reg: Register, value: u8) {
        self.v[reg.index()] = value;
    }

    /// All sixteen registers in index order.
    #[must_use]
    pub const fn all_v(&self) -> &[u8; GENERAL_REGISTER_COUNT] {
        &self.v
    }

    /// Reads `VF`.
    #[must_use]
    pub const fn flag(&self) -> u8 {
        self.v[Register::VF.index()]
    }

    /// Writes `VF` as 0 or 1.
    pub fn set_flag(&mut self, set: bool) {
        self.v[Register::VF.index()] = u8::from(set);
    }

    /// Reads the index register `I`.
    #[must_use]
    pub const fn i(&self) -> u16 {
        self.i
    }

    /// Writes the index register `I`.
    pub fn set_i(&mut self, value: u16) {
        self.i = value;
    }

    /// Reads the program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }
}

#[cfg(test)]
mod tests {
    use super::{Register, RegisterFile, GENERAL_REGISTER_COUNT};
    use crate::PROGRAM_START;

    #[test]
    fn register_count_and_decode_match_architecture() {
        assert_eq!(GENERAL_REGISTER_COUNT, 16);

        for bits in 0_u8..=0xF {
            assert_eq!(Register::from_nibble(bits).index(), usize::from(bits));
        }

        assert_eq!(Register::from_nibble(0x1A), Register::VA);
    }

    #[test]
    fn register_file_tracks_each_register_independently() {
        let mut regs = RegisterFile::default();

        for (offset, reg) in (0_u8..).zip(Register::ALL.iter().copied()) {
            regs.set_v(reg, 0x10 + offset);
        }

        for (offset, reg) in (0_u8..).zip(Register::ALL.iter().copied()) {
            assert_eq!(regs.v(reg), 0x10 + offset);
        }
    }

    #[test]
    fn defaults_start_at_program_entry() {
        let regs = RegisterFile::default();
        assert_eq!(regs.pc(), PROGRAM_START);
        assert_eq!(regs.i(), 0);
        assert!(regs.all_v().iter().all(|v| *v == 0));
    }

    #[test]
    fn flag_is_vf() {
        let mut regs = RegisterFile::default();
        regs.set_flag(true);
        assert_eq!(regs.v(Register::VF), 1);
        regs.set_v(Register::VF, 0x7F);
        assert_eq!(regs.flag(), 0x7F);
        regs.set_flag(false);
        assert_eq!(regs.flag(), 0);
    }
}
