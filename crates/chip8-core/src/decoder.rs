//! Instruction decoder for the CHIP-8 instruction set.
//!
//! Decoding is total: every 16-bit word maps to an [`Instruction`], with
//! words outside the standard set landing in [`Instruction::Unknown`].
//! Operand fields are extracted once here so the executor never re-masks
//! the raw word.

#![allow(missing_docs)]

use crate::Register;

/// Second-level operation selector for the `8XY_` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AluOp {
    /// `8XY0`: VX := VY.
    Set,
    /// `8XY1`: VX |= VY.
    Or,
    /// `8XY2`: VX &= VY.
    And,
    /// `8XY3`: VX ^= VY.
    Xor,
    /// `8XY4`: VX += VY, VF := carry.
    Add,
    /// `8XY5`: VX -= VY, VF := not borrow.
    Sub,
    /// `8XY6`: VX >>= 1, VF := shifted-out bit.
    ShiftRight,
    /// `8XY7`: VX := VY - VX, VF := not borrow.
    SubReverse,
    /// `8XYE`: VX <<= 1, VF := shifted-out bit.
    ShiftLeft,
}

impl AluOp {
    /// Decodes the low nibble of an `8XY_` word.
    #[must_use]
    pub const fn from_nibble(n: u8) -> Option<Self> {
        match n {
            0x0 => Some(Self::Set),
            0x1 => Some(Self::Or),
            0x2 => Some(Self::And),
            0x3 => Some(Self::Xor),
            0x4 => Some(Self::Add),
            0x5 => Some(Self::Sub),
            0x6 => Some(Self::ShiftRight),
            0x7 => Some(Self::SubReverse),
            0xE => Some(Self::ShiftLeft),
            _ => None,
        }
    }

    /// Low-nibble encoding of this operation.
    #[must_use]
    pub const fn nibble(self) -> u8 {
        match self {
            Self::Set => 0x0,
            Self::Or => 0x1,
            Self::And => 0x2,
            Self::Xor => 0x3,
            Self::Add => 0x4,
            Self::Sub => 0x5,
            Self::ShiftRight => 0x6,
            Self::SubReverse => 0x7,
            Self::ShiftLeft => 0xE,
        }
    }
}

/// Decoded instruction with operand fields already extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Instruction {
    /// `00E0`
    ClearScreen,
    /// `00EE`
    Return,
    /// `0NNN`, ignored by this interpreter.
    Sys { nnn: u16 },
    /// `1NNN`
    Jump { nnn: u16 },
    /// `2NNN`
    Call { nnn: u16 },
    /// `3XNN`
    SkipIfEqImm { x: Register, nn: u8 },
    /// `4XNN`
    SkipIfNeImm { x: Register, nn: u8 },
    /// `5XY0`
    SkipIfEqReg { x: Register, y: Register },
    /// `6XNN`
    LoadImm { x: Register, nn: u8 },
    /// `7XNN`
    AddImm { x: Register, nn: u8 },
    /// `8XY_`
    Alu { op: AluOp, x: Register, y: Register },
    /// `9XY0`
    SkipIfNeReg { x: Register, y: Register },
    /// `ANNN`
    LoadIndex { nnn: u16 },
    /// `BNNN`
    JumpOffset { nnn: u16 },
    /// `CXNN`
    Random { x: Register, nn: u8 },
    /// `DXYN`
    Draw { x: Register, y: Register, n: u8 },
    /// `EX9E`
    SkipIfKey { x: Register },
    /// `EXA1`
    SkipIfNotKey { x: Register },
    /// `FX07`
    ReadDelay { x: Register },
    /// `FX0A`
    WaitKey { x: Register },
    /// `FX15`
    SetDelay { x: Register },
    /// `FX18`
    SetSound { x: Register },
    /// `FX1E`
    AddIndex { x: Register },
    /// `FX29`
    LoadGlyph { x: Register },
    /// `FX33`
    StoreBcd { x: Register },
    /// `FX55`
    StoreRegisters { x: Register },
    /// `FX65`
    LoadRegisters { x: Register },
    /// Any word outside the standard instruction set.
    Unknown { word: u16 },
}

/// High nibble (`opcode & 0xF000`, shifted down).
#[must_use]
pub const fn family(word: u16) -> u8 {
    (word >> 12) as u8
}

/// Second nibble, the `X` register field.
#[must_use]
pub const fn x_field(word: u16) -> Register {
    Register::from_nibble((word >> 8) as u8)
}

/// Third nibble, the `Y` register field.
#[must_use]
pub const fn y_field(word: u16) -> Register {
    Register::from_nibble((word >> 4) as u8)
}

/// Low nibble.
#[must_use]
pub const fn n_field(word: u16) -> u8 {
    (word & 0x000F) as u8
}

/// Low byte.
#[must_use]
pub const fn nn_field(word: u16) -> u8 {
    (word & 0x00FF) as u8
}

/// Low twelve bits, an address.
#[must_use]
pub const fn nnn_field(word: u16) -> u16 {
    word & 0x0FFF
}

/// Instruction decoder.
pub struct Decoder;

impl Decoder {
    /// Decodes a 16-bit instruction word.
    #[must_use]
    pub const fn decode(word: u16) -> Instruction {
        let x = x_field(word);
        let y = y_field(word);
        let n = n_field(word);
        let nn = nn_field(word);
        let nnn = nnn_field(word);

        match family(word) {
            0x0 => match word {
                0x00E0 => Instruction::ClearScreen,
                0x00EE => Instruction::Return,
                _ => Instruction::Sys { nnn },
            },
            0x1 => Instruction::Jump { nnn },
            0x2 => Instruction::Call { nnn },
            0x3 => Instruction::SkipIfEqImm { x, nn },
            0x4 => Instruction::SkipIfNeImm { x, nn },
            0x5 if n == 0 => Instruction::SkipIfEqReg { x, y },
            0x6 => Instruction::LoadImm { x, nn },
            0x7 => Instruction::AddImm { x, nn },
            0x8 => match AluOp::from_nibble(n) {
                Some(op) => Instruction::Alu { op, x, y },
                None => Instruction::Unknown { word },
            },
            0x9 if n == 0 => Instruction::SkipIfNeReg { x, y },
            0xA => Instruction::LoadIndex { nnn },
            0xB => Instruction::JumpOffset { nnn },
            0xC => Instruction::Random { x, nn },
            0xD => Instruction::Draw { x, y, n },
            0xE => match nn {
                0x9E => Instruction::SkipIfKey { x },
                0xA1 => Instruction::SkipIfNotKey { x },
                _ => Instruction::Unknown { word },
            },
            0xF => match nn {
                0x07 => Instruction::ReadDelay { x },
                0x0A => Instruction::WaitKey { x },
                0x15 => Instruction::SetDelay { x },
                0x18 => Instruction::SetSound { x },
                0x1E => Instruction::AddIndex { x },
                0x29 => Instruction::LoadGlyph { x },
                0x33 => Instruction::StoreBcd { x },
                0x55 => Instruction::StoreRegisters { x },
                0x65 => Instruction::LoadRegisters { x },
                _ => Instruction::Unknown { word },
            },
            _ => Instruction::Unknown { word },
        }
    }
}

const fn xy(prefix: u16, x: Register, y: Register, n: u8) -> u16 {
    prefix | ((x as u16) << 8) | ((y as u16) << 4) | (n as u16 & 0xF)
}

const fn xnn(prefix: u16, x: Register, nn: u8) -> u16 {
    prefix | ((x as u16) << 8) | nn as u16
}

impl Instruction {
    /// Re-encodes this instruction to its 16-bit word.
    #[must_use]
    pub const fn encode(self) -> u16 {
        match self {
            Self::ClearScreen => 0x00E0,
            Self::Return => 0x00EE,
            Self::Sys { nnn } => nnn & 0x0FFF,
            Self::Jump { nnn } => 0x1000 | (nnn & 0x0FFF),
            Self::Call { nnn } => 0x2000 | (nnn & 0x0FFF),
            Self::SkipIfEqImm { x, nn } => xnn(0x3000, x, nn),
            Self::SkipIfNeImm { x, nn } => xnn(0x4000, x, nn),
            Self::SkipIfEqReg { x, y } => xy(0x5000, x, y, 0),
            Self::LoadImm { x, nn } => xnn(0x6000, x, nn),
            Self::AddImm { x, nn } => xnn(0x7000, x, nn),
            Self::Alu { op, x, y } => xy(0x8000, x, y, op.nibble()),
            Self::SkipIfNeReg { x, y } => xy(0x9000, x, y, 0),
            Self::LoadIndex { nnn } => 0xA000 | (nnn & 0x0FFF),
            Self::JumpOffset { nnn } => 0xB000 | (nnn & 0x0FFF),
            Self::Random { x, nn } => xnn(0xC000, x, nn),
            Self::Draw { x, y, n } => xy(0xD000, x, y, n),
            Self::SkipIfKey { x } => xnn(0xE000, x, 0x9E),
            Self::SkipIfNotKey { x } => xnn(0xE000, x, 0xA1),
            Self::ReadDelay { x } => xnn(0xF000, x, 0x07),
            Self::WaitKey { x } => xnn(0xF000, x, 0x0A),
            Self::SetDelay { x } => xnn(0xF000, x, 0x15),
            Self::SetSound { x } => xnn(0xF000, x, 0x18),
            Self::AddIndex { x } => xnn(0xF000, x, 0x1E),
            Self::LoadGlyph { x } => xnn(0xF000, x, 0x29),
            Self::StoreBcd { x } => xnn(0xF000, x, 0x33),
            Self::StoreRegisters { x } => xnn(0xF000, x, 0x55),
            Self::LoadRegisters { x } => xnn(0xF000, x, 0x65),
            Self::Unknown { word } => word,
        }
    }

    /// Returns true when the instruction sets PC itself rather than
    /// advancing past the current word.
    #[must_use]
    pub const fn is_control_transfer(self) -> bool {
        matches!(
            self,
            Self::Return
                | Self::Jump { .. }
                | Self::Call { .. }
                | Self::JumpOffset { .. }
                | Self::WaitKey { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_fields_are_extracted_from_the_right_nibbles() {
        let word = 0xD7A5;
        assert_eq!(family(word), 0xD);
        assert_eq!(x_field(word), Register::V7);
        assert_eq!(y_field(word), Register::VA);
        assert_eq!(n_field(word), 0x5);
        assert_eq!(nn_field(word), 0xA5);
        assert_eq!(nnn_field(word), 0x7A5);
    }

    #[test]
    fn fixed_words_in_the_zero_family() {
        assert_eq!(Decoder::decode(0x00E0), Instruction::ClearScreen);
        assert_eq!(Decoder::decode(0x00EE), Instruction::Return);
        assert_eq!(Decoder::decode(0x0123), Instruction::Sys { nnn: 0x123 });
    }

    #[test]
    fn alu_family_dispatches_on_low_nibble() {
        assert_eq!(
            Decoder::decode(0x8124),
            Instruction::Alu {
                op: AluOp::Add,
                x: Register::V1,
                y: Register::V2
            }
        );
        assert_eq!(
            Decoder::decode(0x834E),
            Instruction::Alu {
                op: AluOp::ShiftLeft,
                x: Register::V3,
                y: Register::V4
            }
        );
        for n in [0x8_u16, 0x9, 0xA, 0xB, 0xC, 0xD, 0xF] {
            let word = 0x8120 | n;
            assert_eq!(Decoder::decode(word), Instruction::Unknown { word });
        }
    }

    #[test]
    fn register_compare_skips_require_zero_low_nibble() {
        assert_eq!(
            Decoder::decode(0x5120),
            Instruction::SkipIfEqReg {
                x: Register::V1,
                y: Register::V2
            }
        );
        assert_eq!(
            Decoder::decode(0x5121),
            Instruction::Unknown { word: 0x5121 }
        );
        assert_eq!(
            Decoder::decode(0x9AB0),
            Instruction::SkipIfNeReg {
                x: Register::VA,
                y: Register::VB
            }
        );
        assert_eq!(
            Decoder::decode(0x9AB7),
            Instruction::Unknown { word: 0x9AB7 }
        );
    }

    #[test]
    fn key_and_misc_families_dispatch_on_low_byte() {
        assert_eq!(
            Decoder::decode(0xE59E),
            Instruction::SkipIfKey { x: Register::V5 }
        );
        assert_eq!(
            Decoder::decode(0xE5A1),
            Instruction::SkipIfNotKey { x: Register::V5 }
        );
        assert_eq!(
            Decoder::decode(0xE500),
            Instruction::Unknown { word: 0xE500 }
        );
        assert_eq!(
            Decoder::decode(0xF20A),
            Instruction::WaitKey { x: Register::V2 }
        );
        assert_eq!(
            Decoder::decode(0xFF65),
            Instruction::LoadRegisters { x: Register::VF }
        );
        assert_eq!(
            Decoder::decode(0xF0FF),
            Instruction::Unknown { word: 0xF0FF }
        );
    }

    #[test]
    fn encode_restores_every_standard_word() {
        let samples = [
            0x00E0, 0x00EE, 0x0ABC, 0x1234, 0x2FFF, 0x3A12, 0x4B34, 0x5CD0, 0x6E56, 0x7F78,
            0x8010, 0x8121, 0x8232, 0x8343, 0x8454, 0x8565, 0x8676, 0x8787, 0x898E, 0x9AB0,
            0xA321, 0xB456, 0xC7FF, 0xD12F, 0xE39E, 0xE4A1, 0xF507, 0xF60A, 0xF715, 0xF818,
            0xF91E, 0xFA29, 0xFB33, 0xFC55, 0xFD65,
        ];
        for word in samples {
            let instr = Decoder::decode(word);
            assert!(!matches!(instr, Instruction::Unknown { .. }), "{word:#06x}");
            assert_eq!(instr.encode(), word, "{word:#06x}");
        }
    }

    #[test]
    fn control_transfer_classification() {
        assert!(Decoder::decode(0x1200).is_control_transfer());
        assert!(Decoder::decode(0x00EE).is_control_transfer());
        assert!(Decoder::decode(0xF00A).is_control_transfer());
        assert!(!Decoder::decode(0x3000).is_control_transfer());
        assert!(!Decoder::decode(0xFFFF).is_control_transfer());
    }
}
