//! Instruction disassembly using conventional CHIP-8 mnemonics.

use std::fmt;

use crate::{AluOp, Decoder, Instruction, Register, INSTRUCTION_BYTES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single disassembled instruction row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisassemblyRow {
    /// Address of the instruction word.
    pub addr: u16,
    /// Raw big-endian instruction word.
    pub raw: u16,
    /// Mnemonic such as `LD`, `DRW` or `.word` for unknown words.
    pub mnemonic: String,
    /// Formatted operands, e.g. `V1, 0x2A`.
    pub operands: String,
    /// True when the word is outside the instruction set.
    pub is_unknown: bool,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:X}", self.index())
    }
}

impl Instruction {
    /// Conventional mnemonic for this instruction.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::ClearScreen => "CLS",
            Self::Return => "RET",
            Self::Sys { .. } => "SYS",
            Self::Jump { .. } | Self::JumpOffset { .. } => "JP",
            Self::Call { .. } => "CALL",
            Self::SkipIfEqImm { .. } | Self::SkipIfEqReg { .. } => "SE",
            Self::SkipIfNeImm { .. } | Self::SkipIfNeReg { .. } => "SNE",
            Self::AddImm { .. } | Self::AddIndex { .. } => "ADD",
            Self::Alu { op, .. } => match op {
                AluOp::Set => "LD",
                AluOp::Or => "OR",
                AluOp::And => "AND",
                AluOp::Xor => "XOR",
                AluOp::Add => "ADD",
                AluOp::Sub => "SUB",
                AluOp::ShiftRight => "SHR",
                AluOp::SubReverse => "SUBN",
                AluOp::ShiftLeft => "SHL",
            },
            Self::Random { .. } => "RND",
            Self::Draw { .. } => "DRW",
            Self::SkipIfKey { .. } => "SKP",
            Self::SkipIfNotKey { .. } => "SKNP",
            Self::LoadImm { .. }
            | Self::LoadIndex { .. }
            | Self::ReadDelay { .. }
            | Self::WaitKey { .. }
            | Self::SetDelay { .. }
            | Self::SetSound { .. }
            | Self::LoadGlyph { .. }
            | Self::StoreBcd { .. }
            | Self::StoreRegisters { .. }
            | Self::LoadRegisters { .. } => "LD",
            Self::Unknown { .. } => ".word",
        }
    }

    /// Formatted operand list; empty for `CLS` and `RET`.
    #[must_use]
    pub fn operands(self) -> String {
        match self {
            Self::ClearScreen | Self::Return => String::new(),
            Self::Sys { nnn } | Self::Jump { nnn } | Self::Call { nnn } => format!("0x{nnn:03X}"),
            Self::JumpOffset { nnn } => format!("V0, 0x{nnn:03X}"),
            Self::SkipIfEqImm { x, nn }
            | Self::SkipIfNeImm { x, nn }
            | Self::LoadImm { x, nn }
            | Self::AddImm { x, nn }
            | Self::Random { x, nn } => format!("{x}, 0x{nn:02X}"),
            Self::SkipIfEqReg { x, y } | Self::SkipIfNeReg { x, y } => format!("{x}, {y}"),
            Self::Alu { op, x, y } => match op {
                AluOp::ShiftRight | AluOp::ShiftLeft => format!("{x}"),
                _ => format!("{x}, {y}"),
            },
            Self::LoadIndex { nnn } => format!("I, 0x{nnn:03X}"),
            Self::Draw { x, y, n } => format!("{x}, {y}, {n}"),
            Self::SkipIfKey { x } | Self::SkipIfNotKey { x } => format!("{x}"),
            Self::ReadDelay { x } => format!("{x}, DT"),
            Self::WaitKey { x } => format!("{x}, K"),
            Self::SetDelay { x } => format!("DT, {x}"),
            Self::SetSound { x } => format!("ST, {x}"),
            Self::AddIndex { x } => format!("I, {x}"),
            Self::LoadGlyph { x } => format!("F, {x}"),
            Self::StoreBcd { x } => format!("B, {x}"),
            Self::StoreRegisters { x } => format!("[I], {x}"),
            Self::LoadRegisters { x } => format!("{x}, [I]"),
            Self::Unknown { word } => format!("0x{word:04X}"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands = self.operands();
        if operands.is_empty() {
            f.write_str(self.mnemonic())
        } else {
            write!(f, "{} {operands}", self.mnemonic())
        }
    }
}

/// Disassembles the word at `addr`, or `None` when it runs past `memory`.
#[must_use]
pub fn disassemble_one(addr: u16, memory: &[u8]) -> Option<DisassemblyRow> {
    let hi = *memory.get(usize::from(addr))?;
    let lo = *memory.get(usize::from(addr) + 1)?;
    let raw = u16::from_be_bytes([hi, lo]);
    let instr = Decoder::decode(raw);

    Some(DisassemblyRow {
        addr,
        raw,
        mnemonic: instr.mnemonic().to_string(),
        operands: instr.operands(),
        is_unknown: matches!(instr, Instruction::Unknown { .. }),
    })
}

/// Disassembles up to `count` consecutive words starting at `start`.
///
/// Stops early at the end of memory. Data embedded in a ROM disassembles as
/// whatever instruction its bytes happen to encode.
#[must_use]
pub fn disassemble_range(start: u16, count: usize, memory: &[u8]) -> Vec<DisassemblyRow> {
    let mut rows = Vec::with_capacity(count.min(memory.len() / 2));
    let mut addr = start;
    for _ in 0..count {
        let Some(row) = disassemble_one(addr, memory) else {
            break;
        };
        rows.push(row);
        let Some(next) = addr.checked_add(INSTRUCTION_BYTES) else {
            break;
        };
        addr = next;
    }
    rows
}

/// Disassembles `before` words ahead of `center`, the word at `center`, and
/// `after` words following it. Rows that would fall outside memory are
/// omitted.
#[must_use]
pub fn disassemble_window(
    center: u16,
    before: usize,
    after: usize,
    memory: &[u8],
) -> Vec<DisassemblyRow> {
    let back = u16::try_from(before)
        .unwrap_or(u16::MAX)
        .saturating_mul(INSTRUCTION_BYTES)
        .min(center);
    let start = center - back;
    let leading = usize::from(back / INSTRUCTION_BYTES);
    disassemble_range(start, leading + 1 + after, memory)
}
