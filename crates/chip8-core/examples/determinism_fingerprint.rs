//! Prints a fingerprint of a seeded run so two hosts can compare results.
//!
//! The program draws random font glyphs at random positions, so the hash
//! covers the random source as well as the draw and timer paths.

use chip8_core::{run_tick, CoreConfig, CoreState, Instruction, NullTraceSink, Register};
use proptest as _;
use rand as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

const TICKS: u32 = 600;

fn program() -> Vec<u8> {
    let words = [
        Instruction::Random {
            x: Register::V0,
            nn: 0x3F,
        },
        Instruction::Random {
            x: Register::V1,
            nn: 0x1F,
        },
        Instruction::Random {
            x: Register::V2,
            nn: 0x0F,
        },
        Instruction::LoadGlyph { x: Register::V2 },
        Instruction::Draw {
            x: Register::V0,
            y: Register::V1,
            n: 5,
        },
        Instruction::SetDelay { x: Register::V2 },
        Instruction::Jump { nnn: 0x200 },
    ];
    words
        .iter()
        .flat_map(|instr| instr.encode().to_be_bytes())
        .collect()
}

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn fingerprint() -> String {
    let mut state =
        CoreState::with_rom(CoreConfig::default(), &program()).expect("program should fit");
    let mut sink = NullTraceSink;
    let mut steps = 0_u32;
    for _ in 0..TICKS {
        steps += run_tick(&mut state, &mut sink).steps;
    }

    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    hash_bytes(&mut hash, &steps.to_le_bytes());
    hash_bytes(&mut hash, state.regs.all_v());
    hash_bytes(&mut hash, &state.regs.i().to_le_bytes());
    hash_bytes(&mut hash, &state.pc().to_le_bytes());
    hash_bytes(&mut hash, &[state.timers.delay(), state.timers.sound()]);
    hash_bytes(&mut hash, state.pixels());
    hash_bytes(&mut hash, &state.memory);

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}
