//! CHIP-8 interpreter core.
//!
//! The crate owns machine state and the instruction cycle only. Rendering,
//! keyboard events, ROM file loading and frame scheduling belong to the
//! host; see [`CoreState`] for the surface it drives.

/// Memory model primitives, font table and fixed region map.
pub mod memory;
pub use memory::{
    font_range, glyph_address, new_address_space, read_u16_be, validate_span, FONT_END, FONT_SET,
    FONT_START, GLYPH_BYTES, INSTRUCTION_BYTES, MAX_ROM_BYTES, MEMORY_BYTES, PROGRAM_END,
    PROGRAM_START,
};

/// Public host-facing API contract and integration types.
pub mod api;
pub use api::{
    CoreConfig, CoreState, NullTraceSink, RecordingTraceSink, ReturnPolicy, RunOutcome,
    StepOutcome, TraceEvent, TraceSink, DEFAULT_RNG_SEED,
};

/// ROM loading and reset.
pub mod loader;

/// Machine state model primitives.
pub mod state;
pub use state::{
    CallStack, Register, RegisterFile, RunState, GENERAL_REGISTER_COUNT, STACK_CAPACITY,
};

/// Display and keypad devices.
pub mod peripherals;
pub use peripherals::{
    Framebuffer, Keypad, DISPLAY_HEIGHT, DISPLAY_PIXELS, DISPLAY_WIDTH, KEY_COUNT, SPRITE_WIDTH,
};

/// Delay/sound timers and driver cadence constants.
pub mod timing;
pub use timing::{Timers, DEFAULT_CYCLES_PER_TICK, TICK_HZ};

/// Instruction decoder with operand extraction.
pub mod decoder;
pub use decoder::{AluOp, Decoder, Instruction};

/// Fault taxonomy for contract violations.
pub mod fault;
pub use fault::{FaultClass, FaultCode};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{execute_instruction, run_tick, step_one, FlagsUpdate, PcUpdate};

/// Instruction disassembly.
pub mod disasm;
pub use disasm::{disassemble_one, disassemble_range, disassemble_window, DisassemblyRow};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
