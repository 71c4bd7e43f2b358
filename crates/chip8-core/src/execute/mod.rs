//! Instruction execution pipeline.
//!
//! One step is: fetch two bytes at PC, decode, execute, commit PC.
//! Handlers validate every address before mutating anything, so a faulting
//! instruction leaves no partial side effects and PC stays on it.

mod alu;
mod flags;
mod helpers;

pub use alu::alu;
pub use flags::FlagsUpdate;
pub use helpers::{bcd_digits, PcUpdate};

use rand::Rng;

use crate::{
    glyph_address, read_u16_be, validate_span, CoreState, Decoder, FaultCode, Instruction,
    Register, ReturnPolicy, RunOutcome, RunState, StepOutcome, TraceEvent, TraceSink,
    PROGRAM_START,
};

/// Executes a decoded instruction against `state` and returns how PC moves.
///
/// PC itself is not written here; [`step_one`] commits the returned update.
///
/// # Errors
///
/// Returns the contract violation raised by the instruction. State is unchanged
/// when an error is returned.
pub fn execute_instruction(
    instr: Instruction,
    state: &mut CoreState,
) -> Result<PcUpdate, FaultCode> {
    let pc = state.regs.pc();

    let update = match instr {
        Instruction::ClearScreen => {
            state.framebuffer.clear();
            PcUpdate::Advance
        }
        Instruction::Return => execute_return(state)?,
        Instruction::Sys { .. } | Instruction::Unknown { .. } => PcUpdate::Advance,
        Instruction::Jump { nnn } => PcUpdate::Jump(nnn),
        Instruction::Call { nnn } => {
            state.stack.push(pc)?;
            PcUpdate::Jump(nnn)
        }
        Instruction::SkipIfEqImm { x, nn } => PcUpdate::skip_if(state.regs.v(x) == nn),
        Instruction::SkipIfNeImm { x, nn } => PcUpdate::skip_if(state.regs.v(x) != nn),
        Instruction::SkipIfEqReg { x, y } => {
            PcUpdate::skip_if(state.regs.v(x) == state.regs.v(y))
        }
        Instruction::SkipIfNeReg { x, y } => {
            PcUpdate::skip_if(state.regs.v(x) != state.regs.v(y))
        }
        Instruction::LoadImm { x, nn } => {
            state.regs.set_v(x, nn);
            PcUpdate::Advance
        }
        Instruction::AddImm { x, nn } => {
            state.regs.set_v(x, state.regs.v(x).wrapping_add(nn));
            PcUpdate::Advance
        }
        Instruction::Alu { op, x, y } => {
            let (value, flags) = alu(op, state.regs.v(x), state.regs.v(y));
            state.regs.set_v(x, value);
            if let Some(flag) = flags.value() {
                state.regs.set_v(Register::VF, flag);
            }
            PcUpdate::Advance
        }
        Instruction::LoadIndex { nnn } => {
            state.regs.set_i(nnn);
            PcUpdate::Advance
        }
        Instruction::JumpOffset { nnn } => {
            PcUpdate::Jump(nnn.wrapping_add(u16::from(state.regs.v(Register::V0))))
        }
        Instruction::Random { x, nn } => {
            let byte: u8 = state.rng.gen();
            state.regs.set_v(x, byte & nn);
            PcUpdate::Advance
        }
        Instruction::Draw { x, y, n } => execute_draw(state, x, y, n)?,
        Instruction::SkipIfKey { x } => {
            PcUpdate::skip_if(state.keypad.is_pressed(state.regs.v(x)))
        }
        Instruction::SkipIfNotKey { x } => {
            PcUpdate::skip_if(!state.keypad.is_pressed(state.regs.v(x)))
        }
        Instruction::ReadDelay { x } => {
            state.regs.set_v(x, state.timers.delay());
            PcUpdate::Advance
        }
        Instruction::WaitKey { x } => match state.keypad.first_pressed() {
            Some(key) => {
                state.regs.set_v(x, key);
                PcUpdate::Advance
            }
            None => PcUpdate::Hold,
        },
        Instruction::SetDelay { x } => {
            state.timers.set_delay(state.regs.v(x));
            PcUpdate::Advance
        }
        Instruction::SetSound { x } => {
            state.timers.set_sound(state.regs.v(x));
            PcUpdate::Advance
        }
        Instruction::AddIndex { x } => {
            let i = state.regs.i().wrapping_add(u16::from(state.regs.v(x)));
            state.regs.set_i(i);
            PcUpdate::Advance
        }
        Instruction::LoadGlyph { x } => {
            state.regs.set_i(glyph_address(state.regs.v(x)));
            PcUpdate::Advance
        }
        Instruction::StoreBcd { x } => {
            let span = validate_span(state.regs.i(), 3)?;
            state.memory[span].copy_from_slice(&bcd_digits(state.regs.v(x)));
            PcUpdate::Advance
        }
        Instruction::StoreRegisters { x } => {
            let count = x.index() + 1;
            let span = validate_span(state.regs.i(), count)?;
            state.memory[span].copy_from_slice(&state.regs.all_v()[..count]);
            PcUpdate::Advance
        }
        Instruction::LoadRegisters { x } => {
            let span = validate_span(state.regs.i(), x.index() + 1)?;
            for (reg, byte) in Register::ALL.iter().zip(&state.memory[span]) {
                state.regs.set_v(*reg, *byte);
            }
            PcUpdate::Advance
        }
    };

    Ok(update)
}

fn execute_return(state: &mut CoreState) -> Result<PcUpdate, FaultCode> {
    let addr = match state.stack.pop() {
        Ok(addr) => addr,
        Err(FaultCode::StackUnderflow)
            if state.config.empty_return == ReturnPolicy::FallbackToProgramStart =>
        {
            PROGRAM_START
        }
        Err(cause) => return Err(cause),
    };
    Ok(PcUpdate::Jump(addr.wrapping_add(2)))
}

fn execute_draw(
    state: &mut CoreState,
    x: Register,
    y: Register,
    n: u8,
) -> Result<PcUpdate, FaultCode> {
    let origin_x = usize::from(state.regs.v(x));
    let origin_y = usize::from(state.regs.v(y));
    let span = validate_span(state.regs.i(), usize::from(n))?;

    let collision = state
        .framebuffer
        .draw_sprite(origin_x, origin_y, &state.memory[span]);
    state.regs.set_flag(collision);
    Ok(PcUpdate::Advance)
}

fn raise(
    state: &mut CoreState,
    trace: &mut dyn TraceSink,
    cause: FaultCode,
    pc: u16,
) -> StepOutcome {
    state.run_state = RunState::FaultLatched(cause);
    trace.on_event(TraceEvent::FaultRaised { cause, pc });
    StepOutcome::Fault { cause }
}

/// Runs one fetch-decode-execute cycle.
///
/// A latched fault short-circuits without touching state. An unknown word is
/// reported to `trace` as a warning and skipped.
pub fn step_one(state: &mut CoreState, trace: &mut dyn TraceSink) -> StepOutcome {
    if let Some(cause) = state.run_state.latched_fault() {
        return StepOutcome::Fault { cause };
    }

    let pc = state.regs.pc();
    let word = match read_u16_be(&state.memory, pc) {
        Ok(word) => word,
        Err(cause) => return raise(state, trace, cause, pc),
    };

    if state.config.tracing_enabled {
        trace.on_event(TraceEvent::InstructionStart { pc, word });
    }

    let instruction = Decoder::decode(word);
    let update = match execute_instruction(instruction, state) {
        Ok(update) => update,
        Err(cause) => return raise(state, trace, cause, pc),
    };
    state.regs.set_pc(update.apply(pc));

    match instruction {
        Instruction::Unknown { word } => {
            state.run_state = RunState::Running;
            trace.on_event(TraceEvent::UnknownOpcode { pc, word });
            StepOutcome::UnknownOpcode { word }
        }
        Instruction::WaitKey { x } if update == PcUpdate::Hold => {
            if !state.run_state.is_awaiting_key() {
                trace.on_event(TraceEvent::AwaitingKey { pc });
            }
            state.run_state = RunState::AwaitingKey { register: x };
            StepOutcome::AwaitingKey { register: x }
        }
        _ => {
            state.run_state = RunState::Running;
            StepOutcome::Retired { instruction }
        }
    }
}

/// Runs one driver tick: up to `cycles_per_tick` steps, then one timer tick.
///
/// Stepping stops early on a fault. The timers tick regardless, matching a
/// host that calls `tick_timers` once per frame whatever the CPU did.
pub fn run_tick(state: &mut CoreState, trace: &mut dyn TraceSink) -> RunOutcome {
    let mut outcome = RunOutcome {
        steps: 0,
        final_step: None,
    };

    for _ in 0..state.config.cycles_per_tick {
        let step = step_one(state, trace);
        outcome.steps += 1;
        outcome.final_step = Some(step);
        if matches!(step, StepOutcome::Fault { .. }) {
            break;
        }
    }

    state.tick_timers();
    outcome
}
