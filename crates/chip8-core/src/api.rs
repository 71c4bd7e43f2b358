//! Public host-facing API contracts for embedding the interpreter core.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    new_address_space, CallStack, FaultCode, Framebuffer, Instruction, Keypad, Register,
    RegisterFile, RunState, Timers, DEFAULT_CYCLES_PER_TICK,
};

/// Seed used by [`CoreConfig::default`].
pub const DEFAULT_RNG_SEED: u64 = 0x0C8_5EED;

/// What `00EE` does when the call stack is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ReturnPolicy {
    /// Latch [`FaultCode::StackUnderflow`].
    #[default]
    Fault,
    /// Treat the missing return address as `0x200` and continue at `0x202`.
    FallbackToProgramStart,
}

/// Immutable configuration for a core instance, kept across resets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreConfig {
    /// Steps run by [`crate::run_tick`] before the timers tick.
    pub cycles_per_tick: u32,
    /// Seed for the `CXNN` random source.
    pub rng_seed: u64,
    /// Empty-stack return behaviour.
    pub empty_return: ReturnPolicy,
    /// Emits per-instruction trace events in addition to warnings and faults.
    pub tracing_enabled: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            cycles_per_tick: DEFAULT_CYCLES_PER_TICK,
            rng_seed: DEFAULT_RNG_SEED,
            empty_return: ReturnPolicy::Fault,
            tracing_enabled: false,
        }
    }
}

/// Complete machine state. Owned by the host; there is no process-wide
/// instance.
#[derive(Debug, Clone)]
pub struct CoreState {
    pub(crate) config: CoreConfig,
    /// `V0..VF`, `I` and `PC`.
    pub regs: RegisterFile,
    /// Flat 4 KiB memory image.
    pub memory: Box<[u8]>,
    /// Return addresses for `2NNN`/`00EE`.
    pub stack: CallStack,
    /// Delay and sound timers.
    pub timers: Timers,
    /// Key-held flags written by the host.
    pub keypad: Keypad,
    /// Display output.
    pub framebuffer: Framebuffer,
    /// Current execution state.
    pub run_state: RunState,
    pub(crate) rng: StdRng,
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new(CoreConfig::default())
    }
}

impl CoreState {
    /// Creates a freshly reset machine: font loaded, PC at `0x200`.
    #[must_use]
    pub fn new(config: CoreConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.rng_seed);
        let mut state = Self {
            config,
            regs: RegisterFile::default(),
            memory: new_address_space(),
            stack: CallStack::default(),
            timers: Timers::default(),
            keypad: Keypad::default(),
            framebuffer: Framebuffer::default(),
            run_state: RunState::Running,
            rng,
        };
        state.reset();
        state
    }

    /// Configuration this core was built with.
    #[must_use]
    pub const fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.regs.pc()
    }

    /// Reads a general-purpose register.
    #[must_use]
    pub const fn v(&self, reg: Register) -> u8 {
        self.regs.v(reg)
    }

    /// Row-major framebuffer, 2048 entries of 0 or 1.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.framebuffer.pixels()
    }

    /// Sets or clears a keypad flag. Call between steps, never during one.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set(key, pressed);
    }

    /// Decrements delay and sound timers once, floored at zero.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    /// True while the sound timer is non-zero.
    #[must_use]
    pub const fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    /// Runs one fetch-decode-execute cycle without tracing.
    pub fn step(&mut self) -> StepOutcome {
        crate::step_one(self, &mut NullTraceSink)
    }

    /// Runs one fetch-decode-execute cycle, reporting to `trace`.
    pub fn step_traced(&mut self, trace: &mut dyn TraceSink) -> StepOutcome {
        crate::step_one(self, trace)
    }
}

/// Output status from one `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StepOutcome {
    /// Instruction executed and PC moved on (or to its target).
    Retired {
        /// The executed instruction.
        instruction: Instruction,
    },
    /// `FX0A` found no key held; PC did not move.
    AwaitingKey {
        /// Register that will receive the key.
        register: Register,
    },
    /// Word outside the instruction set; skipped as a no-op.
    UnknownOpcode {
        /// Raw instruction word.
        word: u16,
    },
    /// Contract violation raised now or latched earlier.
    Fault {
        /// Fault code.
        cause: FaultCode,
    },
}

/// Aggregated outcome of one driver tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RunOutcome {
    /// Number of `step` calls made.
    pub steps: u32,
    /// Last step-level status observed, `None` when no step ran.
    pub final_step: Option<StepOutcome>,
}

/// Trace events emitted at step boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// Pre-execute event, only with [`CoreConfig::tracing_enabled`].
    InstructionStart {
        /// Program counter used for this fetch.
        pc: u16,
        /// Raw instruction word.
        word: u16,
    },
    /// Warning: unrecognized word skipped.
    UnknownOpcode {
        /// Program counter of the word.
        pc: u16,
        /// Raw instruction word.
        word: u16,
    },
    /// `FX0A` parked the core, emitted on entry to the wait only.
    AwaitingKey {
        /// Program counter of the wait instruction.
        pc: u16,
    },
    /// Fault raised by fetch or execute.
    FaultRaised {
        /// Fault code.
        cause: FaultCode,
        /// Program counter active when the fault was observed.
        pc: u16,
    },
}

impl TraceEvent {
    /// True for events a host should surface as warnings or errors.
    #[must_use]
    pub const fn is_warning(self) -> bool {
        matches!(self, Self::UnknownOpcode { .. } | Self::FaultRaised { .. })
    }
}

/// Sink trait for trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn on_event(&mut self, _event: TraceEvent) {}
}

/// Sink that keeps every event in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingTraceSink {
    /// Recorded events, oldest first.
    pub events: Vec<TraceEvent>,
}

impl RecordingTraceSink {
    /// Recorded warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &TraceEvent> + '_ {
        self.events.iter().filter(|event| event.is_warning())
    }
}

impl TraceSink for RecordingTraceSink {
    fn on_event(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CoreConfig, CoreState, RecordingTraceSink, ReturnPolicy, TraceEvent, TraceSink,
        DEFAULT_RNG_SEED,
    };
    use crate::{FaultCode, RunState, DEFAULT_CYCLES_PER_TICK, PROGRAM_START};

    #[test]
    fn default_core_config_matches_driver_contract() {
        let config = CoreConfig::default();

        assert_eq!(config.cycles_per_tick, DEFAULT_CYCLES_PER_TICK);
        assert_eq!(config.rng_seed, DEFAULT_RNG_SEED);
        assert_eq!(config.empty_return, ReturnPolicy::Fault);
        assert!(!config.tracing_enabled);
    }

    #[test]
    fn new_core_is_ready_at_program_start() {
        let state = CoreState::default();
        assert_eq!(state.pc(), PROGRAM_START);
        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(state.memory.len(), 4096);
        assert_eq!(state.pixels().len(), 2048);
        assert!(state.stack.is_empty());
    }

    #[test]
    fn key_setter_and_timer_tick_delegate() {
        let mut state = CoreState::default();
        state.set_key(0xA, true);
        assert!(state.keypad.is_pressed(0xA));

        state.timers.set_sound(1);
        assert!(state.sound_active());
        state.tick_timers();
        assert!(!state.sound_active());
    }

    #[test]
    fn recording_sink_filters_warnings() {
        let mut sink = RecordingTraceSink::default();
        sink.on_event(TraceEvent::InstructionStart {
            pc: 0x200,
            word: 0x00E0,
        });
        sink.on_event(TraceEvent::UnknownOpcode {
            pc: 0x202,
            word: 0xFFFF,
        });
        sink.on_event(TraceEvent::FaultRaised {
            cause: FaultCode::StackUnderflow,
            pc: 0x204,
        });

        assert_eq!(sink.events.len(), 3);
        assert_eq!(sink.warnings().count(), 2);
    }

    #[test]
    fn config_survives_on_the_core() {
        let config = CoreConfig {
            cycles_per_tick: 4,
            empty_return: ReturnPolicy::FallbackToProgramStart,
            ..CoreConfig::default()
        };
        let state = CoreState::new(config.clone());
        assert_eq!(state.config(), &config);
    }
}
