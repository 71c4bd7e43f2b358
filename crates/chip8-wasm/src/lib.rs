use chip8_core::{
    run_tick, CoreConfig, CoreState, FaultClass, FaultCode, StepOutcome, TraceEvent, TraceSink,
    DISPLAY_HEIGHT, DISPLAY_WIDTH,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub mod keymap;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format!($($t)*)))
}

/// JS-compatible version of StepOutcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WasmStepOutcome {
    Retired {
        instruction: String,
        word: u16,
    },
    AwaitingKey {
        register: u8,
    },
    UnknownOpcode {
        word: u16,
    },
    Fault {
        cause: String,
        code: u8,
        class: FaultClass,
    },
}

impl From<StepOutcome> for WasmStepOutcome {
    fn from(outcome: StepOutcome) -> Self {
        match outcome {
            StepOutcome::Retired { instruction } => Self::Retired {
                instruction: instruction.to_string(),
                word: instruction.encode(),
            },
            StepOutcome::AwaitingKey { register } => Self::AwaitingKey {
                register: register as u8,
            },
            StepOutcome::UnknownOpcode { word } => Self::UnknownOpcode { word },
            StepOutcome::Fault { cause } => Self::Fault {
                cause: cause.to_string(),
                code: cause.as_u8(),
                class: cause.class(),
            },
        }
    }
}

/// JS-compatible version of RunOutcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasmRunOutcome {
    pub steps: u32,
    pub final_step: Option<WasmStepOutcome>,
}

fn fault_message(cause: FaultCode) -> String {
    format!("fault {:#04x} ({:?}): {cause}", cause.as_u8(), cause.class())
}

/// Forwards warnings and faults to the browser console.
struct ConsoleTraceSink;

impl TraceSink for ConsoleTraceSink {
    fn on_event(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::UnknownOpcode { pc, word } => web_sys::console::warn_1(
                &format!("unknown opcode {word:#06x} at {pc:#05x}").into(),
            ),
            TraceEvent::FaultRaised { cause, pc } => web_sys::console::error_1(
                &format!("{} at {pc:#05x}", fault_message(cause)).into(),
            ),
            TraceEvent::InstructionStart { pc, word } => console_log!("{pc:#05x}: {word:#06x}"),
            TraceEvent::AwaitingKey { .. } => {}
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(Into::into)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn random_seed() -> u64 {
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}

#[wasm_bindgen]
pub struct WasmCore {
    state: CoreState,
}

#[wasm_bindgen]
impl WasmCore {
    /// Creates a core seeded from `Math.random`.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(random_seed())
    }

    /// Creates a core with a fixed random seed, for reproducible runs.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();
        Self {
            state: CoreState::new(CoreConfig {
                rng_seed: seed,
                ..CoreConfig::default()
            }),
        }
    }

    /// Resets the machine and loads a ROM at 0x200.
    ///
    /// # Errors
    ///
    /// Rejects ROMs larger than 3584 bytes.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), JsValue> {
        let loaded = self
            .load(rom)
            .map_err(|cause| JsValue::from_str(&fault_message(cause)))?;
        console_log!("Loaded ROM ({loaded} bytes)");
        Ok(())
    }

    /// Resets the core; the loaded ROM is discarded.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Executes a single instruction.
    /// Returns the step outcome as a JSON object.
    ///
    /// # Errors
    ///
    /// Fails only if the outcome cannot be converted to a JS value.
    pub fn step(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.state.step_traced(&mut ConsoleTraceSink);
        to_js(&WasmStepOutcome::from(outcome))
    }

    /// Runs one 60 Hz frame: the configured number of steps, then a timer tick.
    ///
    /// # Errors
    ///
    /// Fails only if the outcome cannot be converted to a JS value.
    pub fn run_frame(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.run_frame_with(&mut ConsoleTraceSink);
        to_js(&outcome)
    }

    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
    }

    /// Handles a `keydown` event; returns false for unmapped keys.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_mapped_key(key, true)
    }

    /// Handles a `keyup` event; returns false for unmapped keys.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_mapped_key(key, false)
    }

    pub fn set_key(&mut self, index: u8, pressed: bool) {
        self.state.set_key(index, pressed);
    }

    #[must_use]
    pub fn sound_active(&self) -> bool {
        self.state.sound_active()
    }

    #[must_use]
    pub fn pc(&self) -> u16 {
        self.state.pc()
    }

    #[must_use]
    pub fn width() -> usize {
        DISPLAY_WIDTH
    }

    #[must_use]
    pub fn height() -> usize {
        DISPLAY_HEIGHT
    }

    /// True once after each frame that cleared or drew; lets the page skip repaints.
    pub fn frame_changed(&mut self) -> bool {
        self.state.framebuffer.take_dirty()
    }

    /// Returns a copy of the framebuffer, one byte per pixel.
    #[must_use]
    pub fn framebuffer(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.state.pixels())
    }

    /// Returns the framebuffer as RGBA, green on black, ready for `ImageData`.
    #[must_use]
    pub fn rgba_frame(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(rgba(self.state.pixels()).as_slice())
    }
}

impl WasmCore {
    fn load(&mut self, rom: &[u8]) -> Result<usize, FaultCode> {
        self.state.reload(rom)?;
        Ok(rom.len())
    }

    fn run_frame_with(&mut self, trace: &mut dyn TraceSink) -> WasmRunOutcome {
        let outcome = run_tick(&mut self.state, trace);
        WasmRunOutcome {
            steps: outcome.steps,
            final_step: outcome.final_step.map(WasmStepOutcome::from),
        }
    }

    fn set_mapped_key(&mut self, key: &str, pressed: bool) -> bool {
        keymap::key_index(key).is_some_and(|index| {
            self.state.set_key(index, pressed);
            true
        })
    }
}

impl Default for WasmCore {
    fn default() -> Self {
        Self::new()
    }
}

fn rgba(pixels: &[u8]) -> Vec<u8> {
    pixels
        .iter()
        .flat_map(|pixel| [0, if *pixel == 0 { 0 } else { 0xFF }, 0, 0xFF])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{fault_message, rgba, WasmCore, WasmRunOutcome, WasmStepOutcome};
    use chip8_core::{
        FaultClass, FaultCode, Instruction, Register, RecordingTraceSink, StepOutcome,
        DEFAULT_CYCLES_PER_TICK, MAX_ROM_BYTES,
    };

    fn assemble(program: &[Instruction]) -> Vec<u8> {
        program
            .iter()
            .flat_map(|instr| instr.encode().to_be_bytes())
            .collect()
    }

    #[test]
    fn retired_outcome_carries_disassembly() {
        let outcome = WasmStepOutcome::from(StepOutcome::Retired {
            instruction: Instruction::LoadImm {
                x: Register::VA,
                nn: 0x2F,
            },
        });
        assert_eq!(
            outcome,
            WasmStepOutcome::Retired {
                instruction: "LD VA, 0x2F".to_string(),
                word: 0x6A2F,
            }
        );
    }

    #[test]
    fn outcomes_serialize_with_a_kind_tag() {
        let fault = WasmStepOutcome::from(StepOutcome::Fault {
            cause: FaultCode::StackOverflow,
        });
        let json = serde_json::to_value(&fault).expect("serializes");
        assert_eq!(json["kind"], "Fault");
        assert_eq!(json["cause"], FaultCode::StackOverflow.to_string());
        assert_eq!(json["code"], 2);
        assert_eq!(json["class"], "Stack");

        let run = WasmRunOutcome {
            steps: 3,
            final_step: Some(WasmStepOutcome::AwaitingKey { register: 4 }),
        };
        let json = serde_json::to_value(&run).expect("serializes");
        assert_eq!(json["steps"], 3);
        assert_eq!(json["final_step"]["kind"], "AwaitingKey");
        assert_eq!(json["final_step"]["register"], 4);
    }

    #[test]
    fn fault_message_names_code_and_class() {
        assert_eq!(
            fault_message(FaultCode::AddressOutOfBounds),
            "fault 0x03 (Memory): memory access outside the 4 KiB address space"
        );
        assert_eq!(FaultCode::RomTooLarge.class(), FaultClass::Load);
    }

    #[test]
    fn oversized_rom_is_rejected() {
        let mut core = WasmCore::with_seed(7);
        assert_eq!(core.load(&[0x12, 0x00]), Ok(2));
        assert_eq!(
            core.load(&[0; MAX_ROM_BYTES + 1]),
            Err(FaultCode::RomTooLarge)
        );
    }

    #[test]
    fn arrow_keys_drive_the_keypad() {
        let mut core = WasmCore::with_seed(7);
        assert!(core.key_down("ArrowUp"));
        assert!(core.state.keypad.is_pressed(0x2));
        assert!(core.key_up("ArrowUp"));
        assert!(!core.state.keypad.is_pressed(0x2));
        assert!(!core.key_down("Enter"));
    }

    #[test]
    fn frame_runs_configured_steps_then_ticks_timers_once() {
        let mut core = WasmCore::with_seed(7);
        let rom = assemble(&[
            Instruction::LoadImm {
                x: Register::V0,
                nn: 5,
            },
            Instruction::SetDelay { x: Register::V0 },
            Instruction::Jump { nnn: 0x204 },
        ]);
        core.load(&rom).expect("fits");

        let outcome = core.run_frame_with(&mut RecordingTraceSink::default());

        assert_eq!(outcome.steps, DEFAULT_CYCLES_PER_TICK);
        assert_eq!(
            outcome.final_step,
            Some(WasmStepOutcome::Retired {
                instruction: "JP 0x204".to_string(),
                word: 0x1204,
            })
        );
        assert_eq!(core.state.timers.delay(), 4);
    }

    #[test]
    fn frame_changed_reports_a_draw_once() {
        let mut core = WasmCore::with_seed(7);
        let rom = assemble(&[
            Instruction::LoadGlyph { x: Register::V0 },
            Instruction::Draw {
                x: Register::V0,
                y: Register::V0,
                n: 5,
            },
            Instruction::Jump { nnn: 0x204 },
        ]);
        core.load(&rom).expect("fits");
        assert!(!core.frame_changed());

        core.run_frame_with(&mut RecordingTraceSink::default());

        assert!(core.frame_changed());
        assert!(!core.frame_changed());
    }

    #[test]
    fn rgba_lights_green_channel_only() {
        assert_eq!(rgba(&[0, 1]), vec![0, 0, 0, 0xFF, 0, 0xFF, 0, 0xFF]);
    }
}
