//! ROM loading and canonical reset.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    font_range, validate_span, CoreConfig, CoreState, FaultCode, RegisterFile, RunState, FONT_SET,
    PROGRAM_START,
};

impl CoreState {
    /// Builds a fresh core and loads `rom` into it.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::RomTooLarge`] when `rom` exceeds 3584 bytes.
    pub fn with_rom(config: CoreConfig, rom: &[u8]) -> Result<Self, FaultCode> {
        let mut state = Self::new(config);
        state.load(rom)?;
        Ok(state)
    }

    /// Applies canonical reset semantics.
    ///
    /// Memory is zeroed and the font rewritten at `0x000`; registers, `I`,
    /// timers, stack, keypad and framebuffer are cleared; PC returns to
    /// `0x200`; any latched fault is dropped and the random source is
    /// re-seeded from the configuration.
    pub fn reset(&mut self) {
        self.memory.fill(0);
        self.memory[font_range()].copy_from_slice(&FONT_SET);

        self.regs = RegisterFile::default();
        self.stack.clear();
        self.timers = crate::Timers::default();
        self.keypad.release_all();
        self.framebuffer = crate::Framebuffer::default();
        self.run_state = RunState::Running;
        self.rng = StdRng::seed_from_u64(self.config.rng_seed);
    }

    /// Copies `rom` into memory starting at `0x200`.
    ///
    /// Expects a freshly reset core; bytes past the end of `rom` are left as
    /// they are.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::RomTooLarge`] when `rom` exceeds 3584 bytes; memory
    /// is left untouched.
    pub fn load(&mut self, rom: &[u8]) -> Result<(), FaultCode> {
        let span =
            validate_span(PROGRAM_START, rom.len()).map_err(|_| FaultCode::RomTooLarge)?;
        self.memory[span].copy_from_slice(rom);
        Ok(())
    }

    /// Resets and then loads `rom`, discarding all prior state.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::RomTooLarge`] when `rom` exceeds 3584 bytes; the
    /// core is still reset.
    pub fn reload(&mut self, rom: &[u8]) -> Result<(), FaultCode> {
        self.reset();
        self.load(rom)
    }
}
