/// Nominal rate of the external timer tick.
pub const TICK_HZ: u32 = 60;

/// Default number of `step` calls a driver runs per timer tick.
pub const DEFAULT_CYCLES_PER_TICK: u32 = 10;

/// Delay and sound counters, each decremented once per external tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Timers {
    delay: u8,
    sound: u8,
}

impl Timers {
    /// Current delay timer value.
    #[must_use]
    pub const fn delay(&self) -> u8 {
        self.delay
    }

    /// Loads the delay timer.
    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    /// Current sound timer value.
    #[must_use]
    pub const fn sound(&self) -> u8 {
        self.sound
    }

    /// Loads the sound timer.
    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    /// True while the sound timer is non-zero.
    #[must_use]
    pub const fn sound_active(&self) -> bool {
        self.sound > 0
    }

    /// Decrements both counters by one, floored at zero.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{Timers, DEFAULT_CYCLES_PER_TICK, TICK_HZ};

    #[test]
    fn tick_decrements_both_by_one() {
        let mut timers = Timers::default();
        timers.set_delay(3);
        timers.set_sound(1);

        timers.tick();
        assert_eq!(timers.delay(), 2);
        assert_eq!(timers.sound(), 0);
        assert!(!timers.sound_active());
    }

    #[test]
    fn tick_at_zero_stays_zero() {
        let mut timers = Timers::default();
        timers.tick();
        timers.tick();
        assert_eq!(timers.delay(), 0);
        assert_eq!(timers.sound(), 0);
    }

    #[test]
    fn timers_are_independent() {
        let mut timers = Timers::default();
        timers.set_sound(2);
        assert!(timers.sound_active());
        assert_eq!(timers.delay(), 0);
    }

    #[test]
    fn driver_defaults() {
        assert_eq!(TICK_HZ, 60);
        assert_eq!(DEFAULT_CYCLES_PER_TICK, 10);
    }
}
