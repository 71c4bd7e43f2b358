use crate::{FaultCode, Register};

/// Host-observable execution state.
///
/// There is no halt state: the machine runs for as long as the driver keeps
/// calling `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Ready to execute the next instruction.
    #[default]
    Running,
    /// Parked on `FX0A`; PC has not advanced and the instruction re-runs on
    /// every step until a key is held.
    AwaitingKey {
        /// Register that receives the key index.
        register: Register,
    },
    /// A contract violation is latched; only reset or reload recovers.
    FaultLatched(FaultCode),
}

impl RunState {
    /// Returns the currently latched fault, if this state is fault-latched.
    #[must_use]
    pub const fn latched_fault(self) -> Option<FaultCode> {
        match self {
            Self::FaultLatched(cause) => Some(cause),
            Self::Running | Self::AwaitingKey { .. } => None,
        }
    }

    /// Returns true while parked on a key wait.
    #[must_use]
    pub const fn is_awaiting_key(self) -> bool {
        matches!(self, Self::AwaitingKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::RunState;
    use crate::{FaultCode, Register};

    #[test]
    fn run_state_default_is_running() {
        assert_eq!(RunState::default(), RunState::Running);
    }

    #[test]
    fn latched_fault_accessor_reports_only_fault_latched_variant() {
        assert_eq!(RunState::Running.latched_fault(), None);
        assert_eq!(
            RunState::AwaitingKey {
                register: Register::V3
            }
            .latched_fault(),
            None
        );
        assert_eq!(
            RunState::FaultLatched(FaultCode::StackOverflow).latched_fault(),
            Some(FaultCode::StackOverflow)
        );
    }

    #[test]
    fn awaiting_key_predicate() {
        assert!(RunState::AwaitingKey {
            register: Register::V0
        }
        .is_awaiting_key());
        assert!(!RunState::Running.is_awaiting_key());
    }
}
