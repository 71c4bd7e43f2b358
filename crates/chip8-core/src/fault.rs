use thiserror::Error;

/// Fault classes used for aggregation and host policy decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Call stack contract violation.
    Stack,
    /// Address outside the 4 KiB address space.
    Memory,
    /// ROM image rejected at load time.
    Load,
}

/// Contract violations surfaced by the loader and the instruction cycle.
///
/// Unknown opcodes are not faults; they are reported through
/// [`crate::StepOutcome::UnknownOpcode`] and execution continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// `00EE` executed with an empty call stack.
    #[error("return executed with an empty call stack")]
    StackUnderflow = 0x01,
    /// `2NNN` executed with all 16 stack slots in use.
    #[error("call stack depth exceeded")]
    StackOverflow = 0x02,
    /// Fetch or data access reached past the end of memory.
    #[error("memory access outside the 4 KiB address space")]
    AddressOutOfBounds = 0x03,
    /// ROM image does not fit between 0x200 and 0xFFF.
    #[error("rom image larger than 3584 bytes")]
    RomTooLarge = 0x04,
}

impl FaultCode {
    /// Converts a fault code to its stable byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the class for this fault code.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::StackUnderflow | Self::StackOverflow => FaultClass::Stack,
            Self::AddressOutOfBounds => FaultClass::Memory,
            Self::RomTooLarge => FaultClass::Load,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FaultClass, FaultCode};

    #[test]
    fn stable_codes_are_dense_from_one() {
        let codes = [
            FaultCode::StackUnderflow,
            FaultCode::StackOverflow,
            FaultCode::AddressOutOfBounds,
            FaultCode::RomTooLarge,
        ]
        .map(FaultCode::as_u8);
        assert_eq!(codes, [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn class_mapping_matches_fault_taxonomy() {
        assert_eq!(FaultCode::StackUnderflow.class(), FaultClass::Stack);
        assert_eq!(FaultCode::StackOverflow.class(), FaultClass::Stack);
        assert_eq!(FaultCode::AddressOutOfBounds.class(), FaultClass::Memory);
        assert_eq!(FaultCode::RomTooLarge.class(), FaultClass::Load);
    }

    #[test]
    fn display_text_names_the_violation() {
        assert_eq!(
            FaultCode::StackOverflow.to_string(),
            "call stack depth exceeded"
        );
        assert_eq!(
            FaultCode::RomTooLarge.to_string(),
            "rom image larger than 3584 bytes"
        );
    }
}
