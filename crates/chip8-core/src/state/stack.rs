use crate::FaultCode;

/// Maximum number of nested subroutine calls.
pub const STACK_CAPACITY: usize = 16;

/// Fixed-capacity return-address stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CallStack {
    slots: [u16; STACK_CAPACITY],
    depth: usize,
}

impl CallStack {
    /// Number of return addresses currently held.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true when no return address is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Returns true when every slot is in use.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.depth == STACK_CAPACITY
    }

    /// Return addresses from the outermost call to the innermost.
    #[must_use]
    pub fn frames(&self) -> &[u16] {
        &self.slots[..self.depth]
    }

    /// Pushes a return address.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::StackOverflow`] when all slots are in use; the
    /// stack is left unchanged.
    pub fn push(&mut self, addr: u16) -> Result<(), FaultCode> {
        let slot = self
            .slots
            .get_mut(self.depth)
            .ok_or(FaultCode::StackOverflow)?;
        *slot = addr;
        self.depth += 1;
        Ok(())
    }

    /// Pops the innermost return address.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::StackUnderflow`] when the stack is empty.
    pub fn pop(&mut self) -> Result<u16, FaultCode> {
        let depth = self
            .depth
            .checked_sub(1)
            .ok_or(FaultCode::StackUnderflow)?;
        self.depth = depth;
        Ok(self.slots[depth])
    }

    /// Returns the innermost return address without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<u16> {
        self.frames().last().copied()
    }

    /// Drops every held return address.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
