//! Machine state model primitives.

/// Register file types and storage model.
pub mod registers;
/// Execution state machine.
pub mod run_state;
/// Fixed-capacity call stack.
pub mod stack;

pub use registers::{Register, RegisterFile, GENERAL_REGISTER_COUNT};
pub use run_state::RunState;
pub use stack::{CallStack, STACK_CAPACITY};
