//! Bounds-checked memory access helpers.

use std::ops::Range;

use crate::{FaultCode, MEMORY_BYTES};

/// Byte width of one instruction word.
pub const INSTRUCTION_BYTES: u16 = 2;

/// Validates a span of `len` bytes starting at `start` and returns it as an
/// index range. A zero-length span is always valid when `start` is.
///
/// # Errors
///
/// Returns [`FaultCode::AddressOutOfBounds`] when any byte of the span falls
/// outside memory.
pub fn validate_span(start: u16, len: usize) -> Result<Range<usize>, FaultCode> {
    let start = usize::from(start);
    let end = start
        .checked_add(len)
        .ok_or(FaultCode::AddressOutOfBounds)?;
    if start > MEMORY_BYTES || end > MEMORY_BYTES {
        return Err(FaultCode::AddressOutOfBounds);
    }
    Ok(start..end)
}

/// Reads a big-endian instruction word at `addr`.
///
/// # Errors
///
/// Returns [`FaultCode::AddressOutOfBounds`] when `addr + 1` is past the end
/// of memory.
pub fn read_u16_be(memory: &[u8], addr: u16) -> Result<u16, FaultCode> {
    let span = validate_span(addr, usize::from(INSTRUCTION_BYTES))?;
    let bytes = memory.get(span).ok_or(FaultCode::AddressOutOfBounds)?;
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}
