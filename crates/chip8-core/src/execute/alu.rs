//! Pure `8XY_` arithmetic.

use super::FlagsUpdate;
use crate::AluOp;

/// Computes the new `VX` and the `VF` update for an `8XY_` operation.
///
/// Shifts operate on `VX` and ignore `VY`. Subtraction flags are set when
/// no borrow occurs.
#[must_use]
pub const fn alu(op: AluOp, vx: u8, vy: u8) -> (u8, FlagsUpdate) {
    match op {
        AluOp::Set => (vy, FlagsUpdate::None),
        AluOp::Or => (vx | vy, FlagsUpdate::None),
        AluOp::And => (vx & vy, FlagsUpdate::None),
        AluOp::Xor => (vx ^ vy, FlagsUpdate::None),
        AluOp::Add => {
            let (sum, carry) = vx.overflowing_add(vy);
            (sum, FlagsUpdate::Set(carry))
        }
        AluOp::Sub => (vx.wrapping_sub(vy), FlagsUpdate::Set(vx >= vy)),
        AluOp::SubReverse => (vy.wrapping_sub(vx), FlagsUpdate::Set(vy >= vx)),
        AluOp::ShiftRight => (vx >> 1, FlagsUpdate::Set(vx & 0x01 != 0)),
        AluOp::ShiftLeft => (vx << 1, FlagsUpdate::Set(vx & 0x80 != 0)),
    }
}
