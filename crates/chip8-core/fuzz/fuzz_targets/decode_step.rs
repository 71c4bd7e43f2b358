#![no_main]

use chip8_core::{disassemble_one, step_one, CoreState, Decoder, NullTraceSink, MAX_ROM_BYTES};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let word = u16::from_be_bytes([data[0], data[1]]);
    let instr = Decoder::decode(word);
    assert_eq!(instr.encode(), word);

    let rom = &data[..data.len().min(MAX_ROM_BYTES)];
    let mut state = CoreState::default();
    if state.load(rom).is_err() {
        return;
    }
    if let Some(key) = data.get(2) {
        state.set_key(key & 0x0F, true);
    }

    let mut sink = NullTraceSink;
    for _ in 0..256 {
        let _ = step_one(&mut state, &mut sink);
        let _ = disassemble_one(state.pc(), &state.memory);
        assert!(state.pixels().iter().all(|p| *p <= 1));
        assert!(state.stack.depth() <= 16);
    }
});
