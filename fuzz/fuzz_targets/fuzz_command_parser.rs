//! Fuzz target: line assembly + command dispatch
//!
//! Feeds arbitrary bytes through the `LineAssembler` exactly as the
//! receive pump would, dispatching every completed line. Asserts that
//! nothing panics and that unrecognised lines never touch the config.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use greenhouse::serial::command::{dispatch, parse_command};
use greenhouse::serial::line::LineAssembler;
use greenhouse::state::SharedState;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let shared = SharedState::new();
    let mut asm = LineAssembler::new();

    for &byte in data {
        if let Some(line) = asm.on_rx_byte(byte) {
            let before = shared.config.snapshot();
            if dispatch(line.as_bytes(), &shared).is_none() {
                assert_eq!(shared.config.snapshot(), before);
            }
        }
    }

    // The raw buffer as a single line must be just as harmless.
    let _ = parse_command(data);
});
