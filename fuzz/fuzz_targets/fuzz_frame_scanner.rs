//! Fuzz target: `FrameScanner::push`
//!
//! Drives arbitrary byte streams into the receiver-side telemetry scanner
//! and asserts that every frame it yields re-encodes to a checksum-valid
//! 13-byte frame.
//!
//! cargo fuzz run fuzz_frame_scanner

#![no_main]

use greenhouse::serial::telemetry::{FrameScanner, TelemetryFrame};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut scanner = FrameScanner::new();

    for &byte in data {
        if let Some(frame) = scanner.push(byte) {
            let bytes = frame.encode();
            assert_eq!(TelemetryFrame::decode(&bytes), Ok(frame));
        }
    }

    let _ = TelemetryFrame::decode(data);
});
