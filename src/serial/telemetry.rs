//! Binary telemetry frame.
//!
//! Emitted once per second over the serial link. Fixed 13-byte layout,
//! multi-byte fields big-endian:
//!
//! ```text
//! offset  0      2      4      6     7              11   12
//!        ┌──────┬──────┬──────┬─────┬──────────────┬────┬────┐
//!        │ light│ temp │ moist│ lamp│ light_seconds│ cs │0xAA│
//!        │ u16  │ u16  │ u16  │ u8  │ u32          │ u8 │    │
//!        └──────┴──────┴──────┴─────┴──────────────┴────┴────┘
//! ```
//!
//! `cs` is the sum of bytes 0..=10 modulo 256. The sentinel is not escaped,
//! so a receiver that splits on `0xAA` loses any frame whose payload happens
//! to contain it; [`FrameScanner`] behaves exactly that way.

use serde::Serialize;

use crate::error::FrameError;

/// Encoded frame size in bytes.
pub const FRAME_LEN: usize = 13;
/// Trailing end-of-frame marker.
pub const SENTINEL: u8 = 0xAA;

const CHECKSUM_OFFSET: usize = 11;

/// One telemetry sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TelemetryFrame {
    pub light: u16,
    pub temperature: u16,
    pub moisture: u16,
    pub grow_light_on: bool,
    pub light_seconds: u32,
}

impl TelemetryFrame {
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut out = [0u8; FRAME_LEN];
        out[0..2].copy_from_slice(&self.light.to_be_bytes());
        out[2..4].copy_from_slice(&self.temperature.to_be_bytes());
        out[4..6].copy_from_slice(&self.moisture.to_be_bytes());
        out[6] = u8::from(self.grow_light_on);
        out[7..11].copy_from_slice(&self.light_seconds.to_be_bytes());
        out[CHECKSUM_OFFSET] = checksum(&out[..CHECKSUM_OFFSET]);
        out[12] = SENTINEL;
        out
    }

    /// Validate and parse one complete frame.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        let bytes: &[u8; FRAME_LEN] = bytes
            .try_into()
            .map_err(|_| FrameError::BadLength(bytes.len()))?;

        if bytes[12] != SENTINEL {
            return Err(FrameError::BadSentinel(bytes[12]));
        }
        let expected = checksum(&bytes[..CHECKSUM_OFFSET]);
        let found = bytes[CHECKSUM_OFFSET];
        if expected != found {
            return Err(FrameError::BadChecksum { expected, found });
        }

        Ok(Self {
            light: u16::from_be_bytes([bytes[0], bytes[1]]),
            temperature: u16::from_be_bytes([bytes[2], bytes[3]]),
            moisture: u16::from_be_bytes([bytes[4], bytes[5]]),
            grow_light_on: bytes[6] != 0,
            light_seconds: u32::from_be_bytes([bytes[7], bytes[8], bytes[9], bytes[10]]),
        })
    }
}

/// Additive 8-bit checksum.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

// ───────────────────────────────────────────────────────────────
// TelemetryGate
// ───────────────────────────────────────────────────────────────

/// Decides when the next frame is due.
///
/// Compares with wrapping subtraction, so the 32-bit millisecond clock
/// rolling over (~49.7 days) does not stall telemetry.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryGate {
    last_emit_ms: u32,
    interval_ms: u32,
}

impl TelemetryGate {
    /// The first frame fires `interval_ms` after time 0.
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            last_emit_ms: 0,
            interval_ms,
        }
    }

    /// `true` if a frame is due at `now_ms`; records `now_ms` as the
    /// emission time when it is.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_emit_ms) >= self.interval_ms {
            self.last_emit_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn last_emit_ms(&self) -> u32 {
        self.last_emit_ms
    }
}

// ───────────────────────────────────────────────────────────────
// FrameScanner (receiver side)
// ───────────────────────────────────────────────────────────────

/// Reassembles frames from a raw byte stream.
///
/// Bytes are collected up to and including each `0xAA`; the chunk is kept
/// only if it is exactly [`FRAME_LEN`] long with a valid checksum.
#[derive(Debug, Default)]
pub struct FrameScanner {
    buf: heapless::Vec<u8, FRAME_LEN>,
    overrun: bool,
    rejected: u32,
}

impl FrameScanner {
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            overrun: false,
            rejected: 0,
        }
    }

    /// Feed one byte; returns a frame when a valid one completes.
    pub fn push(&mut self, byte: u8) -> Option<TelemetryFrame> {
        if self.buf.push(byte).is_err() {
            self.overrun = true;
        }
        if byte != SENTINEL {
            return None;
        }

        let result = if self.overrun {
            None
        } else {
            TelemetryFrame::decode(&self.buf).ok()
        };
        if result.is_none() {
            self.rejected = self.rejected.wrapping_add(1);
        }
        self.buf.clear();
        self.overrun = false;
        result
    }

    /// Feed a slice, collecting every valid frame in it.
    pub fn extend(&mut self, bytes: &[u8]) -> Vec<TelemetryFrame> {
        bytes.iter().filter_map(|&b| self.push(b)).collect()
    }

    /// Sentinel-terminated chunks discarded as malformed.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }
}
