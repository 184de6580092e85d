//! Unified error types for the greenhouse firmware.
//!
//! The control core itself has no error path: malformed commands are
//! ignored and a failed telemetry write only gets logged. These types cover
//! boot-time bring-up, the UART transport and host-side frame decoding.
//! All variants are `Copy`.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral bring-up failed.
    Init(HwInitError),
    /// A periodic timer could not be created or started.
    Timer(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Timer(rc) => write!(f, "timer: esp_timer call failed (rc={rc})"),
        }
    }
}

impl core::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Serial errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// The driver rejected a read.
    ReadFailed(i32),
    /// The driver rejected a write.
    WriteFailed(i32),
    /// Fewer bytes were queued than requested.
    ShortWrite { written: usize, expected: usize },
    /// Waiting for the TX FIFO to drain timed out.
    FlushTimeout,
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed(rc) => write!(f, "UART read failed (rc={rc})"),
            Self::WriteFailed(rc) => write!(f, "UART write failed (rc={rc})"),
            Self::ShortWrite { written, expected } => {
                write!(f, "short write ({written}/{expected} bytes)")
            }
            Self::FlushTimeout => write!(f, "TX flush timed out"),
        }
    }
}

// ---------------------------------------------------------------------------
// Telemetry frame errors (receiver side)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Not exactly one frame's worth of bytes.
    BadLength(usize),
    /// Trailing byte is not the sentinel.
    BadSentinel(u8),
    /// Checksum byte does not match the payload.
    BadChecksum { expected: u8, found: u8 },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLength(n) => write!(f, "bad frame length {n}"),
            Self::BadSentinel(b) => write!(f, "bad sentinel 0x{b:02X}"),
            Self::BadChecksum { expected, found } => {
                write!(f, "checksum mismatch (expected 0x{expected:02X}, found 0x{found:02X})")
            }
        }
    }
}
