//! Command line framing and the RX → main-loop handshake.
//!
//! ```text
//! ┌────────────────┐ bytes ┌───────────────┐ CommandLine ┌────────────────┐
//! │ UART (RX pump) │──────▶│ LineAssembler │────────────▶│ CommandMailbox │──▶ main loop
//! └────────────────┘       └───────────────┘    post()   └────────────────┘   take()
//! ```
//!
//! The mailbox has depth 1: "a command is ready" is exactly "the mailbox
//! holds a line". While a line is pending, newly completed lines are
//! dropped and counted, so the pending one is never overwritten mid-read.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;

use super::transport::Transport;

/// Longest command line kept, terminator excluded.
pub const MAX_LINE: usize = 99;

/// Bytes pulled from the transport per read call.
const RX_CHUNK: usize = 32;

/// One complete, non-empty command line without its terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine(Vec<u8, MAX_LINE>);

impl CommandLine {
    /// Build a line from `bytes`, keeping at most [`MAX_LINE`] of them.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let n = bytes.len().min(MAX_LINE);
        let mut buf = Vec::new();
        // Cannot fail: `n <= MAX_LINE`.
        let _ = buf.extend_from_slice(&bytes[..n]);
        Self(buf)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ───────────────────────────────────────────────────────────────
// LineAssembler
// ───────────────────────────────────────────────────────────────

/// Accumulates received bytes into lines terminated by `\n` or `\r`.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buf: Vec<u8, MAX_LINE>,
    overflowed: u32,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: 0,
        }
    }

    /// Feed one received byte. Returns a line when `byte` terminates a
    /// non-empty one.
    ///
    /// `\r\n` therefore yields a single line: the `\n` finds the buffer empty.
    /// Bytes past [`MAX_LINE`] are discarded up to the next terminator.
    pub fn on_rx_byte(&mut self, byte: u8) -> Option<CommandLine> {
        match byte {
            b'\n' | b'\r' => {
                if self.buf.is_empty() {
                    None
                } else {
                    Some(CommandLine(core::mem::take(&mut self.buf)))
                }
            }
            _ => {
                if self.buf.push(byte).is_err() {
                    self.overflowed = self.overflowed.wrapping_add(1);
                }
                None
            }
        }
    }

    /// Bytes accumulated for the line in progress.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Bytes discarded because a line exceeded [`MAX_LINE`].
    pub fn overflowed(&self) -> u32 {
        self.overflowed
    }
}

// ───────────────────────────────────────────────────────────────
// CommandMailbox
// ───────────────────────────────────────────────────────────────

/// Depth-1 hand-off of completed lines from the RX context to the main loop.
pub struct CommandMailbox {
    slot: Channel<CriticalSectionRawMutex, CommandLine, 1>,
    dropped: AtomicU32,
}

impl Default for CommandMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandMailbox {
    pub const fn new() -> Self {
        Self {
            slot: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Offer a completed line. Returns `false` (and counts the drop) if a
    /// line is still pending.
    pub fn post(&self, line: CommandLine) -> bool {
        match self.slot.try_send(line) {
            Ok(()) => true,
            Err(_) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Move the pending line out, if any. Empties the mailbox.
    pub fn take(&self) -> Option<CommandLine> {
        self.slot.try_receive().ok()
    }

    /// Whether a line is waiting for the main loop.
    pub fn is_pending(&self) -> bool {
        !self.slot.is_empty()
    }

    /// Lines lost because the mailbox was full when they completed.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

// ───────────────────────────────────────────────────────────────
// ReceiveTask
// ───────────────────────────────────────────────────────────────

/// RX-side context: transport + assembler + mailbox.
///
/// [`pump`](Self::pump) is the body of the periodic receive callback. It
/// never blocks and never logs.
pub struct ReceiveTask<'a, T: Transport> {
    transport: T,
    assembler: LineAssembler,
    mailbox: &'a CommandMailbox,
}

impl<'a, T: Transport> ReceiveTask<'a, T> {
    pub fn new(transport: T, mailbox: &'a CommandMailbox) -> Self {
        Self {
            transport,
            assembler: LineAssembler::new(),
            mailbox,
        }
    }

    /// Drain everything the transport has buffered. Returns the number of
    /// lines accepted by the mailbox.
    pub fn pump(&mut self) -> usize {
        let mut posted = 0;
        let mut chunk = [0u8; RX_CHUNK];
        while self.transport.available() {
            let n = match self.transport.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            for &byte in &chunk[..n] {
                if let Some(line) = self.assembler.on_rx_byte(byte) {
                    if self.mailbox.post(line) {
                        posted += 1;
                    }
                }
            }
        }
        posted
    }

    pub fn assembler(&self) -> &LineAssembler {
        &self.assembler
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
