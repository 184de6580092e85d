//! Transport abstraction: any byte-oriented channel.
//!
//! The firmware only ever talks to UART1, but the receive pump and the
//! telemetry writer are generic over `Transport` so the host tests can run
//! them against an in-memory buffer.

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Check if data is available for reading.
    fn available(&self) -> bool;
}

/// In-memory loopback transport for host builds and tests.
///
/// Reads drain `rx`; writes append to `tx`.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct MemoryTransport {
    pub rx: std::collections::VecDeque<u8>,
    pub tx: Vec<u8>,
}

#[cfg(not(target_os = "espidf"))]
impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes as if they had arrived on the wire.
    pub fn inject(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }
}

#[cfg(not(target_os = "espidf"))]
impl Transport for MemoryTransport {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn available(&self) -> bool {
        !self.rx.is_empty()
    }
}
