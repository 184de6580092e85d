//! UART transport adapter for the host link.
//!
//! Zero-sized handle over the ESP-IDF UART driver installed by `hw_init`.
//! The receive pump and the main loop each own one: the pump only reads,
//! the main loop only writes, and the driver serialises each direction.

use crate::drivers::hw_init;
use crate::error::SerialError;
use crate::serial::transport::Transport;

/// Flush waits at most this long for the TX FIFO (a 13-byte frame takes
/// ~14 ms at 9600 baud).
const FLUSH_TIMEOUT_MS: u32 = 50;

#[derive(Debug, Default, Clone, Copy)]
pub struct UartTransport;

impl UartTransport {
    pub const fn new() -> Self {
        Self
    }
}

impl Transport for UartTransport {
    type Error = SerialError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
        hw_init::uart_read(buf)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, SerialError> {
        let written = hw_init::uart_write(data)?;
        if written != data.len() {
            return Err(SerialError::ShortWrite {
                written,
                expected: data.len(),
            });
        }
        Ok(written)
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        hw_init::uart_wait_tx_done(FLUSH_TIMEOUT_MS)
    }

    fn available(&self) -> bool {
        hw_init::uart_buffered() > 0
    }
}
