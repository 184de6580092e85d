//! Serial link to the host: command lines in, telemetry frames out.
//!
//! ```text
//!  Host ──"SET,HUMID,1234\n"──▶ line ──▶ command ──▶ SharedState
//!  Host ◀──[13-byte frame]──── telemetry ◀── Controller
//! ```
//!
//! 9600 baud 8N1, no flow control, no acknowledgements.

pub mod command;
pub mod line;
pub mod telemetry;
pub mod transport;
