//! CLI command implementations
//!
//! Every command works against any `PortControl`, so the same code drives a
//! real `/dev/fsccN` device or the in-memory dummy port.
//!
//! ## Register commands
//!
//! `registers` covers single-register access, full dumps and register
//! files. Each access is one driver round trip.
//!
//! ## Port commands
//!
//! `port` covers flow control, append-status mode and the frame data path.

mod list;
pub mod port;
pub mod registers;

pub use list::{list_ports, list_registers};
