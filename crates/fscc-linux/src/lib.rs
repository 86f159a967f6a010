//! fscc-linux - Linux character-device support for FSCC cards
//!
//! The FSCC kernel driver exposes each port as `/dev/fsccN`. Data moves
//! through plain `read`/`write` calls, one frame per call; registers and
//! flow control go through ioctls on the same descriptor.
//!
//! # Example
//!
//! ```ignore
//! use fscc_core::{PortControl, Register};
//! use fscc_linux::{Port, PortConfig};
//!
//! let mut port = Port::open(&PortConfig::new("/dev/fscc0"))?;
//!
//! let mut regs = port.registers();
//! regs.set(Register::CCR0, 0x0011_201c)?;
//! regs.set(Register::CCR1, 0x0000_0018)?;
//!
//! port.flush_rx()?;
//! ```
//!
//! # System Requirements
//!
//! - The `fscc` kernel module loaded
//! - Read/write access to `/dev/fsccN` (root or a udev rule)

pub mod device;
pub mod error;

// Re-exports
pub use device::{parse_options, Port, PortConfig, DEFAULT_DEVICE};
pub use error::{LinuxFsccError, Result};

/// Open a port from `key=value` options and return it boxed
///
/// This is a convenience function for use in the CLI port dispatch.
///
/// # Example Options
///
/// - `dev=/dev/fscc1` - Device path (default `/dev/fscc0`)
/// - `append_status=1` - Enable append-status mode on open
/// - `mode=r` - Open read-only (`r`, `w` or `rw`)
pub fn open_linux_port(
    options: &[(&str, &str)],
) -> std::result::Result<Box<dyn fscc_core::PortControl>, Box<dyn std::error::Error>> {
    let config = parse_options(options)?;
    let port = Port::open(&config)?;
    Ok(Box::new(port))
}
