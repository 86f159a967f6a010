//! fscc-core - Register model and driver protocol for FSCC cards
//!
//! This crate contains everything about talking to the FSCC kernel driver
//! that does not need an open file descriptor:
//!
//! - The closed set of card registers and their fixed slots in the driver's
//!   transaction array
//! - The ioctl control codes understood by the driver
//! - The `RegisterDriver` / `PortControl` traits implemented by backends
//! - The `RegisterBank`, a per-register view over a driver
//! - Import/export of register values in the line-oriented text format
//!
//! # Example
//!
//! ```ignore
//! use fscc_core::{PortControl, Register};
//!
//! fn configure<P: PortControl>(port: &mut P) -> std::io::Result<()> {
//!     let mut regs = port.registers();
//!     regs.set(Register::CCR0, 0x0011_201c)?;
//!     regs.set(Register::CCR1, 0x0000_0018)?;
//!     println!("VSTR = {:#010x}", regs.get(Register::VSTR)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bank;
pub mod driver;
pub mod error;
pub mod ioctl;
pub mod register;
pub mod text;

pub use bank::RegisterBank;
pub use driver::{PortControl, RegisterDriver};
pub use error::{Error, Result};
pub use register::{Register, RegisterArray, NOT_SET, REGISTER_SLOTS, UPDATE_VALUE};
