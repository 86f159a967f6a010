//! Driver traits
//!
//! A backend only has to move a [`RegisterArray`] to and from the driver;
//! everything else (slot selection, decoding, text formats) is done by
//! [`RegisterBank`](crate::RegisterBank). Both calls report failures as
//! `io::Error` so the operating-system error reaches the caller unchanged.

use std::io;

use crate::bank::RegisterBank;
use crate::register::RegisterArray;

/// Bulk register transfer with the driver
pub trait RegisterDriver {
    /// Fill every `UPDATE_VALUE` slot of `regs` with the current value
    fn get_registers(&mut self, regs: &mut RegisterArray) -> io::Result<()>;

    /// Write every slot of `regs` that holds a value
    fn set_registers(&mut self, regs: &RegisterArray) -> io::Result<()>;
}

impl<T: RegisterDriver + ?Sized> RegisterDriver for &mut T {
    fn get_registers(&mut self, regs: &mut RegisterArray) -> io::Result<()> {
        (**self).get_registers(regs)
    }

    fn set_registers(&mut self, regs: &RegisterArray) -> io::Result<()> {
        (**self).set_registers(regs)
    }
}

impl<T: RegisterDriver + ?Sized> RegisterDriver for Box<T> {
    fn get_registers(&mut self, regs: &mut RegisterArray) -> io::Result<()> {
        (**self).get_registers(regs)
    }

    fn set_registers(&mut self, regs: &RegisterArray) -> io::Result<()> {
        (**self).set_registers(regs)
    }
}

/// An open FSCC port: registers, flow control and the data path
pub trait PortControl: RegisterDriver + io::Read + io::Write {
    /// Discard data queued for transmission
    fn flush_tx(&mut self) -> io::Result<()>;

    /// Discard received data not yet read
    fn flush_rx(&mut self) -> io::Result<()>;

    /// Enable or disable appending status bytes to received frames
    ///
    /// The driver offers no way to read this mode back.
    fn set_append_status(&mut self, enable: bool) -> io::Result<()>;

    /// Per-register view borrowing this port
    fn registers(&mut self) -> RegisterBank<&mut Self>
    where
        Self: Sized,
    {
        RegisterBank::new(self)
    }
}

impl<T: PortControl + ?Sized> PortControl for Box<T> {
    fn flush_tx(&mut self) -> io::Result<()> {
        (**self).flush_tx()
    }

    fn flush_rx(&mut self) -> io::Result<()> {
        (**self).flush_rx()
    }

    fn set_append_status(&mut self, enable: bool) -> io::Result<()> {
        (**self).set_append_status(enable)
    }
}
