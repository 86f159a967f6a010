//! Per-register view over a driver
//!
//! `RegisterBank` keeps no register values of its own. Every `get` and `set`
//! is one round trip to the driver, built from a freshly cleared
//! [`RegisterArray`] so the transaction only touches the named register.

use std::io::{self, BufRead, Write};

use log::{debug, trace};

use crate::driver::RegisterDriver;
use crate::error::Result;
use crate::register::{Register, RegisterArray, UPDATE_VALUE};
use crate::text;

/// Driver type of a detached bank; it has no values
#[derive(Debug)]
pub enum NoDriver {}

impl RegisterDriver for NoDriver {
    fn get_registers(&mut self, _regs: &mut RegisterArray) -> io::Result<()> {
        match *self {}
    }

    fn set_registers(&mut self, _regs: &RegisterArray) -> io::Result<()> {
        match *self {}
    }
}

/// Register access through a [`RegisterDriver`]
#[derive(Debug)]
pub struct RegisterBank<D> {
    driver: Option<D>,
}

impl RegisterBank<NoDriver> {
    /// A bank without a device; every transaction is a no-op
    ///
    /// `get` returns `UPDATE_VALUE` for every register, so an export from a
    /// detached bank is empty.
    pub fn detached() -> Self {
        Self { driver: None }
    }
}

impl<D: RegisterDriver> RegisterBank<D> {
    /// Bind a bank to a driver handle
    pub fn new(driver: D) -> Self {
        Self {
            driver: Some(driver),
        }
    }

    /// Whether transactions reach a driver
    pub fn is_attached(&self) -> bool {
        self.driver.is_some()
    }

    /// Release the driver handle
    pub fn into_inner(self) -> Option<D> {
        self.driver
    }

    /// Fetch the current value of one register
    pub fn get(&mut self, register: Register) -> io::Result<i64> {
        let mut regs = RegisterArray::cleared();
        regs.request(register);
        self.transfer_get(&mut regs)?;
        trace!("get {} -> {:#x}", register, regs.get(register));
        Ok(regs.get(register))
    }

    /// Write one register
    ///
    /// Read-only registers are passed through; only the driver decides
    /// whether to refuse them.
    pub fn set(&mut self, register: Register, value: i64) -> io::Result<()> {
        let mut regs = RegisterArray::cleared();
        regs.set(register, value);
        trace!("set {} <- {:#x}", register, value);
        self.transfer_set(&regs)
    }

    /// Fetch several registers in a single driver transaction
    ///
    /// Values come back in the order the registers were requested.
    pub fn get_many(&mut self, registers: &[Register]) -> io::Result<Vec<(Register, i64)>> {
        let mut regs = RegisterArray::cleared();
        for &register in registers {
            regs.request(register);
        }
        self.transfer_get(&mut regs)?;
        Ok(registers.iter().map(|&r| (r, regs.get(r))).collect())
    }

    /// Write several registers in a single driver transaction
    ///
    /// A register named twice keeps the last value.
    pub fn set_many(&mut self, values: &[(Register, i64)]) -> io::Result<()> {
        let mut regs = RegisterArray::cleared();
        for &(register, value) in values {
            regs.set(register, value);
        }
        self.transfer_set(&regs)
    }

    /// Read every register, read-only ones included
    pub fn dump(&mut self) -> io::Result<Vec<(Register, i64)>> {
        let mut values = Vec::with_capacity(Register::ALL.len());
        for register in Register::ALL {
            values.push((register, self.get(register)?));
        }
        Ok(values)
    }

    /// Apply a register file, one `set` per assignment
    ///
    /// Stops at the first bad line; registers written before it stay
    /// written. Returns the number of registers set.
    pub fn import_from<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut count = 0;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some((register, value)) = text::parse_line(idx + 1, &line)? {
                self.set(register, value)?;
                count += 1;
            }
        }
        debug!("Imported {} register values", count);
        Ok(count)
    }

    /// Import from an in-memory string
    pub fn import_str(&mut self, input: &str) -> Result<usize> {
        self.import_from(input.as_bytes())
    }

    /// Write every editable register holding a value as `NAME = 0x...`
    ///
    /// Returns the number of lines written.
    pub fn export_to<W: Write>(&mut self, mut writer: W) -> Result<usize> {
        let mut count = 0;
        for register in Register::editable() {
            let value = self.get(register)?;
            if value >= 0 {
                writer.write_all(text::format_line(register, value).as_bytes())?;
                count += 1;
            }
        }
        debug!("Exported {} register values", count);
        Ok(count)
    }

    /// Export into a `String`
    pub fn export_string(&mut self) -> Result<String> {
        let mut out = Vec::new();
        self.export_to(&mut out)?;
        // format_line only produces ASCII
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn transfer_get(&mut self, regs: &mut RegisterArray) -> io::Result<()> {
        match self.driver.as_mut() {
            Some(driver) => driver.get_registers(regs),
            None => Ok(()),
        }
    }

    fn transfer_set(&mut self, regs: &RegisterArray) -> io::Result<()> {
        match self.driver.as_mut() {
            Some(driver) => driver.set_registers(regs),
            None => Ok(()),
        }
    }
}
