//! fscc-dummy - In-memory FSCC port emulator for testing
//!
//! This crate provides a dummy port that emulates an FSCC card and its
//! driver in memory. It's useful for testing and development without real
//! hardware.
//!
//! The data path is an internal loopback: frames written to the port are
//! queued for transmission and show up on the receive side at the next
//! read.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use fscc_core::{
    PortControl, Register, RegisterArray, RegisterDriver, NOT_SET, REGISTER_SLOTS, UPDATE_VALUE,
};

/// Configuration for the dummy port
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// Value reported by STAR
    pub status: i64,
    /// Value reported by VSTR
    pub version: i64,
    /// Power-on values of editable registers; unlisted ones start at 0
    pub reset_values: Vec<(Register, i64)>,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            status: 0x0400_0000,
            version: 0x0024_0011,
            reset_values: vec![
                (Register::FIFOT, 0x0800_1000),
                (Register::CCR0, 0x0011_201c),
                (Register::CCR1, 0x0000_0018),
                (Register::IMR, 0x0f00_0000),
            ],
        }
    }
}

/// One driver call seen by the dummy port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    /// Bulk-get request as received
    Get(RegisterArray),
    /// Bulk-set request as received
    Set(RegisterArray),
}

/// Dummy FSCC port
///
/// Emulates the card registers and a loopback data path for testing.
#[derive(Debug)]
pub struct DummyPort {
    registers: [i64; REGISTER_SLOTS],
    tx: VecDeque<Vec<u8>>,
    rx: VecDeque<Vec<u8>>,
    append_status: bool,
    transactions: Vec<Transaction>,
}

impl DummyPort {
    /// Create a new dummy port with the given configuration
    pub fn new(config: DummyConfig) -> Self {
        let mut registers = [NOT_SET; REGISTER_SLOTS];
        for register in Register::ALL {
            registers[register.slot()] = 0;
        }
        registers[Register::STAR.slot()] = config.status;
        registers[Register::VSTR.slot()] = config.version;
        for (register, value) in config.reset_values {
            registers[register.slot()] = value;
        }

        Self {
            registers,
            tx: VecDeque::new(),
            rx: VecDeque::new(),
            append_status: false,
            transactions: Vec::new(),
        }
    }

    /// Create a new dummy port with default configuration
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Current value of a register, bypassing the driver interface
    pub fn register(&self, register: Register) -> i64 {
        self.registers[register.slot()]
    }

    /// Whether append-status mode is on
    pub fn append_status(&self) -> bool {
        self.append_status
    }

    /// Driver calls received so far, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Frames waiting on the receive side
    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }

    /// Frames written but not yet looped back
    pub fn pending_tx(&self) -> usize {
        self.tx.len()
    }

    fn status_bytes(&self) -> [u8; 2] {
        let star = self.registers[Register::STAR.slot()];
        [(star & 0xff) as u8, ((star >> 8) & 0xff) as u8]
    }
}

impl RegisterDriver for DummyPort {
    fn get_registers(&mut self, regs: &mut RegisterArray) -> io::Result<()> {
        self.transactions.push(Transaction::Get(*regs));
        for (slot, value) in regs.as_slots_mut().iter_mut().enumerate() {
            if *value == UPDATE_VALUE {
                *value = self.registers[slot];
            }
        }
        log::trace!("dummy: get_registers");
        Ok(())
    }

    fn set_registers(&mut self, regs: &RegisterArray) -> io::Result<()> {
        self.transactions.push(Transaction::Set(*regs));

        // The driver refuses the whole request if a read-only slot is named
        if let Some((register, _)) = regs
            .participating()
            .find(|&(r, v)| r.is_read_only() && v >= 0)
        {
            log::debug!("dummy: refusing write to read-only {}", register);
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", register),
            ));
        }

        for (register, value) in regs.participating() {
            if value >= 0 {
                self.registers[register.slot()] = value;
            }
        }
        log::trace!("dummy: set_registers");
        Ok(())
    }
}

impl PortControl for DummyPort {
    fn flush_tx(&mut self) -> io::Result<()> {
        log::debug!("dummy: dropping {} tx frames", self.tx.len());
        self.tx.clear();
        Ok(())
    }

    fn flush_rx(&mut self) -> io::Result<()> {
        log::debug!("dummy: dropping {} rx frames", self.rx.len());
        self.rx.clear();
        Ok(())
    }

    fn set_append_status(&mut self, enable: bool) -> io::Result<()> {
        self.append_status = enable;
        Ok(())
    }
}

impl Read for DummyPort {
    /// Pop one received frame, truncated to `buf`
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.rx.extend(self.tx.drain(..));

        let Some(mut frame) = self.rx.pop_front() else {
            return Ok(0);
        };
        if self.append_status {
            frame.extend_from_slice(&self.status_bytes());
        }

        let len = frame.len().min(buf.len());
        buf[..len].copy_from_slice(&frame[..len]);
        Ok(len)
    }
}

impl Write for DummyPort {
    /// Queue one frame
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !buf.is_empty() {
            self.tx.push_back(buf.to_vec());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_values() {
        let mut port = DummyPort::new_default();
        let mut regs = port.registers();
        assert_eq!(regs.get(Register::CCR0).unwrap(), 0x0011_201c);
        assert_eq!(regs.get(Register::VSTR).unwrap(), 0x0024_0011);
        assert_eq!(regs.get(Register::BGR).unwrap(), 0);
    }

    #[test]
    fn test_set_and_export() {
        let mut port = DummyPort::new(DummyConfig {
            reset_values: Vec::new(),
            ..Default::default()
        });

        let mut regs = port.registers();
        regs.import_str("# test\nCCR2 = 0x11\nbgr = 10\n").unwrap();
        let out = regs.export_string().unwrap();
        assert!(out.contains("CCR2 = 0x00000011\n"));
        assert!(out.contains("BGR = 0x0000000a\n"));
        assert!(!out.contains("VSTR"));
        assert!(!out.contains("STAR"));

        assert_eq!(port.register(Register::CCR2), 0x11);
        assert_eq!(
            port.transactions()[0],
            Transaction::Set({
                let mut a = RegisterArray::cleared();
                a.set(Register::CCR2, 0x11);
                a
            })
        );
    }

    #[test]
    fn test_read_only_register_refused_by_driver() {
        let mut port = DummyPort::new_default();
        let err = port.registers().set(Register::VSTR, 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(port.register(Register::VSTR), 0x0024_0011);
        // The request still reached the driver
        assert_eq!(port.transactions().len(), 1);
    }

    #[test]
    fn test_loopback() {
        let mut port = DummyPort::new_default();
        port.write_all(b"hello").unwrap();
        port.write_all(b"world").unwrap();

        let mut buf = [0u8; 16];
        let n = port.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"hello");
        assert_eq!(port.pending_rx(), 1);

        port.flush_rx().unwrap();
        assert_eq!(port.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_flush_tx_drops_unsent_frames() {
        let mut port = DummyPort::new_default();
        port.write_all(b"frame").unwrap();
        assert_eq!(port.pending_tx(), 1);
        port.flush_tx().unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(port.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_append_status() {
        let mut port = DummyPort::new_default();
        port.set_append_status(true).unwrap();
        assert!(port.append_status());

        port.write_all(b"ab").unwrap();
        let mut buf = [0u8; 8];
        let n = port.read(&mut buf).unwrap();
        assert_eq!(n, 4);
        assert_eq!(&buf[..2], b"ab");
    }

    #[test]
    fn test_zero_length_read() {
        let mut port = DummyPort::new_default();
        port.write_all(b"x").unwrap();
        assert_eq!(port.read(&mut []).unwrap(), 0);
        assert_eq!(port.pending_tx(), 1);
    }
}
