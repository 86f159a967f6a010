//! Card registers and the driver's transaction array
//!
//! The driver exchanges registers as a fixed array of 24 signed 64-bit
//! slots. Each named register lives at a fixed slot; the remaining slots are
//! reserved and always carry [`NOT_SET`].

use core::fmt;
use core::str::FromStr;

/// Number of slots in a driver transaction array
pub const REGISTER_SLOTS: usize = 24;

/// Slot value meaning "not part of this transaction"
pub const NOT_SET: i64 = -1;

/// Slot value asking the driver to fill in the current register value
pub const UPDATE_VALUE: i64 = -2;

/// A named FSCC register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
pub enum Register {
    /// FIFO trigger level
    FIFOT,
    /// Status (read-only)
    STAR,
    /// Channel configuration 0
    CCR0,
    /// Channel configuration 1
    CCR1,
    /// Channel configuration 2
    CCR2,
    /// Baud rate generator
    BGR,
    /// Sync/flag character
    SSR,
    /// Sync mask
    SMR,
    /// Termination sequence
    TSR,
    /// Termination mask
    TMR,
    /// Receive address
    RAR,
    /// Receive address mask
    RAMR,
    /// Preamble/postamble
    PPR,
    /// Timer control
    TCR,
    /// Version (read-only)
    VSTR,
    /// Interrupt mask
    IMR,
    /// DPLL range
    DPLLR,
    /// Feature control
    FCR,
}

impl Register {
    /// All registers in declaration order
    pub const ALL: [Register; 18] = [
        Register::FIFOT,
        Register::STAR,
        Register::CCR0,
        Register::CCR1,
        Register::CCR2,
        Register::BGR,
        Register::SSR,
        Register::SMR,
        Register::TSR,
        Register::TMR,
        Register::RAR,
        Register::RAMR,
        Register::PPR,
        Register::TCR,
        Register::VSTR,
        Register::IMR,
        Register::DPLLR,
        Register::FCR,
    ];

    /// Register name as used by the driver documentation and text files
    pub const fn name(self) -> &'static str {
        match self {
            Register::FIFOT => "FIFOT",
            Register::STAR => "STAR",
            Register::CCR0 => "CCR0",
            Register::CCR1 => "CCR1",
            Register::CCR2 => "CCR2",
            Register::BGR => "BGR",
            Register::SSR => "SSR",
            Register::SMR => "SMR",
            Register::TSR => "TSR",
            Register::TMR => "TMR",
            Register::RAR => "RAR",
            Register::RAMR => "RAMR",
            Register::PPR => "PPR",
            Register::TCR => "TCR",
            Register::VSTR => "VSTR",
            Register::IMR => "IMR",
            Register::DPLLR => "DPLLR",
            Register::FCR => "FCR",
        }
    }

    /// Slot index of this register in a [`RegisterArray`]
    pub const fn slot(self) -> usize {
        match self {
            Register::FIFOT => 2,
            Register::STAR => 6,
            Register::CCR0 => 7,
            Register::CCR1 => 8,
            Register::CCR2 => 9,
            Register::BGR => 10,
            Register::SSR => 11,
            Register::SMR => 12,
            Register::TSR => 13,
            Register::TMR => 14,
            Register::RAR => 15,
            Register::RAMR => 16,
            Register::PPR => 17,
            Register::TCR => 18,
            Register::VSTR => 19,
            Register::IMR => 21,
            Register::DPLLR => 22,
            Register::FCR => 23,
        }
    }

    /// Look up the register stored at `slot`, if any
    pub fn from_slot(slot: usize) -> Option<Register> {
        Self::ALL.iter().copied().find(|r| r.slot() == slot)
    }

    /// STAR and VSTR can only be fetched
    pub const fn is_read_only(self) -> bool {
        matches!(self, Register::STAR | Register::VSTR)
    }

    /// Registers that may be written, in declaration order
    pub fn editable() -> impl Iterator<Item = Register> {
        Self::ALL.iter().copied().filter(|r| !r.is_read_only())
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a register name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown register: {0}")]
pub struct UnknownRegister(pub String);

impl FromStr for Register {
    type Err = UnknownRegister;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownRegister(name.to_string()))
    }
}

/// Transaction array passed by pointer to the driver
///
/// Layout matches the driver's `struct fscc_registers`: 24 consecutive
/// 64-bit signed integers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterArray {
    slots: [i64; REGISTER_SLOTS],
}

impl Default for RegisterArray {
    fn default() -> Self {
        Self::cleared()
    }
}

impl RegisterArray {
    /// An array where no slot participates in the transaction
    pub const fn cleared() -> Self {
        Self {
            slots: [NOT_SET; REGISTER_SLOTS],
        }
    }

    /// Reset every slot to [`NOT_SET`]
    pub fn clear(&mut self) {
        self.slots = [NOT_SET; REGISTER_SLOTS];
    }

    /// Value held in a register's slot
    pub fn get(&self, register: Register) -> i64 {
        self.slots[register.slot()]
    }

    /// Store a value in a register's slot
    pub fn set(&mut self, register: Register, value: i64) {
        self.slots[register.slot()] = value;
    }

    /// Mark a register to be filled in by a bulk-get
    pub fn request(&mut self, register: Register) {
        self.set(register, UPDATE_VALUE);
    }

    /// Raw slot view, in driver order
    pub fn as_slots(&self) -> &[i64; REGISTER_SLOTS] {
        &self.slots
    }

    /// Mutable raw slot view, in driver order
    pub fn as_slots_mut(&mut self) -> &mut [i64; REGISTER_SLOTS] {
        &mut self.slots
    }

    /// Registers whose slot is not [`NOT_SET`], with their values
    pub fn participating(&self) -> impl Iterator<Item = (Register, i64)> + '_ {
        Register::ALL
            .iter()
            .copied()
            .map(move |r| (r, self.get(r)))
            .filter(|&(_, v)| v != NOT_SET)
    }
}
