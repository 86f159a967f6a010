//! Error types for fscc-core

use std::io;
use thiserror::Error;

use crate::register::{Register, UnknownRegister};
use crate::text::ValueError;

/// Errors raised while importing register files or talking to a driver
#[derive(Debug, Error)]
pub enum Error {
    /// Operating-system error from the driver, passed through untouched
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Line is neither a comment nor a `NAME = VALUE` assignment
    #[error("line {line}: expected `NAME = VALUE`")]
    MissingAssignment {
        /// 1-based line number
        line: usize,
    },

    /// Register name not recognised
    #[error("line {line}: {source}")]
    UnknownRegister {
        /// 1-based line number
        line: usize,
        /// Lookup failure
        #[source]
        source: UnknownRegister,
    },

    /// Value is not a decimal or `0x` hex integer
    #[error("line {line}: invalid value '{value}' for {register}: {source}")]
    InvalidValue {
        /// 1-based line number
        line: usize,
        /// Register being assigned
        register: Register,
        /// Offending text
        value: String,
        /// Parse failure
        #[source]
        source: ValueError,
    },
}

/// Result type for fscc-core operations
pub type Result<T> = std::result::Result<T, Error>;
