//! Register file text format
//!
//! ```text
//! # Comments start with '#'
//! CCR0 = 0x0011201c
//! CCR1 = 24
//! ```
//!
//! Names are case-insensitive. Values are decimal or `0x`-prefixed hex.
//! Exported files always use `NAME = 0x%08x`.

use std::num::ParseIntError;

use crate::error::{Error, Result};
use crate::register::Register;

/// Parse one line of a register file
///
/// Returns `None` for comments and blank lines. `line_no` is only used to
/// label errors.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<(Register, i64)>> {
    if line.starts_with('#') || line.trim().is_empty() {
        return Ok(None);
    }

    let (name, value) = line
        .split_once('=')
        .ok_or(Error::MissingAssignment { line: line_no })?;

    let register = name
        .parse::<Register>()
        .map_err(|source| Error::UnknownRegister {
            line: line_no,
            source,
        })?;

    let value = value.trim();
    parse_value(value)
        .map(|v| Some((register, v)))
        .map_err(|source| Error::InvalidValue {
            line: line_no,
            register,
            value: value.to_string(),
            source,
        })
}

/// Why a register value failed to parse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Not a valid integer literal
    #[error(transparent)]
    Int(#[from] ParseIntError),
    /// `0x` followed by a sign
    #[error("hex value must not carry a sign")]
    SignedHex,
    /// Hex value does not fit in a signed 64-bit register slot
    #[error("hex value out of range")]
    HexOverflow,
}

/// Parse a register value: signed decimal, or unsigned `0x`/`0X` hex
pub fn parse_value(s: &str) -> std::result::Result<i64, ValueError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => {
            if hex.starts_with(|c| c == '+' || c == '-') {
                return Err(ValueError::SignedHex);
            }
            let raw = u64::from_str_radix(hex, 16)?;
            i64::try_from(raw).map_err(|_| ValueError::HexOverflow)
        }
        None => Ok(s.parse::<i64>()?),
    }
}

/// Format one export line, including the trailing newline
pub fn format_line(register: Register, value: i64) -> String {
    format!("{} = 0x{:08x}\n", register, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignments() {
        assert_eq!(
            parse_line(1, "CCR0 = 0x0011201c").unwrap(),
            Some((Register::CCR0, 0x0011_201c))
        );
        assert_eq!(
            parse_line(1, "ccr1=24").unwrap(),
            Some((Register::CCR1, 24))
        );
        assert_eq!(
            parse_line(1, "  BGR =  0XFF  ").unwrap(),
            Some((Register::BGR, 0xff))
        );
        assert_eq!(
            parse_line(1, "IMR = -1").unwrap(),
            Some((Register::IMR, -1))
        );
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        assert_eq!(parse_line(1, "# CCR0 = 0x1").unwrap(), None);
        assert_eq!(parse_line(2, "").unwrap(), None);
        assert_eq!(parse_line(3, "   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_line(4, "CCR0 0x1"),
            Err(Error::MissingAssignment { line: 4 })
        ));
        assert!(matches!(
            parse_line(5, "FOO = 1"),
            Err(Error::UnknownRegister { line: 5, .. })
        ));
        match parse_line(6, "CCR0 = 0xZZ") {
            Err(Error::InvalidValue {
                line,
                register,
                value,
                ..
            }) => {
                assert_eq!(line, 6);
                assert_eq!(register, Register::CCR0);
                assert_eq!(value, "0xZZ");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        for bad in ["CCR0 = 0x-2", "CCR0 = 0x+5", "CCR0 = 0X-1"] {
            assert!(
                matches!(
                    parse_line(7, bad),
                    Err(Error::InvalidValue {
                        source: ValueError::SignedHex,
                        ..
                    })
                ),
                "{} accepted",
                bad
            );
        }
        assert!(matches!(
            parse_line(8, "CCR0 = 0x8000000000000000"),
            Err(Error::InvalidValue {
                source: ValueError::HexOverflow,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("0x7fffffffffffffff"), Ok(i64::MAX));
        assert_eq!(parse_value("-2"), Ok(-2));
        assert_eq!(parse_value("+7"), Ok(7));
        assert_eq!(parse_value("0x-5"), Err(ValueError::SignedHex));
        assert!(matches!(parse_value("0x"), Err(ValueError::Int(_))));
        assert!(matches!(parse_value("12a"), Err(ValueError::Int(_))));
    }

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(Register::CCR0, 0x10), "CCR0 = 0x00000010\n");
        assert_eq!(
            format_line(Register::FCR, 0x1_0000_0000),
            "FCR = 0x100000000\n"
        );
    }
}
