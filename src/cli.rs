//! CLI argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use fscc_core::text::parse_value;
use fscc_core::Register;
use std::path::PathBuf;

/// Default port when none is given
pub const DEFAULT_PORT: &str = "/dev/fscc0";

/// Parse a string as a hex or decimal register value
pub fn parse_register_value(s: &str) -> Result<i64, String> {
    parse_value(s).map_err(|e| format!("Invalid value '{}': {}", s, e))
}

/// Help text for the port argument; `list-ports` shows the compiled-in backends
const PORT_HELP: &str = "Port to use: device path or backend[:options] (see list-ports)";

#[derive(Parser)]
#[command(name = "fscc")]
#[command(author, version, about = "FSCC synchronous serial card utility", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short, long, global = true, default_value = DEFAULT_PORT, help = PORT_HELP)]
    pub port: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Append-status switch
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl From<Switch> for bool {
    fn from(s: Switch) -> bool {
        s == Switch::On
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read one register
    Get {
        /// Register name (e.g. CCR0)
        register: Register,
    },

    /// Write one register
    Set {
        /// Register name (e.g. CCR0)
        register: Register,

        /// Value (hex with 0x prefix, or decimal)
        #[arg(value_parser = parse_register_value, allow_hyphen_values = true)]
        value: i64,
    },

    /// Read every register, including STAR and VSTR
    Dump,

    /// Apply a register file (`NAME = VALUE` lines)
    Import {
        /// Register file to apply
        file: PathBuf,
    },

    /// Save editable registers as a register file
    Export {
        /// Output file (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Discard queued transmit and/or receive data
    Flush {
        /// Flush the transmit side
        #[arg(long)]
        tx: bool,

        /// Flush the receive side
        #[arg(long)]
        rx: bool,
    },

    /// Turn append-status mode on or off
    AppendStatus {
        #[arg(value_enum)]
        state: Switch,
    },

    /// Read one frame from the port
    Read {
        /// Maximum frame size in bytes
        #[arg(short = 'n', long, default_value = "4096")]
        count: usize,

        /// Output file (hex dump to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a file to the port as one frame
    Write {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List register names and slots
    ListRegisters,

    /// List supported port backends
    ListPorts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_register_value() {
        assert_eq!(parse_register_value("0x0011201c"), Ok(0x0011_201c));
        assert_eq!(parse_register_value("0XFF"), Ok(0xff));
        assert_eq!(parse_register_value("24"), Ok(24));
        assert!(parse_register_value("0xg").is_err());
        assert!(parse_register_value("ten").is_err());
        assert!(parse_register_value("0x-2").is_err());
        assert!(parse_register_value("0x+5").is_err());
        assert_eq!(parse_register_value("-1"), Ok(-1));
    }

    #[test]
    fn test_parse_set_command() {
        let cli = Cli::try_parse_from(["fscc", "-p", "dummy", "set", "ccr0", "0x10"]).unwrap();
        assert_eq!(cli.port, "dummy");
        match cli.command {
            Commands::Set { register, value } => {
                assert_eq!(register, Register::CCR0);
                assert_eq!(value, 0x10);
            }
            _ => panic!("expected set"),
        }
    }

    #[test]
    fn test_default_port() {
        let cli = Cli::try_parse_from(["fscc", "dump"]).unwrap();
        assert_eq!(cli.port, DEFAULT_PORT);
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
