//! fscc - FSCC synchronous serial card utility
//!
//! Command-line front end for the FSCC kernel driver: register access,
//! register files, flow control and the frame data path.
//!
//! # Architecture
//!
//! Every command runs against a `PortControl`:
//! - **linux** - `/dev/fsccN` through the driver's ioctls
//! - **dummy** - In-memory card emulator, for trying things without hardware
//!
//! Register commands go through a `RegisterBank`, which turns each access
//! into one driver transaction.

mod cli;
mod commands;
mod ports;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::ListPorts => {
            commands::list_ports();
            Ok(())
        }
        Commands::ListRegisters => {
            commands::list_registers();
            Ok(())
        }
        command => {
            let mut port = ports::open_port(&cli.port)?;
            run_port_command(&mut port, command)
        }
    }
}

fn run_port_command(
    port: &mut Box<dyn fscc_core::PortControl>,
    command: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Get { register } => commands::registers::cmd_get(port, register),
        Commands::Set { register, value } => commands::registers::cmd_set(port, register, value),
        Commands::Dump => commands::registers::cmd_dump(port),
        Commands::Import { file } => commands::registers::cmd_import(port, &file).map(|_| ()),
        Commands::Export { output } => {
            commands::registers::cmd_export(port, output.as_deref()).map(|_| ())
        }
        Commands::Flush { tx, rx } => commands::port::cmd_flush(port, tx, rx),
        Commands::AppendStatus { state } => {
            commands::port::cmd_append_status(port, state.into())
        }
        Commands::Read { count, output } => {
            commands::port::cmd_read(port, count, output.as_deref()).map(|_| ())
        }
        Commands::Write { input } => commands::port::cmd_write(port, &input),
        Commands::ListPorts | Commands::ListRegisters => unreachable!("handled without a port"),
    }
}
