//! Register command implementations

use fscc_core::{PortControl, Register};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

/// Render a register value the way register files do
fn format_value(value: i64) -> String {
    if value >= 0 {
        format!("0x{:08x}", value)
    } else {
        format!("{} (not set)", value)
    }
}

/// Print one register
pub fn cmd_get<P: PortControl>(
    port: &mut P,
    register: Register,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = port.registers().get(register)?;
    println!("{} = {}", register, format_value(value));
    Ok(())
}

/// Write one register
pub fn cmd_set<P: PortControl>(
    port: &mut P,
    register: Register,
    value: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    if register.is_read_only() {
        log::warn!("{} is read-only; the driver is expected to reject this write", register);
    }
    port.registers().set(register, value)?;
    log::info!("{} <- {}", register, format_value(value));
    Ok(())
}

/// Print every register
pub fn cmd_dump<P: PortControl>(port: &mut P) -> Result<(), Box<dyn std::error::Error>> {
    for (register, value) in port.registers().dump()? {
        let marker = if register.is_read_only() { " (ro)" } else { "" };
        println!("{:<6} = {}{}", register.name(), format_value(value), marker);
    }
    Ok(())
}

/// Apply a register file
pub fn cmd_import<P: PortControl>(
    port: &mut P,
    file: &Path,
) -> Result<usize, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(file)?);
    let count = port.registers().import_from(reader)?;
    println!("Set {} registers from {:?}", count, file);
    Ok(count)
}

/// Save editable registers to a file, or print them
pub fn cmd_export<P: PortControl>(
    port: &mut P,
    output: Option<&Path>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut regs = port.registers();
    let count = match output {
        Some(path) => {
            let mut file = File::create(path)?;
            let count = regs.export_to(&mut file)?;
            file.flush()?;
            println!("Saved {} registers to {:?}", count, path);
            count
        }
        None => regs.export_to(io::stdout().lock())?,
    };
    Ok(count)
}
