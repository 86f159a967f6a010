//! List commands implementation

use crate::ports;
use fscc_core::Register;

/// List all supported port backends
pub fn list_ports() {
    println!("Supported ports:");
    println!();
    for p in ports::available_ports() {
        if p.aliases.is_empty() {
            println!("  {:8} - {}", p.name, p.description);
        } else {
            println!(
                "  {:8} - {} (aliases: {})",
                p.name,
                p.description,
                p.aliases.join(", ")
            );
        }
    }
    println!();
    println!("A bare device path such as /dev/fscc1 selects the linux backend.");
}

/// List all registers with their transaction slots
pub fn list_registers() {
    println!("{:<8} {:>4}  {}", "Register", "Slot", "Access");
    println!("{}", "-".repeat(24));

    for reg in Register::ALL {
        let access = if reg.is_read_only() { "read-only" } else { "read/write" };
        println!("{:<8} {:>4}  {}", reg.name(), reg.slot(), access);
    }
}
