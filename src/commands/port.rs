//! Port command implementations

use fscc_core::PortControl;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// Flush transmit and/or receive data; both when neither is selected
pub fn cmd_flush<P: PortControl + ?Sized>(
    port: &mut P,
    tx: bool,
    rx: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = if !tx && !rx { (true, true) } else { (tx, rx) };

    if tx {
        port.flush_tx()?;
        println!("Flushed TX");
    }
    if rx {
        port.flush_rx()?;
        println!("Flushed RX");
    }
    Ok(())
}

/// Switch append-status mode
pub fn cmd_append_status<P: PortControl + ?Sized>(
    port: &mut P,
    enable: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    port.set_append_status(enable)?;
    println!(
        "Append status {}",
        if enable { "enabled" } else { "disabled" }
    );
    Ok(())
}

/// Read one frame of at most `count` bytes
///
/// Returns the frame; `count == 0` reads nothing.
pub fn cmd_read<P: PortControl + ?Sized>(
    port: &mut P,
    count: usize,
    output: Option<&Path>,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut frame = vec![0u8; count];
    let len = port.read(&mut frame)?;
    frame.truncate(len);

    match output {
        Some(path) => {
            fs::write(path, &frame)?;
            println!("Wrote {} bytes to {:?}", frame.len(), path);
        }
        None => print_hex(&frame),
    }
    Ok(frame)
}

/// Send a file as one frame
pub fn cmd_write<P: PortControl + ?Sized>(
    port: &mut P,
    input: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let written = port.write(&data)?;
    if written != data.len() {
        return Err(format!(
            "Short write: driver took {} of {} bytes",
            written,
            data.len()
        )
        .into());
    }
    println!("Sent {} bytes from {:?}", written, input);
    Ok(())
}

fn print_hex(data: &[u8]) {
    if data.is_empty() {
        println!("(no data)");
        return;
    }
    for (i, chunk) in data.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        println!("{:08x}  {}", i * 16, hex.join(" "));
    }
}
