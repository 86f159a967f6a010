//! Port registration and dispatch
//!
//! This module maps a port string from the command line to an open
//! `PortControl`, with support for feature-gated backends and generated
//! help text.
//!
//! Port strings look like `name:key=value,key=value`. A bare absolute path
//! such as `/dev/fscc1` is shorthand for `linux:dev=/dev/fscc1`.

use fscc_core::PortControl;

/// Information about a port backend
pub struct PortInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available backends (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_ports() -> Vec<PortInfo> {
    let mut ports = Vec::new();

    #[cfg(feature = "linux")]
    ports.push(PortInfo {
        name: "linux",
        aliases: &["fscc"],
        description: "FSCC character device (dev=/dev/fsccN,append_status=<0|1>,mode=<r|w|rw>)",
    });

    #[cfg(feature = "dummy")]
    ports.push(PortInfo {
        name: "dummy",
        aliases: &[],
        description: "In-memory card emulator with loopback data path",
    });

    ports
}

/// Generate help text listing all available backends
pub fn port_help() -> String {
    let ports = available_ports();

    if ports.is_empty() {
        return "No port backends available (recompile with backend features enabled)".to_string();
    }

    let mut help = String::from("Available ports:\n");
    for p in &ports {
        help.push_str(&format!("  {:8} - {}\n", p.name, p.description));
    }
    help
}

/// Parse a port string into a backend name and options
///
/// Examples:
/// - "dummy" -> ("dummy", [])
/// - "linux:dev=/dev/fscc1" -> ("linux", [("dev", "/dev/fscc1")])
/// - "/dev/fscc1" -> ("linux", [("dev", "/dev/fscc1")])
pub fn parse_port_string(s: &str) -> (&str, Vec<(&str, &str)>) {
    if s.starts_with('/') {
        return ("linux", vec![("dev", s)]);
    }

    if let Some((name, opts)) = s.split_once(':') {
        let options: Vec<_> = opts
            .split(',')
            .filter_map(|opt| opt.split_once('='))
            .collect();
        (name, options)
    } else {
        (s, Vec::new())
    }
}

/// Open a port from its command-line string
pub fn open_port(port: &str) -> Result<Box<dyn PortControl>, Box<dyn std::error::Error>> {
    let (name, options) = parse_port_string(port);
    log::debug!("Opening port '{}' with options {:?}", name, options);

    match name {
        #[cfg(feature = "linux")]
        "linux" | "fscc" => fscc_linux::open_linux_port(&options),

        #[cfg(feature = "dummy")]
        "dummy" => {
            if !options.is_empty() {
                log::warn!("dummy port takes no options, ignoring {:?}", options);
            }
            Ok(Box::new(fscc_dummy::DummyPort::new_default()))
        }

        _ => Err(unknown_port_error(name)),
    }
}

fn unknown_port_error(name: &str) -> Box<dyn std::error::Error> {
    let mut msg = format!("Unknown port: {}\n\n", name);
    msg.push_str(&port_help());
    msg.push_str("\nUse 'fscc list-ports' for more details");
    msg.into()
}
