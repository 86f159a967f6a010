//! Linux FSCC port implementation
//!
//! This module provides the `Port` struct that implements the `PortControl`
//! trait on top of the FSCC character device.

use crate::error::{LinuxFsccError, Result};

use fscc_core::{PortControl, RegisterArray, RegisterDriver};
use log::{debug, info, warn};

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

/// Device opened when no path is given
pub const DEFAULT_DEVICE: &str = "/dev/fscc0";

/// FSCC driver ioctls
///
/// The request codes come from `fscc_core::ioctl` rather than nix's own
/// encoding helpers so they match the driver bit for bit on every
/// architecture.
mod ioctl {
    use fscc_core::ioctl::{
        FSCC_DISABLE_APPEND_STATUS, FSCC_ENABLE_APPEND_STATUS, FSCC_FLUSH_RX, FSCC_FLUSH_TX,
        FSCC_GET_REGISTERS, FSCC_SET_REGISTERS,
    };
    use fscc_core::RegisterArray;
    use nix::{ioctl_none_bad, ioctl_readwrite_bad, ioctl_write_ptr_bad};

    ioctl_readwrite_bad!(fscc_get_registers, FSCC_GET_REGISTERS, RegisterArray);
    ioctl_write_ptr_bad!(fscc_set_registers, FSCC_SET_REGISTERS, RegisterArray);
    ioctl_none_bad!(fscc_flush_tx, FSCC_FLUSH_TX);
    ioctl_none_bad!(fscc_flush_rx, FSCC_FLUSH_RX);
    ioctl_none_bad!(fscc_enable_append_status, FSCC_ENABLE_APPEND_STATUS);
    ioctl_none_bad!(fscc_disable_append_status, FSCC_DISABLE_APPEND_STATUS);
}

/// Configuration for opening an FSCC port
#[derive(Debug, Clone)]
pub struct PortConfig {
    /// Device path (e.g., "/dev/fscc0")
    pub path: PathBuf,
    /// Open for reading
    pub read: bool,
    /// Open for writing
    pub write: bool,
    /// Append-status mode applied right after opening
    pub append_status: bool,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DEVICE),
            read: true,
            write: true,
            append_status: false,
        }
    }
}

impl PortConfig {
    /// Create a new configuration with the given device path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Select the access mode
    pub fn with_access(mut self, read: bool, write: bool) -> Self {
        self.read = read;
        self.write = write;
        self
    }

    /// Enable or disable append-status mode on open
    pub fn with_append_status(mut self, enable: bool) -> Self {
        self.append_status = enable;
        self
    }
}

/// An open FSCC port
///
/// Dropping the port closes the descriptor.
#[derive(Debug)]
pub struct Port {
    file: File,
    path: PathBuf,
}

impl Port {
    /// Open an FSCC port
    ///
    /// A missing device node is reported as `DeviceNotFound` before any
    /// open or ioctl is attempted. Once open, the configured append-status
    /// mode is always written, since the driver cannot report it.
    pub fn open(config: &PortConfig) -> Result<Self> {
        if !config.path.exists() {
            return Err(LinuxFsccError::DeviceNotFound(config.path.clone()));
        }

        debug!("fscc: Opening device {}", config.path.display());

        let file = OpenOptions::new()
            .read(config.read)
            .write(config.write)
            .open(&config.path)
            .map_err(|e| LinuxFsccError::OpenFailed {
                path: config.path.clone(),
                source: e,
            })?;

        let mut port = Self::from_file(file, &config.path);
        port.set_append_status(config.append_status)?;

        info!(
            "Opened {} (append_status={})",
            config.path.display(),
            config.append_status
        );

        Ok(port)
    }

    /// Wrap an already opened descriptor without issuing any ioctl
    pub fn from_file(file: File, path: impl AsRef<Path>) -> Self {
        Self {
            file,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Device path this port was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsRawFd for Port {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl RegisterDriver for Port {
    fn get_registers(&mut self, regs: &mut RegisterArray) -> io::Result<()> {
        debug!("fscc: GET_REGISTERS ({} slots)", regs.participating().count());
        // SAFETY: the descriptor is open and `regs` is a valid, exclusively
        // borrowed `#[repr(C)]` array of the size the driver copies.
        unsafe { ioctl::fscc_get_registers(self.file.as_raw_fd(), regs) }?;
        Ok(())
    }

    fn set_registers(&mut self, regs: &RegisterArray) -> io::Result<()> {
        debug!("fscc: SET_REGISTERS ({} slots)", regs.participating().count());
        // SAFETY: as above; the driver only reads through this pointer.
        unsafe { ioctl::fscc_set_registers(self.file.as_raw_fd(), regs) }?;
        Ok(())
    }
}

impl PortControl for Port {
    fn flush_tx(&mut self) -> io::Result<()> {
        debug!("fscc: FLUSH_TX");
        // SAFETY: argument-less ioctl on an open descriptor
        unsafe { ioctl::fscc_flush_tx(self.file.as_raw_fd()) }?;
        Ok(())
    }

    fn flush_rx(&mut self) -> io::Result<()> {
        debug!("fscc: FLUSH_RX");
        // SAFETY: argument-less ioctl on an open descriptor
        unsafe { ioctl::fscc_flush_rx(self.file.as_raw_fd()) }?;
        Ok(())
    }

    fn set_append_status(&mut self, enable: bool) -> io::Result<()> {
        let fd = self.file.as_raw_fd();
        // SAFETY: argument-less ioctls on an open descriptor
        if enable {
            debug!("fscc: ENABLE_APPEND_STATUS");
            unsafe { ioctl::fscc_enable_append_status(fd) }?;
        } else {
            debug!("fscc: DISABLE_APPEND_STATUS");
            unsafe { ioctl::fscc_disable_append_status(fd) }?;
        }
        Ok(())
    }
}

impl Read for Port {
    /// Read one frame; an empty buffer returns 0 without calling the driver
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.file.read(buf)
    }
}

impl Write for Port {
    /// Write one frame
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Parse port options from key-value pairs
///
/// # Supported options
/// - `dev=PATH` - Device path (default `/dev/fscc0`)
/// - `append_status=BOOL` - `1`/`0`, `on`/`off`, `true`/`false`
/// - `mode=MODE` - `r`, `w` or `rw`
///
/// # Example
/// ```ignore
/// let options = &[("dev", "/dev/fscc1"), ("append_status", "1")];
/// let config = parse_options(options)?;
/// ```
pub fn parse_options(options: &[(&str, &str)]) -> Result<PortConfig> {
    let mut config = PortConfig::default();

    for (key, value) in options {
        match *key {
            "dev" => {
                if value.is_empty() {
                    return Err(LinuxFsccError::MissingParameter("dev"));
                }
                config.path = PathBuf::from(*value);
            }
            "append_status" => {
                config.append_status = match value.to_ascii_lowercase().as_str() {
                    "1" | "on" | "true" | "yes" => true,
                    "0" | "off" | "false" | "no" => false,
                    _ => {
                        return Err(LinuxFsccError::InvalidParameter {
                            name: "append_status",
                            message: format!("'{}' is not a boolean", value),
                        })
                    }
                };
            }
            "mode" => {
                let (read, write) = match *value {
                    "r" => (true, false),
                    "w" => (false, true),
                    "rw" => (true, true),
                    _ => {
                        return Err(LinuxFsccError::InvalidParameter {
                            name: "mode",
                            message: format!("'{}' is not one of r, w, rw", value),
                        })
                    }
                };
                config = config.with_access(read, write);
            }
            _ => {
                warn!("Unknown fscc option: {}={}", key, value);
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fscc_core::Register;

    fn scratch_file(tag: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("fscc-linux-{}-{}", tag, std::process::id()));
        std::fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn test_open_missing_device() {
        let config = PortConfig::new("/dev/fscc-does-not-exist");
        match Port::open(&config) {
            Err(LinuxFsccError::DeviceNotFound(path)) => {
                assert_eq!(path, PathBuf::from("/dev/fscc-does-not-exist"));
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("opened a missing device"),
        }

        let err: io::Error = Port::open(&config).err().unwrap().into();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_open_non_fscc_file_fails_in_ioctl() {
        let path = scratch_file("open");
        let err = Port::open(&PortConfig::new(&path)).err().unwrap();
        std::fs::remove_file(&path).unwrap();
        match err {
            LinuxFsccError::Io(e) => assert_eq!(e.raw_os_error(), Some(libc::ENOTTY)),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_register_ioctl_error_is_os_error() {
        let path = scratch_file("regs");
        let file = OpenOptions::new().read(true).write(true).open(&path).unwrap();
        let mut port = Port::from_file(file, &path);

        let err = port.registers().set(Register::CCR0, 1).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOTTY));
        let err = port.registers().get(Register::VSTR).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOTTY));
        let err = port.flush_tx().unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOTTY));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_zero_length_read_skips_device() {
        // A write-only descriptor fails any real read with EBADF
        let path = scratch_file("read");
        let file = OpenOptions::new().write(true).open(&path).unwrap();
        let mut port = Port::from_file(file, &path);

        assert_eq!(port.read(&mut []).unwrap(), 0);
        assert!(port.read(&mut [0u8; 4]).is_err());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_options() {
        let config = parse_options(&[]).unwrap();
        assert_eq!(config.path, PathBuf::from(DEFAULT_DEVICE));
        assert!(config.read && config.write);
        assert!(!config.append_status);

        let config = parse_options(&[
            ("dev", "/dev/fscc1"),
            ("append_status", "on"),
            ("mode", "r"),
        ])
        .unwrap();
        assert_eq!(config.path, PathBuf::from("/dev/fscc1"));
        assert!(config.append_status);
        assert!(config.read && !config.write);

        assert!(matches!(
            parse_options(&[("append_status", "maybe")]),
            Err(LinuxFsccError::InvalidParameter {
                name: "append_status",
                ..
            })
        ));
        assert!(matches!(
            parse_options(&[("dev", "")]),
            Err(LinuxFsccError::MissingParameter("dev"))
        ));
    }
}
