//! FSCC driver ioctl control codes
//!
//! The codes are built the same way the driver headers build them:
//! `dir | ((size & 0x7f) << 16) | (magic << 8) | nr`. The size field is
//! `sizeof(int)` for the register commands even though the driver copies a
//! whole [`RegisterArray`](crate::RegisterArray); it is part of the code,
//! not a length check.

/// No data transfer
pub const IOC_NONE: u32 = 0x0000_0000;
/// Userland writes, driver reads
pub const IOC_WRITE: u32 = 0x4000_0000;
/// Driver writes, userland reads
pub const IOC_READ: u32 = 0x8000_0000;
/// Mask applied to the size field
pub const IOCPARM_MASK: u32 = 0x7f;

/// Magic byte shared by all FSCC commands
pub const FSCC_IOCTL_MAGIC: u8 = 0x18;

const INT_SIZE: u32 = core::mem::size_of::<i32>() as u32;

/// Encode a control code from its parts
pub const fn ioc(dir: u32, magic: u8, nr: u8, size: u32) -> u32 {
    dir | ((size & IOCPARM_MASK) << 16) | ((magic as u32) << 8) | nr as u32
}

/// `_IO(magic, nr)`
pub const fn io(magic: u8, nr: u8) -> u32 {
    ioc(IOC_NONE, magic, nr, 0)
}

/// `_IOR(magic, nr, size)`
pub const fn ior(magic: u8, nr: u8, size: u32) -> u32 {
    ioc(IOC_READ, magic, nr, size)
}

/// `_IOW(magic, nr, size)`
pub const fn iow(magic: u8, nr: u8, size: u32) -> u32 {
    ioc(IOC_WRITE, magic, nr, size)
}

/// Fetch the registers marked with `UPDATE_VALUE`
pub const FSCC_GET_REGISTERS: u32 = ior(FSCC_IOCTL_MAGIC, 0, INT_SIZE);
/// Write every non-negative slot
pub const FSCC_SET_REGISTERS: u32 = iow(FSCC_IOCTL_MAGIC, 1, INT_SIZE);
/// Drop pending transmit data
pub const FSCC_FLUSH_TX: u32 = io(FSCC_IOCTL_MAGIC, 2);
/// Drop pending receive data
pub const FSCC_FLUSH_RX: u32 = io(FSCC_IOCTL_MAGIC, 3);
/// Append status bytes to each received frame
pub const FSCC_ENABLE_APPEND_STATUS: u32 = io(FSCC_IOCTL_MAGIC, 4);
/// Stop appending status bytes
pub const FSCC_DISABLE_APPEND_STATUS: u32 = io(FSCC_IOCTL_MAGIC, 5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_codes() {
        assert_eq!(FSCC_GET_REGISTERS, 0x8004_1800);
        assert_eq!(FSCC_SET_REGISTERS, 0x4004_1801);
        assert_eq!(FSCC_FLUSH_TX, 0x0000_1802);
        assert_eq!(FSCC_FLUSH_RX, 0x0000_1803);
        assert_eq!(FSCC_ENABLE_APPEND_STATUS, 0x0000_1804);
        assert_eq!(FSCC_DISABLE_APPEND_STATUS, 0x0000_1805);
    }

    #[test]
    fn test_signed_view() {
        // Some callers pass the code as a C int
        assert_eq!(FSCC_GET_REGISTERS as i32, -2_147_215_360);
        assert_eq!(FSCC_SET_REGISTERS as i32, 1_074_010_113);
    }

    #[test]
    fn test_size_is_masked() {
        assert_eq!(ioc(IOC_READ, 0x18, 0, 0x80), ioc(IOC_READ, 0x18, 0, 0));
        assert_eq!(ioc(IOC_READ, 0x18, 0, 0x84), FSCC_GET_REGISTERS);
    }
}
