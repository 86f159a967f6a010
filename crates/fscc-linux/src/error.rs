//! Error types for Linux FSCC port operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Linux FSCC port errors
#[derive(Debug, Error)]
pub enum LinuxFsccError {
    /// Device node does not exist
    #[error("FSCC device not found: {}", .0.display())]
    DeviceNotFound(PathBuf),

    /// Device node exists but could not be opened
    #[error("Failed to open {}: {source}", path.display())]
    OpenFailed {
        /// Device node that failed to open
        path: PathBuf,
        /// Error from `open(2)`
        #[source]
        source: io::Error,
    },

    /// Driver call failed
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Missing required parameter
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Option key as given on the command line
        name: &'static str,
        /// Why the value was rejected
        message: String,
    },
}

impl From<LinuxFsccError> for io::Error {
    fn from(err: LinuxFsccError) -> Self {
        match err {
            LinuxFsccError::DeviceNotFound(_) => io::Error::new(io::ErrorKind::NotFound, err),
            LinuxFsccError::OpenFailed { source, .. } => source,
            LinuxFsccError::Io(source) => source,
            LinuxFsccError::MissingParameter(_) | LinuxFsccError::InvalidParameter { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
        }
    }
}

/// Result type for Linux FSCC port operations
pub type Result<T> = std::result::Result<T, LinuxFsccError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_failed_keeps_os_error() {
        let err = LinuxFsccError::OpenFailed {
            path: PathBuf::from("/dev/fscc3"),
            source: io::Error::from_raw_os_error(13),
        };
        assert!(err.to_string().starts_with("Failed to open /dev/fscc3: "));

        let io_err: io::Error = err.into();
        assert_eq!(io_err.raw_os_error(), Some(13));
    }

    #[test]
    fn test_invalid_parameter_is_invalid_input() {
        let err = LinuxFsccError::InvalidParameter {
            name: "mode",
            message: "expected r, w or rw".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'mode': expected r, w or rw"
        );

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }
}
