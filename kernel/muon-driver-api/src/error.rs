//! Driver error types.

use core::fmt;

/// Errors that can occur during driver operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// A device arrived whose enumeration class matches no known bus.
    ///
    /// Fatal to that device's initialization: the device was bound to the
    /// wrong driver and must not be claimed by either bus handler.
    ConfigurationError,
    /// A request carried a command code the driver does not recognize.
    InvalidParameter,
    /// A bounded property read would overflow the caller's buffer.
    BufferTooSmall,
    /// Driver or device initialization failed.
    InitFailed,
    /// A namespace registration collided with an existing entry.
    AlreadyExists,
    /// The requested operation is not supported.
    Unsupported,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationError => f.write_str("device configuration error"),
            Self::InvalidParameter => f.write_str("invalid parameter"),
            Self::BufferTooSmall => f.write_str("buffer too small"),
            Self::InitFailed => f.write_str("initialization failed"),
            Self::AlreadyExists => f.write_str("name already exists"),
            Self::Unsupported => f.write_str("operation not supported"),
        }
    }
}
