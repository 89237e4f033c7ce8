//! Diagnostic trace events.
//!
//! Events are a closed enum rather than a schema: the driver emits them
//! through [`PlatformServices::emit_trace_event`] and never consumes a
//! result. Payload strings are bounded so an event never carries an
//! unbounded caller-controlled buffer into the trace facility.
//!
//! [`PlatformServices::emit_trace_event`]: crate::platform::PlatformServices::emit_trace_event

use crate::error::DriverError;

/// Maximum length in bytes of a device name carried in a trace event.
pub const DEVICE_NAME_MAX: usize = 128;

/// A fixed-capacity, truncating name buffer for event payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedName {
    buf: [u8; DEVICE_NAME_MAX],
    len: usize,
}

impl BoundedName {
    /// Copies `name` into a bounded buffer, truncating at
    /// [`DEVICE_NAME_MAX`] bytes on a character boundary.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let mut end = name.len().min(DEVICE_NAME_MAX);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        let mut buf = [0u8; DEVICE_NAME_MAX];
        buf[..end].copy_from_slice(&name.as_bytes()[..end]);
        Self { buf, len: end }
    }

    /// Returns the stored name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Construction only ever copies whole characters from a &str.
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Returns the stored length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the name is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A structured, fire-and-forget diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// Emitted once when a device finishes setup.
    Start {
        /// Name of the device object that was created.
        device_name: BoundedName,
        /// Status the setup sequence is about to report.
        status: Result<(), DriverError>,
    },
    /// Emitted once when the driver begins unloading a device.
    Unload {
        /// Name of the device object being torn down.
        device_name: BoundedName,
    },
    /// The sample event a device-control command asks the driver to emit.
    Sample,
}
