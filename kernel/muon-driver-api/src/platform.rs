//! Platform service contracts for drivers.
//!
//! Drivers use [`PlatformServices`] to create and tear down OS-visible
//! resources (device objects, symbolic aliases, trace-provider
//! registrations) and to emit diagnostic events, without depending on
//! platform internals.

use crate::device::DeviceFlags;
use crate::error::DriverError;
use crate::trace::TraceEvent;

/// Opaque handle to the driver instance itself.
///
/// Minted by the platform at load time and passed back through arrival
/// callbacks so bus-specific initializers can associate devices with the
/// owning driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverHandle(u64);

impl DriverHandle {
    /// Wraps a platform-assigned raw handle value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque handle to a live device object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceHandle(u64);

impl DeviceHandle {
    /// Wraps a platform-assigned raw handle value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque handle to a trace-provider registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderHandle(u64);

impl ProviderHandle {
    /// Wraps a platform-assigned raw handle value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Trait providing platform services to drivers.
///
/// Implemented by the platform and passed to drivers at load time and
/// through dispatch entry points. Every successful acquisition here has
/// exactly one matching release, and drivers release in strict reverse
/// order of acquisition on both the unload path and every early-failure
/// path during setup.
pub trait PlatformServices: Send + Sync {
    /// Creates a named device object.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] if the object cannot be created; no
    /// partial resource is left behind on failure.
    fn create_device(&self, name: &str, flags: DeviceFlags)
        -> Result<DeviceHandle, DriverError>;

    /// Deletes a device object created by [`create_device`](Self::create_device).
    fn delete_device(&self, device: DeviceHandle);

    /// Registers a symbolic alias for a device name in the OS namespace.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::AlreadyExists`] if the alias collides with
    /// an existing namespace entry.
    fn create_symbolic_link(&self, link: &str, target: &str) -> Result<(), DriverError>;

    /// Removes a symbolic alias registered by
    /// [`create_symbolic_link`](Self::create_symbolic_link).
    fn delete_symbolic_link(&self, link: &str);

    /// Registers the driver as a named event-trace provider.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] if registration with the trace facility
    /// fails.
    fn register_trace_provider(&self, name: &str) -> Result<ProviderHandle, DriverError>;

    /// Unregisters a trace provider registered by
    /// [`register_trace_provider`](Self::register_trace_provider).
    fn unregister_trace_provider(&self, provider: ProviderHandle);

    /// Emits a diagnostic event through a registered provider.
    ///
    /// Fire-and-forget: emission never blocks the caller and has no
    /// failure visible to the driver.
    fn emit_trace_event(&self, provider: ProviderHandle, event: &TraceEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_round_trip_raw_values() {
        assert_eq!(DriverHandle::new(7).raw(), 7);
        assert_eq!(DeviceHandle::new(42).raw(), 42);
        assert_eq!(ProviderHandle::new(u64::MAX).raw(), u64::MAX);
    }

    #[test]
    fn handles_compare_by_value() {
        assert_eq!(DeviceHandle::new(1), DeviceHandle::new(1));
        assert_ne!(DeviceHandle::new(1), DeviceHandle::new(2));
    }
}
