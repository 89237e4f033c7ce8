//! The trace-control device.
//!
//! A minimal control-style device exposing a synchronous command interface
//! to user-mode callers. Three request kinds flow through
//! [`TraceControlDevice::dispatch`]: open, close, and device-control.
//! Device-control commands are resolved through a fixed table keyed by
//! command code; the one recognized command emits a sample diagnostic
//! event. Every request is completed exactly once before dispatch returns,
//! on every path.
//!
//! Open and close create and destroy no state: this device has no
//! exclusive-access requirement, so there is no handle table and no
//! reference counting.

use muon_driver_api::{
    BoundedName, DeviceFlags, DeviceHandle, DriverError, Operation, PlatformServices,
    ProviderHandle, Request, TraceEvent,
};

use crate::lifecycle::{Resource, ResourceStack};

/// Name of the device object.
pub const DEVICE_NAME: &str = "trace-ctl";

/// Symbolic alias under which user-mode callers open the device.
pub const SYMLINK_NAME: &str = "TRACECTL";

/// Name the driver registers under with the trace facility.
pub const PROVIDER_NAME: &str = "muon-trace-ctl";

/// Command code: emit one sample diagnostic event, return no data.
pub const IOCTL_EMIT_SAMPLE_EVENT: u32 = 0x0022_2000;

/// One entry in the fixed device-control command table.
struct IoctlEntry {
    code: u32,
    name: &'static str,
    handler: fn(&TraceControlDevice, &dyn PlatformServices) -> Result<(), DriverError>,
}

/// The closed set of commands this device recognizes. Codes outside the
/// table complete with [`DriverError::InvalidParameter`].
const IOCTL_TABLE: &[IoctlEntry] = &[IoctlEntry {
    code: IOCTL_EMIT_SAMPLE_EVENT,
    name: "emit-sample-event",
    handler: emit_sample_event,
}];

fn emit_sample_event(
    device: &TraceControlDevice,
    os: &dyn PlatformServices,
) -> Result<(), DriverError> {
    os.emit_trace_event(device.provider, &TraceEvent::Sample);
    Ok(())
}

/// A loaded trace-control device instance.
///
/// Holds the OS-visible resources acquired at load time; the set is
/// created once and only read by request dispatch. No cross-request state
/// exists beyond this object.
#[derive(Debug)]
pub struct TraceControlDevice {
    device: DeviceHandle,
    provider: ProviderHandle,
    resources: ResourceStack,
}

impl TraceControlDevice {
    /// Acquires the device's OS-visible resources in order: device object,
    /// symbolic alias, trace-provider registration. Finishes by emitting a
    /// startup diagnostic event.
    ///
    /// # Errors
    ///
    /// Returns the failing step's error. Every resource acquired before
    /// the failing step has been released, in reverse order, before this
    /// returns: a failed load leaves no partial device registered.
    pub fn load(os: &dyn PlatformServices) -> Result<Self, DriverError> {
        let mut resources = ResourceStack::new();

        let device = match os.create_device(DEVICE_NAME, DeviceFlags::BUFFERED_IO) {
            Ok(device) => device,
            Err(err) => {
                log::error!("tracectl: device object creation failed: {err}");
                return Err(err);
            }
        };
        resources.push(Resource::Device(device));

        if let Err(err) = os.create_symbolic_link(SYMLINK_NAME, DEVICE_NAME) {
            log::error!("tracectl: symbolic link registration failed: {err}");
            resources.release_all(os);
            return Err(err);
        }
        resources.push(Resource::SymbolicLink(SYMLINK_NAME));

        let provider = match os.register_trace_provider(PROVIDER_NAME) {
            Ok(provider) => provider,
            Err(err) => {
                log::error!("tracectl: trace provider registration failed: {err}");
                resources.release_all(os);
                return Err(err);
            }
        };
        resources.push(Resource::TraceProvider(provider));

        os.emit_trace_event(
            provider,
            &TraceEvent::Start {
                device_name: BoundedName::new(DEVICE_NAME),
                status: Ok(()),
            },
        );
        log::info!("tracectl: device '{DEVICE_NAME}' loaded");

        Ok(Self {
            device,
            provider,
            resources,
        })
    }

    /// Tears the device down in exact reverse order of acquisition.
    ///
    /// Emits the shutdown diagnostic event first — the provider must still
    /// be registered while events are emitted — then unregisters the
    /// provider, removes the symbolic alias, and deletes the device
    /// object.
    pub fn unload(mut self, os: &dyn PlatformServices) {
        log::info!("tracectl: unloading device '{DEVICE_NAME}'");
        os.emit_trace_event(
            self.provider,
            &TraceEvent::Unload {
                device_name: BoundedName::new(DEVICE_NAME),
            },
        );
        self.resources.release_all(os);
    }

    /// Returns the handle of the device object.
    #[must_use]
    pub const fn device(&self) -> DeviceHandle {
        self.device
    }

    /// Returns the trace-provider registration handle.
    #[must_use]
    pub const fn provider(&self) -> ProviderHandle {
        self.provider
    }

    /// Executes the correct handler for a request and completes it.
    ///
    /// The single exit point is the completion call: open and close always
    /// succeed with zero bytes; device-control resolves the command code
    /// against the fixed table, an unrecognized code completes with
    /// [`DriverError::InvalidParameter`], and a handler's internal fault
    /// degrades to the same — never to an uncompleted request.
    pub fn dispatch(&self, os: &dyn PlatformServices, request: &mut Request) {
        self.dispatch_with_table(os, IOCTL_TABLE, request);
    }

    fn dispatch_with_table(
        &self,
        os: &dyn PlatformServices,
        table: &[IoctlEntry],
        request: &mut Request,
    ) {
        let status = match request.operation() {
            Operation::Create | Operation::Close => Ok(()),
            Operation::DeviceControl { code, .. } => {
                match table.iter().find(|entry| entry.code == code) {
                    Some(entry) => match (entry.handler)(self, os) {
                        Ok(()) => Ok(()),
                        Err(err) => {
                            log::warn!("tracectl: command '{}' failed: {err}", entry.name);
                            Err(DriverError::InvalidParameter)
                        }
                    },
                    None => {
                        log::warn!("tracectl: unrecognized command code {code:#x}");
                        Err(DriverError::InvalidParameter)
                    }
                }
            }
        };
        // Every command returns no data; the byte count is zero on success
        // and failure alike.
        request.complete(status, 0);
    }
}
