//! Device-identification routing.
//!
//! One driver binary services two physically different buses: the
//! PCI-attached variant of the hardware and the root-enumerated legacy
//! variant. On device arrival the platform hands over a not-yet-finalized
//! [`DeviceInit`] handle; [`route_device_add`] reads its enumerator-name
//! property, resolves it to a [`BusClass`], and forwards to exactly one of
//! the two bus-specific initializers. A device whose enumerator matches
//! neither class was bound to the wrong driver and is rejected outright —
//! the router never defaults to a handler.

use muon_driver_api::{
    BusClass, DeviceInit, DeviceProperty, DriverError, DriverHandle, RequestContextKind,
    ENUMERATOR_NAME_MAX,
};

/// A bus-specific device initializer.
///
/// The bodies are external collaborators: the router forwards the arrival
/// handle and returns the initializer's result unmodified.
pub trait AddDevice {
    /// Claims and finishes initializing an arriving device.
    ///
    /// # Errors
    ///
    /// Returns the initializer's own failure, surfaced to the platform
    /// unchanged.
    fn add_device(
        &self,
        driver: DriverHandle,
        init: &mut dyn DeviceInit,
    ) -> Result<(), DriverError>;
}

/// The closed pair of bus-specific initializers the router selects from.
pub struct BusHandlers<'a> {
    /// Handles devices enumerated by the PCI bus.
    pub pci: &'a dyn AddDevice,
    /// Handles root-enumerated legacy devices.
    pub root: &'a dyn AddDevice,
}

/// Routes a newly arrived device to the single matching bus initializer.
///
/// Reads the bounded enumerator-name property, attaches the per-request
/// transfer context the downstream path expects on every future request,
/// then dispatches on the resolved [`BusClass`]. No resource is allocated
/// by the router itself.
///
/// # Errors
///
/// - A property-read failure is propagated verbatim; nothing is dispatched.
/// - [`DriverError::ConfigurationError`] if the enumerator matches neither
///   known bus class; neither initializer is invoked.
/// - Otherwise, whatever the chosen initializer returns.
pub fn route_device_add(
    driver: DriverHandle,
    init: &mut dyn DeviceInit,
    handlers: &BusHandlers<'_>,
) -> Result<(), DriverError> {
    let mut name_buf = [0u8; ENUMERATOR_NAME_MAX];
    let len = init.query_property(DeviceProperty::EnumeratorName, &mut name_buf)?;
    let Ok(name) = core::str::from_utf8(&name_buf[..len]) else {
        log::error!("enumerator name property is not valid UTF-8");
        return Err(DriverError::ConfigurationError);
    };

    // Sizing and zeroing the per-request context is the driver's job, not
    // the platform's; attach it before either path can see a request.
    init.set_request_context(RequestContextKind::Transfer);

    let Some(class) = BusClass::from_enumerator(name) else {
        log::error!("router: no bus class matches enumerator '{name}'");
        return Err(DriverError::ConfigurationError);
    };
    log::info!("router: enumerator '{name}' -> {class} bus initializer");

    match class {
        BusClass::Pci => handlers.pci.add_device(driver, init),
        BusClass::Root => handlers.root.add_device(driver, init),
    }
}
