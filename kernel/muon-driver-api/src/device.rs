//! Device identity and arrival-time initialization types.

use bitflags::bitflags;

use crate::error::DriverError;
use crate::request::RequestContextKind;

/// Maximum length in bytes of an enumerator-name property read.
pub const ENUMERATOR_NAME_MAX: usize = 64;

/// The enumeration class that reported a device's presence.
///
/// A closed set: one driver binary services both the PCI-attached variant
/// of the hardware and the root-enumerated (manually installed) legacy
/// variant, and every arriving device resolves to exactly one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusClass {
    /// Enumerated by the PCI bus driver.
    Pci,
    /// Root-enumerated legacy device (manually installed, no PnP bus).
    Root,
}

impl BusClass {
    /// Resolves an enumerator-name property value to a bus class.
    ///
    /// Comparison is case-insensitive and exact; class names are mutually
    /// exclusive so at most one can match. Returns `None` for any name
    /// outside the known set — the caller decides whether that is fatal.
    #[must_use]
    pub fn from_enumerator(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("PCI") {
            Some(Self::Pci)
        } else if name.eq_ignore_ascii_case("Root") {
            Some(Self::Root)
        } else {
            None
        }
    }
}

impl core::fmt::Display for BusClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pci => f.write_str("PCI"),
            Self::Root => f.write_str("Root"),
        }
    }
}

/// Properties a driver may query from a not-yet-finalized device handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceProperty {
    /// Name of the enumerator that reported the device (e.g. "PCI").
    EnumeratorName,
}

bitflags! {
    /// Flags applied when creating a device object.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DeviceFlags: u32 {
        /// Requests are delivered with platform-buffered I/O.
        const BUFFERED_IO = 1 << 0;
    }
}

/// The opaque, platform-owned handle delivered on device arrival.
///
/// Represents a device that has not yet been finalized into a live device
/// object: the driver may query identifying properties and declare the
/// per-request context type before handing the device to a bus-specific
/// initializer, which owns the rest of its lifecycle.
pub trait DeviceInit {
    /// Reads a bounded string property into `buf`.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::BufferTooSmall`] if the value does not fit,
    /// or the platform's own failure for a property that cannot be read.
    fn query_property(
        &self,
        property: DeviceProperty,
        buf: &mut [u8],
    ) -> Result<usize, DriverError>;

    /// Declares the per-request context attached to every future request
    /// delivered to this device instance.
    fn set_request_context(&mut self, kind: RequestContextKind);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerator_match_is_case_insensitive() {
        assert_eq!(BusClass::from_enumerator("PCI"), Some(BusClass::Pci));
        assert_eq!(BusClass::from_enumerator("pci"), Some(BusClass::Pci));
        assert_eq!(BusClass::from_enumerator("Pci"), Some(BusClass::Pci));
        assert_eq!(BusClass::from_enumerator("Root"), Some(BusClass::Root));
        assert_eq!(BusClass::from_enumerator("ROOT"), Some(BusClass::Root));
    }

    #[test]
    fn unknown_enumerator_matches_nothing() {
        assert_eq!(BusClass::from_enumerator("USB"), None);
        assert_eq!(BusClass::from_enumerator(""), None);
        assert_eq!(BusClass::from_enumerator("PCIe"), None);
        assert_eq!(BusClass::from_enumerator("Roo"), None);
    }

    #[test]
    fn display_names_match_known_classes() {
        assert_eq!(format!("{}", BusClass::Pci), "PCI");
        assert_eq!(format!("{}", BusClass::Root), "Root");
    }
}
