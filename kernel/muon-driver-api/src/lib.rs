//! Driver model types and traits for the muon driver core.
//!
//! This crate defines the vocabulary shared by the platform and the
//! drivers built on it:
//!
//! - **Errors** -- [`DriverError`], the closed failure taxonomy every
//!   fallible driver operation reports through.
//! - **Requests** -- [`Request`] and [`Completion`], the unit of work the
//!   platform delivers to a driver and the record the driver must fill in
//!   exactly once.
//! - **Device identity** -- [`BusClass`] and [`DeviceInit`], the
//!   arrival-time handle a driver inspects before a device object exists.
//! - **Platform services** -- [`PlatformServices`], the boundary through
//!   which drivers create OS-visible resources and emit trace events.

#![cfg_attr(not(test), no_std)]

pub mod device;
pub mod error;
pub mod platform;
pub mod request;
pub mod trace;

// Re-export all public types at the crate root for ergonomic imports.
pub use device::{BusClass, DeviceFlags, DeviceInit, DeviceProperty, ENUMERATOR_NAME_MAX};
pub use error::DriverError;
pub use platform::{DeviceHandle, DriverHandle, PlatformServices, ProviderHandle};
pub use request::{Completion, Operation, Request, RequestContext, RequestContextKind, TransferContext};
pub use trace::{BoundedName, TraceEvent, DEVICE_NAME_MAX};
