//! Drivers built on the muon driver model.
//!
//! Two independent components share the same request-lifecycle discipline:
//!
//! - [`router`] -- resolves a newly arrived device's enumeration class and
//!   forwards initialization to exactly one bus-specific initializer.
//! - [`tracectl`] -- a control-style device exposing a synchronous command
//!   interface: open/close/device-control dispatch through a fixed command
//!   table, every request completed exactly once.
//! - [`lifecycle`] -- the ordered acquire/release stack both paths use for
//!   OS-visible resources, correct on the happy path and on any
//!   prefix-failure path during setup.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod lifecycle;
pub mod router;
pub mod tracectl;

#[cfg(test)]
mod testutil;

pub use lifecycle::{Resource, ResourceStack};
pub use router::{AddDevice, BusHandlers, route_device_add};
pub use tracectl::{
    TraceControlDevice, DEVICE_NAME, IOCTL_EMIT_SAMPLE_EVENT, PROVIDER_NAME, SYMLINK_NAME,
};
