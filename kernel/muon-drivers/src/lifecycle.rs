//! Ordered acquire/release tracking for OS-visible resources.
//!
//! Driver setup acquires a strictly ordered sequence of platform resources
//! (device object, symbolic alias, trace-provider registration). For every
//! successful acquisition there is exactly one matching release, executed
//! in strict reverse order — on the normal unload path and on every
//! early-failure path during setup. [`ResourceStack`] makes that shape
//! explicit: push each resource as it is acquired, and a single
//! [`release_all`](ResourceStack::release_all) call unwinds whatever prefix
//! exists.

use alloc::vec::Vec;

use muon_driver_api::{DeviceHandle, PlatformServices, ProviderHandle};

/// One acquired OS-visible resource, paired with its release operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A created device object.
    Device(DeviceHandle),
    /// A registered symbolic alias in the OS namespace.
    SymbolicLink(&'static str),
    /// A trace-provider registration.
    TraceProvider(ProviderHandle),
}

/// A LIFO stack of acquired resources.
///
/// Exclusively owned by the driver instance that created the resources;
/// created once at startup and read (never mutated) by request callbacks.
#[derive(Debug, Default)]
pub struct ResourceStack {
    resources: Vec<Resource>,
}

impl ResourceStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resources: Vec::new(),
        }
    }

    /// Records a freshly acquired resource on top of the stack.
    pub fn push(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Returns the number of live resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if no resources are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Releases every held resource in reverse order of acquisition.
    ///
    /// Usable from both the normal unload path and any mid-setup failure
    /// path; releasing an empty stack is a no-op. The stack is empty when
    /// this returns.
    pub fn release_all(&mut self, os: &dyn PlatformServices) {
        while let Some(resource) = self.resources.pop() {
            match resource {
                Resource::TraceProvider(provider) => {
                    log::info!("lifecycle: unregistering trace provider");
                    os.unregister_trace_provider(provider);
                }
                Resource::SymbolicLink(link) => {
                    log::info!("lifecycle: removing symbolic link '{link}'");
                    os.delete_symbolic_link(link);
                }
                Resource::Device(device) => {
                    log::info!("lifecycle: deleting device object");
                    os.delete_device(device);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakePlatform, Op};
    use muon_driver_api::{DeviceFlags, DriverError};

    #[test]
    fn release_all_on_empty_stack_is_a_no_op() {
        let os = FakePlatform::new();
        let mut stack = ResourceStack::new();
        stack.release_all(&os);
        assert!(os.ops().is_empty());
        assert!(stack.is_empty());
    }

    #[test]
    fn release_order_is_reverse_of_acquisition() -> Result<(), DriverError> {
        let os = FakePlatform::new();
        let device = os.create_device("dev0", DeviceFlags::empty())?;
        os.create_symbolic_link("link0", "dev0")?;
        let provider = os.register_trace_provider("prov0")?;

        let mut stack = ResourceStack::new();
        stack.push(Resource::Device(device));
        stack.push(Resource::SymbolicLink("link0"));
        stack.push(Resource::TraceProvider(provider));
        assert_eq!(stack.len(), 3);

        stack.release_all(&os);
        assert!(stack.is_empty());
        assert!(os.live().is_empty());

        let release_ops: Vec<Op> = os.ops().into_iter().skip(3).collect();
        assert_eq!(
            release_ops,
            vec![
                Op::UnregisterProvider(provider),
                Op::DeleteLink("link0".into()),
                Op::DeleteDevice(device),
            ]
        );
        Ok(())
    }

    #[test]
    fn partial_stack_releases_only_acquired_prefix() -> Result<(), DriverError> {
        let os = FakePlatform::new();
        let device = os.create_device("dev0", DeviceFlags::empty())?;
        os.create_symbolic_link("link0", "dev0")?;

        let mut stack = ResourceStack::new();
        stack.push(Resource::Device(device));
        stack.push(Resource::SymbolicLink("link0"));
        stack.release_all(&os);

        assert!(os.live().is_empty());
        let release_ops: Vec<Op> = os.ops().into_iter().skip(2).collect();
        assert_eq!(
            release_ops,
            vec![Op::DeleteLink("link0".into()), Op::DeleteDevice(device)]
        );
        Ok(())
    }
}
