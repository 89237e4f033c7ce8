//! Recording fake platform shared by the driver tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use muon_driver_api::{
    DeviceFlags, DeviceHandle, DriverError, PlatformServices, ProviderHandle, TraceEvent,
};

/// Names an acquisition step for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Device,
    SymbolicLink,
    TraceProvider,
}

/// One platform call, as recorded in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    CreateDevice(String),
    DeleteDevice(DeviceHandle),
    CreateLink(String, String),
    DeleteLink(String),
    RegisterProvider(String),
    UnregisterProvider(ProviderHandle),
    Emit(TraceEvent),
}

/// A currently live OS-visible resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Live {
    Device(DeviceHandle),
    Link(String),
    Provider(ProviderHandle),
}

/// Fake platform that logs every call and tracks live resources.
///
/// Releasing a resource that is not live panics, which catches both
/// double-release and release-without-acquire in tests.
pub struct FakePlatform {
    fail_at: Option<Step>,
    ops: Mutex<Vec<Op>>,
    live: Mutex<Vec<Live>>,
    next_handle: AtomicU64,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            fail_at: None,
            ops: Mutex::new(Vec::new()),
            live: Mutex::new(Vec::new()),
            next_handle: AtomicU64::new(1),
        }
    }

    /// Returns a platform whose given acquisition step fails with
    /// [`DriverError::InitFailed`], leaving no partial resource behind.
    pub fn failing_at(step: Step) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::new()
        }
    }

    /// Returns every recorded platform call in order.
    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    /// Returns the currently live resources in acquisition order.
    pub fn live(&self) -> Vec<Live> {
        self.live.lock().unwrap().clone()
    }

    /// Returns every emitted trace event in order.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Emit(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: Op) {
        self.ops.lock().unwrap().push(op);
    }

    fn next_raw(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::Relaxed)
    }
}

impl PlatformServices for FakePlatform {
    fn create_device(
        &self,
        name: &str,
        _flags: DeviceFlags,
    ) -> Result<DeviceHandle, DriverError> {
        if self.fail_at == Some(Step::Device) {
            return Err(DriverError::InitFailed);
        }
        let handle = DeviceHandle::new(self.next_raw());
        self.record(Op::CreateDevice(name.into()));
        self.live.lock().unwrap().push(Live::Device(handle));
        Ok(handle)
    }

    fn delete_device(&self, device: DeviceHandle) {
        self.record(Op::DeleteDevice(device));
        let mut live = self.live.lock().unwrap();
        let index = live
            .iter()
            .position(|r| *r == Live::Device(device))
            .expect("deleting a device that is not live");
        live.remove(index);
    }

    fn create_symbolic_link(&self, link: &str, target: &str) -> Result<(), DriverError> {
        if self.fail_at == Some(Step::SymbolicLink) {
            return Err(DriverError::AlreadyExists);
        }
        self.record(Op::CreateLink(link.into(), target.into()));
        self.live.lock().unwrap().push(Live::Link(link.into()));
        Ok(())
    }

    fn delete_symbolic_link(&self, link: &str) {
        self.record(Op::DeleteLink(link.into()));
        let mut live = self.live.lock().unwrap();
        let index = live
            .iter()
            .position(|r| *r == Live::Link(link.into()))
            .expect("removing a symbolic link that is not live");
        live.remove(index);
    }

    fn register_trace_provider(&self, name: &str) -> Result<ProviderHandle, DriverError> {
        if self.fail_at == Some(Step::TraceProvider) {
            return Err(DriverError::InitFailed);
        }
        let handle = ProviderHandle::new(self.next_raw());
        self.record(Op::RegisterProvider(name.into()));
        self.live.lock().unwrap().push(Live::Provider(handle));
        Ok(handle)
    }

    fn unregister_trace_provider(&self, provider: ProviderHandle) {
        self.record(Op::UnregisterProvider(provider));
        let mut live = self.live.lock().unwrap();
        let index = live
            .iter()
            .position(|r| *r == Live::Provider(provider))
            .expect("unregistering a provider that is not live");
        live.remove(index);
    }

    fn emit_trace_event(&self, _provider: ProviderHandle, event: &TraceEvent) {
        self.record(Op::Emit(*event));
    }
}
