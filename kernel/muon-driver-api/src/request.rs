//! Platform-delivered requests and their completion discipline.
//!
//! A [`Request`] is one unit of work handed to a driver: an open, a close,
//! or a device-control operation. The platform owns the request; the driver
//! inspects it, acts, and records exactly one [`Completion`] before
//! returning control. A request that is never completed leaves the calling
//! thread blocked forever, so every dispatch path must end at
//! [`Request::complete`].
//!
//! Per-request state machine: `Received → Validated → Executed → Completed`.
//! `Completed` is terminal; completing a request twice is a driver bug and
//! panics rather than corrupting the caller's completion record.

use crate::error::DriverError;

/// The kind of work a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Open a handle to the device. Carries no buffers.
    Create,
    /// Close a handle to the device. Carries no buffers.
    Close,
    /// A device-control (IOCTL) operation.
    DeviceControl {
        /// Numeric command code selecting the action.
        code: u32,
        /// Capacity of the caller's output buffer, in bytes.
        output_capacity: usize,
    },
}

/// The completion record reported back to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Final status of the request.
    pub status: Result<(), DriverError>,
    /// Number of bytes produced into the caller's output buffer.
    ///
    /// Never exceeds the request's declared output capacity.
    pub bytes: usize,
}

/// Zero-initialized per-request payload used by transfer-capable devices.
///
/// Attached at device-arrival time via [`RequestContextKind::Transfer`];
/// the bus-specific handler that claimed the device fills it in as the
/// request progresses. Sizing and zeroing are the driver's responsibility,
/// not the platform's.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransferContext {
    /// Total transfer length in bytes.
    pub length: usize,
    /// Bytes transferred so far.
    pub transferred: usize,
}

impl TransferContext {
    /// Returns a zero-initialized transfer context.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            length: 0,
            transferred: 0,
        }
    }
}

/// Driver-defined payload carried by a request.
///
/// The same request structure carries different payloads depending on which
/// device kind claimed the instance, so the payload is a closed tagged
/// union rather than an implicit platform-maintained association.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RequestContext {
    /// No per-request payload.
    #[default]
    None,
    /// Transfer bookkeeping for DMA-capable paths.
    Transfer(TransferContext),
}

/// Names a [`RequestContext`] variant to attach to future requests.
///
/// Selected once at device-arrival time and instantiated (zeroed) for every
/// request subsequently delivered to that device instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestContextKind {
    /// Attach no payload.
    None,
    /// Attach a zeroed [`TransferContext`].
    Transfer,
}

impl RequestContextKind {
    /// Produces the zero-initialized context this kind names.
    #[must_use]
    pub const fn instantiate(self) -> RequestContext {
        match self {
            Self::None => RequestContext::None,
            Self::Transfer => RequestContext::Transfer(TransferContext::zeroed()),
        }
    }
}

/// One platform-delivered unit of work.
///
/// Created by the platform, handed to the driver's dispatch entry point,
/// completed exactly once, and never retained by the driver past
/// completion.
#[derive(Debug)]
pub struct Request {
    operation: Operation,
    context: RequestContext,
    completion: Option<Completion>,
}

impl Request {
    /// Creates a request with no per-request context attached.
    #[must_use]
    pub const fn new(operation: Operation) -> Self {
        Self {
            operation,
            context: RequestContext::None,
            completion: None,
        }
    }

    /// Creates a request carrying the given per-request context.
    #[must_use]
    pub const fn with_context(operation: Operation, context: RequestContext) -> Self {
        Self {
            operation,
            context,
            completion: None,
        }
    }

    /// Returns the operation this request asks for.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the caller-declared output buffer capacity in bytes.
    ///
    /// Open and close requests carry no buffers and report 0.
    #[must_use]
    pub const fn output_capacity(&self) -> usize {
        match self.operation {
            Operation::Create | Operation::Close => 0,
            Operation::DeviceControl {
                output_capacity, ..
            } => output_capacity,
        }
    }

    /// Returns the attached per-request context.
    #[must_use]
    pub const fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Returns the attached per-request context for mutation.
    pub fn context_mut(&mut self) -> &mut RequestContext {
        &mut self.context
    }

    /// Returns `true` once the request has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    /// Returns the recorded completion, if any.
    #[must_use]
    pub const fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    /// Records the final status and byte count, releasing the caller.
    ///
    /// The byte count is clamped to the declared output capacity so a
    /// handler can never claim more output than the caller's buffer holds.
    ///
    /// # Panics
    ///
    /// Panics if the request was already completed. Completion is terminal;
    /// a second completion would corrupt the caller-owned record.
    pub fn complete(&mut self, status: Result<(), DriverError>, bytes: usize) {
        assert!(
            self.completion.is_none(),
            "request completed twice (operation {:?})",
            self.operation
        );
        self.completion = Some(Completion {
            status,
            bytes: bytes.min(self.output_capacity()),
        });
    }
}
