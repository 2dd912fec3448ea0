//! Contract violations.
//!
//! Nothing in this crate fails at runtime in a recoverable way: an operation
//! either succeeds or the caller broke the registration contract. Violations
//! are described by [`ContractViolation`] and escalated through
//! [`violation`], which logs and panics. They are never returned to the
//! client as values.

use crate::handle::{DescriptorKey, HandlerId};

use thiserror::Error;

/// A broken invariant of the handler registry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("unknown handler: {0} is not registered")]
    UnknownHandler(HandlerId),

    #[error("missing descriptor state: {0} is not tracked")]
    MissingDescriptor(DescriptorKey),

    #[error("handler busy: {0} is already being dispatched to")]
    HandlerBusy(HandlerId),

    #[error("handler slots exhausted")]
    SlotsExhausted,
}

/// Escalates a contract violation.
///
/// # Panics
///
/// Always.
#[track_caller]
#[cold]
pub(crate) fn violation(v: ContractViolation) -> ! {
    tracing::error!(target: "fdwatch", violation = %v, "registry contract violated");
    panic!("{v}");
}
