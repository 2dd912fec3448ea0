//! Per-handler and per-descriptor bookkeeping.
//!
//! A [`HandlerSm`] exists for every registered handler and owns one
//! [`DescriptorSm`] for every descriptor that handler currently has any
//! interest in. Descriptor state machines are created on first interest and
//! dropped as soon as their last flag clears.

mod descriptor;
mod handler;

pub use descriptor::DescriptorSm;
pub(crate) use handler::HandlerSm;
