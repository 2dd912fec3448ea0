//! The handler registry and dispatch router.
//!
//! The registry is the one owner of every registered handler and its
//! bookkeeping. It is responsible for:
//! - pairing each handler with its state machine under one [`HandlerId`],
//! - holding authoritative per-descriptor interest,
//! - routing readiness events from an external poller to the right callback.
//!
//! It is single-threaded and performs no I/O. The poller driving it either
//! installs an [`InterestObserver`](crate::InterestObserver) or scans
//! [`Registry::watched`] to learn which descriptors to watch, then calls the
//! `handle_*` entry points for whatever became ready.
//!
//! [`HandlerId`]: crate::HandlerId

mod builder;
mod context;
mod core;
mod dispatch;

pub use builder::RegistryBuilder;
pub use context::Context;
pub use self::core::Registry;
