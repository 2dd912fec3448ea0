//! # fdwatch
//!
//! **fdwatch** is the registration and dispatch layer that sits between client
//! code wanting file-descriptor readiness callbacks and whatever poller
//! actually watches the descriptors (epoll, kqueue, `poll(2)`, an agent's
//! event loop).
//!
//! It does not poll anything itself. It keeps the authoritative record of
//! which handler wants which descriptor for which condition, and it turns a
//! poller's "this descriptor is ready" into a call on the right handler:
//!
//! - **Handlers** implement [`FdHandler`] and are moved into a [`Registry`],
//!   which hands back a generational [`HandlerId`]
//! - **Interest** is declared per `(handler, fd)` for three independent
//!   conditions: readable, writable and exception
//! - **Descriptor state** exists exactly while at least one flag is set; the
//!   last flag clearing removes it on the spot
//! - **Dispatch** goes through [`Registry::handle_readable`],
//!   [`Registry::handle_writable`] and [`Registry::handle_exception_pending`]
//!
//! Callbacks receive a [`Context`] and may change interest, register or
//! unregister handlers, or unregister themselves while they run.
//!
//! ## Quick Start
//!
//! ```rust
//! use fdwatch::{Context, DescriptorKey, FdHandler, Registry};
//! use std::os::fd::RawFd;
//!
//! struct OneShot;
//!
//! impl FdHandler for OneShot {
//!     fn on_readable(&mut self, cx: &mut Context<'_>, fd: RawFd) {
//!         cx.set_read_interest(fd, false);
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! let id = registry.register(OneShot);
//! registry.set_read_interest(id, 5, true);
//!
//! // The poller saw fd 5 become readable.
//! registry.handle_readable(DescriptorKey::new(id, 5));
//!
//! assert!(registry.interest(id, 5).is_none());
//! ```
//!
//! ## Threading
//!
//! A registry is single-threaded: every registration, interest change and
//! dispatch happens on the thread that owns it. It is neither `Send` nor
//! `Sync`.
//!
//! ## Contract violations
//!
//! Operations never return errors. Using an id that is not registered or
//! dispatching to a descriptor that is not tracked panics with a
//! [`ContractViolation`] message.

mod error;
mod handle;
mod handler;
mod interest;
mod state;
mod utils;

pub mod registry;

pub use error::ContractViolation;
pub use handle::{DescriptorKey, HandlerId};
pub use handler::FdHandler;
pub use interest::{Condition, Interest, InterestObserver};
pub use registry::{Context, Registry, RegistryBuilder};
pub use state::DescriptorSm;
