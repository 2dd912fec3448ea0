use crate::registry::Context;

use std::os::fd::RawFd;

/// Something that wants descriptor readiness notifications.
///
/// Handlers are moved into a [`Registry`](crate::Registry) with
/// [`register`](crate::Registry::register) and live until they are
/// [`unregister`](crate::Registry::unregister)ed. Interest is declared per
/// descriptor through the registry or, from inside a callback, through the
/// [`Context`] passed to it.
///
/// Every callback defaults to doing nothing, so a handler only implements
/// the conditions it asks for.
///
/// # Examples
///
/// ```rust
/// use fdwatch::{Context, FdHandler, Registry};
/// use std::os::fd::RawFd;
///
/// struct Drain;
///
/// impl FdHandler for Drain {
///     fn on_readable(&mut self, cx: &mut Context<'_>, fd: RawFd) {
///         // Read until EAGAIN, then stop watching.
///         cx.set_read_interest(fd, false);
///     }
/// }
///
/// let mut registry = Registry::new();
/// let id = registry.register(Drain);
/// registry.set_read_interest(id, 5, true);
/// ```
pub trait FdHandler {
    /// The descriptor became readable.
    fn on_readable(&mut self, cx: &mut Context<'_>, fd: RawFd) {
        let _ = (cx, fd);
    }

    /// The descriptor became writable.
    fn on_writable(&mut self, cx: &mut Context<'_>, fd: RawFd) {
        let _ = (cx, fd);
    }

    /// An exceptional condition is pending on the descriptor.
    fn on_exception(&mut self, cx: &mut Context<'_>, fd: RawFd) {
        let _ = (cx, fd);
    }
}
