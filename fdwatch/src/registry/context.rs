use super::Registry;
use crate::handle::HandlerId;
use crate::interest::{Condition, Interest};

use std::os::fd::RawFd;

/// What a handler can reach from inside one of its callbacks.
///
/// A `Context` borrows the registry for the duration of the callback, so the
/// handler may change its own interest, register or unregister other
/// handlers, or unregister itself. Every call re-resolves state in the
/// registry; nothing is cached across calls.
pub struct Context<'a> {
    registry: &'a mut Registry,
    id: HandlerId,
}

impl<'a> Context<'a> {
    pub(crate) fn new(registry: &'a mut Registry, id: HandlerId) -> Self {
        Self { registry, id }
    }

    /// The id of the handler being dispatched to.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// See [`Registry::set_read_interest`].
    pub fn set_read_interest(&mut self, fd: RawFd, interest: bool) {
        self.registry.set_interest(self.id, fd, Condition::Readable, interest);
    }

    /// See [`Registry::set_write_interest`].
    pub fn set_write_interest(&mut self, fd: RawFd, interest: bool) {
        self.registry.set_interest(self.id, fd, Condition::Writable, interest);
    }

    /// See [`Registry::set_exception_interest`].
    pub fn set_exception_interest(&mut self, fd: RawFd, interest: bool) {
        self.registry.set_interest(self.id, fd, Condition::Exception, interest);
    }

    /// Current interest of this handler in `fd`, if it has any.
    pub fn interest(&self, fd: RawFd) -> Option<Interest> {
        self.registry.interest(self.id, fd)
    }

    /// Unregisters the handler being dispatched to.
    ///
    /// The handler object is dropped once the running callback returns.
    /// Interest calls made through this context afterwards are contract
    /// violations.
    pub fn unregister(&mut self) {
        self.registry.unregister(self.id);
    }

    /// The whole registry, for acting on other handlers.
    pub fn registry(&mut self) -> &mut Registry {
        &mut *self.registry
    }
}
