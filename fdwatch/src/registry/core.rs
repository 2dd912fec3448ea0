use crate::error::{ContractViolation, violation};
use crate::handle::{DescriptorKey, HandlerId};
use crate::handler::FdHandler;
use crate::interest::{Condition, Interest, InterestObserver};
use crate::state::{DescriptorSm, HandlerSm};
use crate::utils::Slab;

use std::os::fd::RawFd;

/// One registered handler and its state machine.
///
/// Both halves of the handler/state-machine mapping live in the same slot,
/// so they appear and disappear together.
pub(super) struct Slot {
    pub(super) sm: HandlerSm,

    /// `None` while the handler is checked out for a callback.
    pub(super) handler: Option<Box<dyn FdHandler>>,
}

/// The handler registry.
///
/// Owns every registered handler together with its [`DescriptorSm`]s and
/// routes readiness events to them. See the [module docs](crate::registry)
/// for how an external poller drives it.
///
/// All operations are synchronous and infallible from the caller's point of
/// view: misuse (an unknown [`HandlerId`], a dispatch to an untracked
/// descriptor) is a contract violation and panics.
pub struct Registry {
    /// Registered handlers indexed by [`HandlerId`].
    pub(super) slots: Slab<Slot>,

    /// Receiver of interest changes, if any.
    observer: Option<Box<dyn InterestObserver>>,
}

impl Registry {
    /// Creates a registry with the default configuration.
    ///
    /// Use [`RegistryBuilder`](super::RegistryBuilder) to size it or to
    /// install an [`InterestObserver`].
    pub fn new() -> Self {
        super::RegistryBuilder::new().build()
    }

    pub(super) fn with_config(capacity: usize, observer: Option<Box<dyn InterestObserver>>) -> Self {
        Self {
            slots: Slab::new(capacity),
            observer,
        }
    }

    /// Registers a handler and returns its id.
    ///
    /// The handler starts with no interest in any descriptor.
    pub fn register(&mut self, handler: impl FdHandler + 'static) -> HandlerId {
        self.register_boxed(Box::new(handler))
    }

    /// Like [`register`](Self::register), for an already boxed handler.
    pub fn register_boxed(&mut self, handler: Box<dyn FdHandler>) -> HandlerId {
        let key = self.slots.insert_with(|(index, generation)| Slot {
            sm: HandlerSm::new(HandlerId::new(index, generation)),
            handler: Some(handler),
        });

        let Some((index, generation)) = key else {
            violation(ContractViolation::SlotsExhausted);
        };

        let id = HandlerId::new(index, generation);
        tracing::debug!(target: "fdwatch", handler = %id, "handler registered");

        id
    }

    /// Unregisters a handler, dropping it and every descriptor state it owns.
    ///
    /// When called from inside the handler's own callback the handler object
    /// is dropped as soon as that callback returns.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered (including a second unregister of
    /// the same id).
    #[track_caller]
    pub fn unregister(&mut self, id: HandlerId) {
        let Some(mut slot) = self.slots.remove(id.index(), id.generation()) else {
            violation(ContractViolation::UnknownHandler(id));
        };

        debug_assert_eq!(slot.sm.id(), id);

        let descriptors = slot.sm.drain();
        for descriptor in &descriptors {
            self.notify(descriptor.key(), descriptor.interest(), Interest::NONE);
        }

        tracing::debug!(
            target: "fdwatch",
            handler = %id,
            descriptors = descriptors.len(),
            "handler unregistered"
        );
    }

    /// Returns `true` if `id` names a registered handler.
    pub fn contains(&self, id: HandlerId) -> bool {
        self.slots.get(id.index(), id.generation()).is_some()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.len() == 0
    }

    /// Mutable access to a registered handler.
    ///
    /// Returns `None` if `id` is not registered or if the handler is in the
    /// middle of one of its own callbacks.
    pub fn handler_mut(&mut self, id: HandlerId) -> Option<&mut (dyn FdHandler + 'static)> {
        self.slots
            .get_mut(id.index(), id.generation())?
            .handler
            .as_deref_mut()
    }

    /// Sets or clears read interest of handler `id` in `fd`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered.
    #[track_caller]
    pub fn set_read_interest(&mut self, id: HandlerId, fd: RawFd, interest: bool) {
        self.set_interest(id, fd, Condition::Readable, interest);
    }

    /// Sets or clears write interest of handler `id` in `fd`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered.
    #[track_caller]
    pub fn set_write_interest(&mut self, id: HandlerId, fd: RawFd, interest: bool) {
        self.set_interest(id, fd, Condition::Writable, interest);
    }

    /// Sets or clears exception interest of handler `id` in `fd`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered.
    #[track_caller]
    pub fn set_exception_interest(&mut self, id: HandlerId, fd: RawFd, interest: bool) {
        self.set_interest(id, fd, Condition::Exception, interest);
    }

    /// Sets or clears one interest flag of handler `id` in `fd`.
    ///
    /// The descriptor state is created on demand. Clearing a flag removes the
    /// descriptor state right away if no other flag is left set, so an
    /// all-clear descriptor state never outlives this call. Setting a flag to
    /// the value it already has changes nothing.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered.
    #[track_caller]
    pub fn set_interest(&mut self, id: HandlerId, fd: RawFd, condition: Condition, interest: bool) {
        let sm = &mut self.resolve_mut(id).sm;

        let descriptor = sm.descriptor_state(fd);
        let old = descriptor.set_interest(condition, interest);
        let mut new = descriptor.interest();

        tracing::trace!(
            target: "fdwatch",
            handler = %id,
            fd,
            %condition,
            interest,
            "interest set"
        );

        if !interest && sm.maybe_cleanup(fd).is_some() {
            new = Interest::NONE;
        }

        if old != new {
            self.notify(DescriptorKey::new(id, fd), old, new);
        }
    }

    /// Current interest of handler `id` in `fd`.
    ///
    /// Returns `None` if the handler is not registered or has no interest
    /// in `fd`.
    pub fn interest(&self, id: HandlerId, fd: RawFd) -> Option<Interest> {
        self.descriptor(DescriptorKey::new(id, fd))
            .map(DescriptorSm::interest)
    }

    /// The descriptor state addressed by `key`, if it exists.
    pub fn descriptor(&self, key: DescriptorKey) -> Option<&DescriptorSm> {
        self.slots
            .get(key.handler.index(), key.handler.generation())?
            .sm
            .descriptor(key.fd)
    }

    /// Every descriptor state owned by handler `id`, in descriptor order.
    ///
    /// Like [`interest`](Self::interest) and [`descriptor`](Self::descriptor),
    /// this is a read-only lookup: an id that is not registered simply owns
    /// nothing. Only mutation and dispatch treat unknown ids as violations.
    pub fn descriptors(&self, id: HandlerId) -> impl Iterator<Item = &DescriptorSm> {
        self.slots
            .get(id.index(), id.generation())
            .into_iter()
            .flat_map(|slot| slot.sm.descriptor_state_machines())
    }

    /// Every live descriptor state across all handlers, with its interest.
    ///
    /// This is the full watch set for pollers that resynchronize by scanning.
    pub fn watched(&self) -> impl Iterator<Item = (DescriptorKey, Interest)> + '_ {
        self.slots.iter().flat_map(|(_, slot)| {
            slot.sm
                .descriptor_state_machines()
                .map(|descriptor| (descriptor.key(), descriptor.interest()))
        })
    }

    /// Tears the registry down, unregistering every handler in turn.
    ///
    /// Unlike a plain drop, the observer sees every descriptor state go away.
    pub fn shutdown(mut self) {
        let keys = self.slots.keys();
        let count = keys.len();

        for (index, generation) in keys {
            self.unregister(HandlerId::new(index, generation));
        }

        tracing::debug!(target: "fdwatch", handlers = count, "registry shut down");
    }

    /// Resolves a registered handler's slot.
    #[track_caller]
    pub(super) fn resolve_mut(&mut self, id: HandlerId) -> &mut Slot {
        match self.slots.get_mut(id.index(), id.generation()) {
            Some(slot) => slot,
            None => violation(ContractViolation::UnknownHandler(id)),
        }
    }

    fn notify(&mut self, key: DescriptorKey, old: Interest, new: Interest) {
        if let Some(observer) = self.observer.as_mut() {
            observer.interest_changed(key, old, new);
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
