use super::{Context, Registry};
use crate::error::{ContractViolation, violation};
use crate::handle::{DescriptorKey, HandlerId};
use crate::handler::FdHandler;
use crate::interest::Condition;

use std::panic::{self, AssertUnwindSafe};

impl Registry {
    /// Delivers a readable event for `key` to its handler's
    /// [`on_readable`](FdHandler::on_readable).
    ///
    /// # Panics
    ///
    /// Panics if `key` does not address a live descriptor state, or if its
    /// handler is already inside one of its callbacks.
    #[track_caller]
    pub fn handle_readable(&mut self, key: DescriptorKey) {
        self.dispatch(key, Condition::Readable);
    }

    /// Delivers a writable event for `key` to its handler's
    /// [`on_writable`](FdHandler::on_writable).
    ///
    /// # Panics
    ///
    /// Same as [`handle_readable`](Self::handle_readable).
    #[track_caller]
    pub fn handle_writable(&mut self, key: DescriptorKey) {
        self.dispatch(key, Condition::Writable);
    }

    /// Delivers a pending exception for `key` to its handler's
    /// [`on_exception`](FdHandler::on_exception).
    ///
    /// # Panics
    ///
    /// Same as [`handle_readable`](Self::handle_readable).
    #[track_caller]
    pub fn handle_exception_pending(&mut self, key: DescriptorKey) {
        self.dispatch(key, Condition::Exception);
    }

    /// Delivers `condition` for `key` to the owning handler.
    ///
    /// The handler is checked out of its slot for the duration of the
    /// callback, which receives the registry through a [`Context`]. If the
    /// callback unregistered the handler, the handler is dropped instead of
    /// being checked back in.
    ///
    /// The interest flag for `condition` is not consulted and nothing is
    /// cleared afterwards: if the condition persists and interest is still
    /// set, the poller is expected to dispatch again on its next cycle.
    ///
    /// A panic in the callback is propagated after the handler has been
    /// checked back in, so the handler and its descriptor states stay paired.
    ///
    /// # Panics
    ///
    /// Same as [`handle_readable`](Self::handle_readable).
    #[track_caller]
    pub fn dispatch(&mut self, key: DescriptorKey, condition: Condition) {
        let mut handler = self.check_out(key);

        tracing::trace!(
            target: "fdwatch",
            handler = %key.handler,
            fd = key.fd,
            %condition,
            "dispatch"
        );

        // The handler goes back into its slot even if the callback unwinds.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut cx = Context::new(&mut *self, key.handler);
            match condition {
                Condition::Readable => handler.on_readable(&mut cx, key.fd),
                Condition::Writable => handler.on_writable(&mut cx, key.fd),
                Condition::Exception => handler.on_exception(&mut cx, key.fd),
            }
        }));

        self.check_in(key.handler, handler);

        if let Err(payload) = outcome {
            tracing::warn!(
                target: "fdwatch",
                handler = %key.handler,
                fd = key.fd,
                %condition,
                "callback panicked"
            );
            panic::resume_unwind(payload);
        }
    }

    /// Returns `true` if a dispatch to `key` would reach a handler.
    ///
    /// Pollers delivering a batch of events use this to skip events whose
    /// target was removed by an earlier callback in the same batch.
    pub fn is_dispatchable(&self, key: DescriptorKey) -> bool {
        self.slots
            .get(key.handler.index(), key.handler.generation())
            .is_some_and(|slot| slot.handler.is_some() && slot.sm.descriptor(key.fd).is_some())
    }

    /// Resolves the descriptor state, then its owner, and takes the owner's
    /// handler out of its slot.
    #[track_caller]
    fn check_out(&mut self, key: DescriptorKey) -> Box<dyn FdHandler> {
        let slot = self.resolve_mut(key.handler);

        let Some(descriptor) = slot.sm.descriptor(key.fd) else {
            violation(ContractViolation::MissingDescriptor(key));
        };
        debug_assert_eq!(descriptor.owner(), slot.sm.id());

        match slot.handler.take() {
            Some(handler) => handler,
            None => violation(ContractViolation::HandlerBusy(key.handler)),
        }
    }

    fn check_in(&mut self, id: HandlerId, handler: Box<dyn FdHandler>) {
        match self.slots.get_mut(id.index(), id.generation()) {
            Some(slot) => {
                debug_assert!(slot.handler.is_none(), "handler slot refilled during dispatch");
                slot.handler = Some(handler);
            }
            None => {
                tracing::debug!(
                    target: "fdwatch",
                    handler = %id,
                    "handler unregistered during its own callback"
                );
            }
        }
    }
}
