use crate::handle::{DescriptorKey, HandlerId};
use crate::interest::{Condition, Interest};

use std::os::fd::RawFd;

/// Interest bookkeeping for one descriptor of one handler.
///
/// Owned exclusively by the handler's state machine; the only way to reach
/// one from outside is a borrow through the [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorSm {
    fd: RawFd,
    owner: HandlerId,
    interest: Interest,
}

impl DescriptorSm {
    /// Starts with every interest flag cleared.
    pub(crate) fn new(owner: HandlerId, fd: RawFd) -> Self {
        Self {
            fd,
            owner,
            interest: Interest::NONE,
        }
    }

    pub fn fd(&self) -> RawFd {
        self.fd
    }

    /// The handler this state machine routes dispatches to.
    pub fn owner(&self) -> HandlerId {
        self.owner
    }

    pub fn key(&self) -> DescriptorKey {
        DescriptorKey::new(self.owner, self.fd)
    }

    pub fn interest(&self) -> Interest {
        self.interest
    }

    /// Sets one flag and returns the interest as it was before.
    pub(crate) fn set_interest(&mut self, condition: Condition, value: bool) -> Interest {
        let old = self.interest;
        self.interest.set(condition, value);
        old
    }

    /// Returns `true` if there is nothing left to deliver for this descriptor.
    pub(crate) fn is_idle(&self) -> bool {
        self.interest.is_empty()
    }
}
