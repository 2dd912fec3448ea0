use super::DescriptorSm;
use crate::handle::HandlerId;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::os::fd::RawFd;

/// Bookkeeping for one registered handler.
///
/// Owns every [`DescriptorSm`] of the handler, keyed by descriptor number.
/// Dropping it drops them all.
pub(crate) struct HandlerSm {
    id: HandlerId,
    descriptors: BTreeMap<RawFd, DescriptorSm>,
}

impl HandlerSm {
    pub(crate) fn new(id: HandlerId) -> Self {
        Self {
            id,
            descriptors: BTreeMap::new(),
        }
    }

    pub(crate) fn id(&self) -> HandlerId {
        self.id
    }

    /// Returns the state machine for `fd`, creating it with every flag
    /// cleared if it does not exist yet.
    pub(crate) fn descriptor_state(&mut self, fd: RawFd) -> &mut DescriptorSm {
        match self.descriptors.entry(fd) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!(target: "fdwatch", handler = %self.id, fd, "descriptor state created");
                entry.insert(DescriptorSm::new(self.id, fd))
            }
        }
    }

    pub(crate) fn descriptor(&self, fd: RawFd) -> Option<&DescriptorSm> {
        self.descriptors.get(&fd)
    }

    /// Drops the state machine for `fd` if none of its flags are set.
    ///
    /// Returns the removed state machine. Does nothing if the state machine
    /// is absent or still has interest.
    pub(crate) fn maybe_cleanup(&mut self, fd: RawFd) -> Option<DescriptorSm> {
        if !self.descriptors.get(&fd)?.is_idle() {
            return None;
        }

        tracing::debug!(target: "fdwatch", handler = %self.id, fd, "descriptor state removed");
        self.descriptors.remove(&fd)
    }

    /// All descriptor state machines, in descriptor order.
    pub(crate) fn descriptor_state_machines(&self) -> impl Iterator<Item = &DescriptorSm> {
        self.descriptors.values()
    }

    /// Removes and returns every descriptor state machine.
    pub(crate) fn drain(&mut self) -> Vec<DescriptorSm> {
        std::mem::take(&mut self.descriptors).into_values().collect()
    }
}
