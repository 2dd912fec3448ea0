use std::fmt::{self, Display, Formatter};
use std::os::fd::RawFd;

const GENERATION_BITS: u32 = 32;
const INDEX_SHIFT: u32 = GENERATION_BITS;
const GENERATION_MASK: u64 = (1u64 << GENERATION_BITS) - 1;

/// Identity of a registered handler.
///
/// Layout (MSB to LSB): `[slot_index: 32 bits][generation: 32 bits]`
///
/// The generation changes every time a slot is released, so an id kept
/// after its handler was unregistered never resolves to a handler that
/// later reused the same slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self(((index as u64) << INDEX_SHIFT) | generation as u64)
    }

    /// Reconstruct an id from its raw `u64` representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw `u64` representation.
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Extract the slot index (upper 32 bits).
    pub fn index(&self) -> u32 {
        (self.0 >> INDEX_SHIFT) as u32
    }

    /// Extract the generation counter (lower 32 bits).
    pub fn generation(&self) -> u32 {
        (self.0 & GENERATION_MASK) as u32
    }
}

impl Display for HandlerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HandlerId(index={}, generation={})",
            self.index(),
            self.generation()
        )
    }
}

/// Address of one descriptor state machine: the owning handler plus the
/// descriptor number.
///
/// Descriptor numbers are scoped per handler, so the same `fd` under two
/// handlers names two independent state machines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DescriptorKey {
    pub handler: HandlerId,
    pub fd: RawFd,
}

impl DescriptorKey {
    pub fn new(handler: HandlerId, fd: RawFd) -> Self {
        Self { handler, fd }
    }
}

impl Display for DescriptorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "fd {} of {}", self.fd, self.handler)
    }
}
