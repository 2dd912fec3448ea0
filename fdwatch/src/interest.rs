use crate::handle::DescriptorKey;

use std::fmt;

/// The set of readiness conditions a handler wants to hear about for one
/// descriptor.
///
/// The three flags are independent: none implies or orders another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Interest {
    /// Notify when the descriptor becomes readable.
    pub readable: bool,

    /// Notify when the descriptor becomes writable.
    pub writable: bool,

    /// Notify when an exceptional condition is pending on the descriptor.
    pub exception: bool,
}

impl Interest {
    /// No interest at all.
    pub const NONE: Interest = Interest {
        readable: false,
        writable: false,
        exception: false,
    };

    /// Returns `true` if no flag is set.
    pub fn is_empty(&self) -> bool {
        !self.readable && !self.writable && !self.exception
    }

    /// Returns the flag tracking `condition`.
    pub fn get(&self, condition: Condition) -> bool {
        match condition {
            Condition::Readable => self.readable,
            Condition::Writable => self.writable,
            Condition::Exception => self.exception,
        }
    }

    /// Sets the flag tracking `condition`.
    pub fn set(&mut self, condition: Condition, value: bool) {
        match condition {
            Condition::Readable => self.readable = value,
            Condition::Writable => self.writable = value,
            Condition::Exception => self.exception = value,
        }
    }

    /// Returns a copy of `self` with the flag for `condition` set to `value`.
    pub fn with(mut self, condition: Condition, value: bool) -> Self {
        self.set(condition, value);
        self
    }
}

/// A single readiness condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Readable,
    Writable,
    Exception,
}

impl Condition {
    /// All conditions, in dispatch-entry-point order.
    pub const ALL: [Condition; 3] = [
        Condition::Readable,
        Condition::Writable,
        Condition::Exception,
    ];
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Readable => f.write_str("readable"),
            Condition::Writable => f.write_str("writable"),
            Condition::Exception => f.write_str("exception"),
        }
    }
}

/// Receives authoritative interest changes as they happen.
///
/// This is the hook an external poller implements to keep its watch set in
/// sync with the registry (add the descriptor for a condition when its flag
/// goes up, drop it when it goes down). Pollers that prefer a periodic scan
/// can ignore this and walk [`Registry::watched`](crate::Registry::watched)
/// instead.
pub trait InterestObserver {
    /// Called after the interest of `key` changed from `old` to `new`.
    ///
    /// `new` is [`Interest::NONE`] when the descriptor state was destroyed,
    /// either because its last flag cleared or because its handler was
    /// unregistered. Mutations that leave the flags unchanged are not
    /// reported.
    fn interest_changed(&mut self, key: DescriptorKey, old: Interest, new: Interest);
}
