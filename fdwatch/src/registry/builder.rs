use super::Registry;
use crate::interest::InterestObserver;

/// Initial number of handler slots.
const DEFAULT_CAPACITY: usize = 64;

/// Builder for configuring and creating a registry.
///
/// # Examples
///
/// ```rust
/// use fdwatch::RegistryBuilder;
///
/// let registry = RegistryBuilder::new()
///     .capacity(16)
///     .build();
/// ```
pub struct RegistryBuilder {
    /// Number of handler slots allocated up front.
    capacity: usize,

    /// Receiver of interest changes, if any.
    observer: Option<Box<dyn InterestObserver>>,
}

impl RegistryBuilder {
    /// Creates a new `RegistryBuilder` with default configuration.
    ///
    /// By default, 64 handler slots are reserved and no observer is installed.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            observer: None,
        }
    }

    /// Sets the number of handler slots allocated up front.
    ///
    /// The registry still grows past this on demand.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn capacity(mut self, n: usize) -> Self {
        assert!(n > 0, "capacity must be > 0");

        self.capacity = n;
        self
    }

    /// Installs the observer notified of every effective interest change.
    pub fn observer(mut self, observer: impl InterestObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Builds the registry with the configured options.
    pub fn build(self) -> Registry {
        Registry::with_config(self.capacity, self.observer)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
