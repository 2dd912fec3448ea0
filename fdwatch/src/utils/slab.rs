/// A generational slab allocator.
///
/// A `Slab` stores values of type `T` in a contiguous array and hands out
/// `(index, generation)` pairs. Indices are reused after removal, but every
/// reuse bumps the slot generation, so a key kept past the removal of its
/// value never resolves to whatever was inserted later in the same slot.
///
/// Internally, it keeps track of:
/// - one [`Slot`] per index, holding the current generation and the value,
/// - a stack of free indices,
/// - the number of occupied slots.
pub(crate) struct Slab<T> {
    /// Storage for items (vacant slots hold `None`).
    slots: Vec<Slot<T>>,
    /// Stack of free indices that can be reused.
    free: Vec<u32>,
    /// Number of occupied slots.
    len: usize,
}

/// A single slab slot.
struct Slot<T> {
    /// Bumped every time the slot is vacated.
    generation: u32,
    value: Option<T>,
}

impl<T> Slot<T> {
    fn vacant() -> Self {
        Self {
            generation: 0,
            value: None,
        }
    }
}

impl<T> Slab<T> {
    /// Creates a new `Slab` with a fixed initial capacity.
    ///
    /// All slots are initially free.
    ///
    /// # Arguments
    ///
    /// * `size` - Initial number of slots to allocate.
    pub(crate) fn new(size: usize) -> Self {
        let slots = (0..size).map(|_| Slot::vacant()).collect();
        // Reversed so that the lowest index is handed out first.
        let free = (0..size as u32).rev().collect();

        Self {
            slots,
            free,
            len: 0,
        }
    }

    /// Inserts a value built from the `(index, generation)` key it will be
    /// stored under, and returns that key.
    ///
    /// If a free slot is available, it is reused.
    /// Otherwise, the slab grows exponentially.
    ///
    /// Returns `None` once the index space (`u32`) is exhausted.
    pub(crate) fn insert_with(&mut self, make: impl FnOnce((u32, u32)) -> T) -> Option<(u32, u32)> {
        let index = match self.free.pop() {
            Some(i) => i,
            None => {
                let len = self.slots.len();
                let new_len = if len == 0 { 1 } else { 2 * len };
                let new_len = new_len.min(u32::MAX as usize);

                if new_len <= len {
                    return None;
                }

                self.slots.extend((len..new_len).map(|_| Slot::vacant()));
                self.free.extend(((len + 1) as u32..new_len as u32).rev());

                len as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        debug_assert!(slot.value.is_none(), "free list handed out an occupied slot");

        let key = (index, slot.generation);
        slot.value = Some(make(key));
        self.len += 1;

        Some(key)
    }

    /// Removes and returns the value stored under `(index, generation)`.
    ///
    /// Returns `None` if the slot is vacant or holds a newer generation.
    /// The slot becomes free and may be reused by future insertions, unless
    /// its generation is exhausted, in which case it is never handed out again.
    pub(crate) fn remove(&mut self, index: u32, generation: u32) -> Option<T> {
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }

        let item = slot.value.take()?;
        self.len -= 1;

        // A wrapped generation would let old keys resolve again; retire the slot.
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(index);
        }

        Some(item)
    }

    /// Returns a reference to the value stored under `(index, generation)`.
    pub(crate) fn get(&self, index: u32, generation: u32) -> Option<&T> {
        let slot = self.slots.get(index as usize)?;
        if slot.generation != generation {
            return None;
        }

        slot.value.as_ref()
    }

    /// Returns a mutable reference to the value stored under `(index, generation)`.
    pub(crate) fn get_mut(&mut self, index: u32, generation: u32) -> Option<&mut T> {
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }

        slot.value.as_mut()
    }

    /// Iterates over every occupied slot in index order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = ((u32, u32), &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| ((index as u32, slot.generation), value))
        })
    }

    /// Returns the keys of every occupied slot in index order.
    pub(crate) fn keys(&self) -> Vec<(u32, u32)> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Returns the number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }
}
