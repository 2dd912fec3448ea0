//! Utilities for memory-efficient data structures.
//!
//! This module provides low-level utilities used internally by the registry.
//! In particular, it exposes a generational [`Slab`] used for indexed handler
//! storage with reuse of freed slots and detection of stale keys.

mod slab;

pub(crate) use slab::Slab;
