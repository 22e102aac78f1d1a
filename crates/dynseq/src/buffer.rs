//! Fixed-capacity owned storage block.
//!
//! A [`Buffer`] owns exactly one contiguous `Box<[T]>` and knows nothing
//! about how many of its slots are logically in use. Callers pass the live
//! prefix length into [`reserve`](Buffer::reserve) so only those slots are
//! carried across a reallocation.
//!
//! Every slot is always initialised: fresh slots hold `T::default()`, and
//! slots past the caller's logical length keep whatever was last written.

use std::mem;
use std::ops::{Index, IndexMut};

use tracing::trace;

use crate::config::GrowthPolicy;
use crate::error::SequenceError;

/// Owned block of `capacity` slots.
///
/// Capacity is zero exactly when no block is held. Once a block is
/// allocated through [`with_capacity`](Buffer::with_capacity) or
/// [`reserve`](Buffer::reserve) it is never smaller than the buffer's
/// minimum capacity.
#[derive(Debug)]
pub struct Buffer<T> {
    /// Backing storage. Empty (no allocation) when capacity is zero.
    slots: Box<[T]>,
    /// Floor applied to every clamped allocation.
    min_capacity: usize,
}

impl<T> Buffer<T> {
    /// Minimum capacity used by [`Buffer::new`].
    pub const INITIAL_CAPACITY: usize = GrowthPolicy::DEFAULT_INITIAL_CAPACITY;

    /// Create an empty buffer with the default minimum capacity.
    pub fn new() -> Self {
        Self::with_min_capacity(Self::INITIAL_CAPACITY)
    }

    /// Create an empty buffer whose clamped allocations never go below
    /// `min_capacity` slots.
    pub fn with_min_capacity(min_capacity: usize) -> Self {
        Self {
            slots: Box::default(),
            min_capacity,
        }
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Floor applied by [`with_capacity`](Buffer::with_capacity) and
    /// [`reserve`](Buffer::reserve).
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Exchange storage with `other` without touching any element.
    pub fn swap(&mut self, other: &mut Buffer<T>) {
        mem::swap(&mut self.slots, &mut other.slots);
    }

    /// Release the block and reset capacity to zero.
    pub fn clear(&mut self) {
        if !self.slots.is_empty() {
            trace!(capacity = self.slots.len(), "buffer released");
        }
        self.slots = Box::default();
    }

    fn clamp(&self, requested: usize) -> usize {
        requested.max(self.min_capacity)
    }
}

impl<T: Clone + Default> Buffer<T> {
    /// Allocate a buffer of `max(capacity, INITIAL_CAPACITY)` default slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buffer = Self::new();
        buffer.slots = default_block(buffer.clamp(capacity)).into_boxed_slice();
        buffer
    }

    /// Allocate a buffer of exactly `source.len()` slots holding clones of
    /// `source`, in order.
    ///
    /// No minimum is applied; an empty `source` yields an empty buffer.
    pub fn from_slice(source: &[T]) -> Self {
        let mut buffer = Self::new();
        buffer.slots = source.into();
        buffer
    }

    /// Copy the first `len` slots into a new buffer of exactly `len` slots
    /// with the same minimum capacity.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the capacity.
    pub fn duplicate(&self, len: usize) -> Self {
        Self {
            slots: self.slots[..len].into(),
            min_capacity: self.min_capacity,
        }
    }

    /// Grow to at least `desired` slots, carrying over the first `len`.
    ///
    /// No-op when `desired <= capacity`. Otherwise a block of
    /// `max(desired, min_capacity)` slots is allocated, the live prefix is
    /// cloned into it element by element, and only then does it replace the
    /// current block. If a clone panics the new block is dropped and this
    /// buffer is left exactly as it was.
    ///
    /// # Panics
    ///
    /// Panics if a reallocation happens and `len` exceeds the current
    /// capacity.
    pub fn reserve(&mut self, len: usize, desired: usize) {
        if desired <= self.capacity() {
            return;
        }
        let block = default_block(self.clamp(desired));
        self.commit(block, len);
    }

    /// Fallible [`reserve`](Buffer::reserve).
    ///
    /// Returns [`SequenceError::AllocationFailed`] if the allocator refuses
    /// the block; the buffer is unchanged in that case.
    ///
    /// # Panics
    ///
    /// Panics if a reallocation happens and `len` exceeds the current
    /// capacity.
    pub fn try_reserve(&mut self, len: usize, desired: usize) -> Result<(), SequenceError> {
        if desired <= self.capacity() {
            return Ok(());
        }
        let block = try_default_block(self.clamp(desired))?;
        self.commit(block, len);
        Ok(())
    }

    /// Reallocate to exactly `capacity` slots, carrying over the first `len`.
    ///
    /// Unlike [`reserve`](Buffer::reserve) this may shrink and applies no
    /// minimum; a `capacity` of zero releases the block.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds either the current or the new capacity.
    pub fn reallocate_exact(&mut self, len: usize, capacity: usize) {
        assert!(
            len <= capacity,
            "cannot keep {len} slots in a block of {capacity}"
        );
        if capacity == 0 {
            self.clear();
            return;
        }
        let block = default_block(capacity);
        self.commit(block, len);
    }

    fn commit(&mut self, mut block: Vec<T>, len: usize) {
        for (dst, src) in block.iter_mut().zip(&self.slots[..len]) {
            dst.clone_from(src);
        }
        trace!(
            from = self.slots.len(),
            to = block.len(),
            copied = len,
            "buffer reallocated"
        );
        self.slots = block.into_boxed_slice();
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Buffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.slots[index]
    }
}

impl<T> IndexMut<usize> for Buffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.slots[index]
    }
}

fn default_block<T: Default>(capacity: usize) -> Vec<T> {
    let mut block = Vec::with_capacity(capacity);
    block.resize_with(capacity, T::default);
    block
}

fn try_default_block<T: Default>(capacity: usize) -> Result<Vec<T>, SequenceError> {
    let mut block = Vec::new();
    block
        .try_reserve_exact(capacity)
        .map_err(|source| SequenceError::AllocationFailed {
            requested: capacity,
            source,
        })?;
    block.resize_with(capacity, T::default);
    Ok(block)
}
