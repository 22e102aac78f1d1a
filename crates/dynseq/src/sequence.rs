//! Growable sequence layered over [`Buffer`].
//!
//! [`DynamicSequence`] tracks a logical length on top of a buffer and owns
//! every policy decision: when to grow, by how much, and what resize and
//! shrink mean. All allocation goes through the buffer.

use std::fmt;
use std::ops::{Index, IndexMut};

use tracing::debug;

use crate::buffer::Buffer;
use crate::config::{GrowthPolicy, PolicyError};
use crate::error::SequenceError;

/// Growable array with amortised appends and checked access.
///
/// Slots in `[len, capacity)` are allocated but hold no logical value:
/// after [`pop_back`](DynamicSequence::pop_back) or a shrinking resize they
/// keep their stale contents until overwritten.
pub struct DynamicSequence<T> {
    buffer: Buffer<T>,
    len: usize,
    policy: GrowthPolicy,
}

impl<T> DynamicSequence<T> {
    /// Minimum capacity allocated once any allocation occurs.
    pub const INITIAL_CAPACITY: usize = GrowthPolicy::DEFAULT_INITIAL_CAPACITY;

    /// Multiplier applied to the capacity when an append finds it full.
    pub const RESIZE_FACTOR: f64 = GrowthPolicy::DEFAULT_RESIZE_FACTOR;

    /// Create an empty sequence with no allocation.
    pub fn new() -> Self {
        Self {
            buffer: Buffer::new(),
            len: 0,
            policy: GrowthPolicy::default(),
        }
    }

    /// Create an empty sequence that grows according to `policy`.
    ///
    /// Returns the [`PolicyError`] from [`GrowthPolicy::validate`] if the
    /// policy is rejected.
    pub fn with_policy(policy: GrowthPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self {
            buffer: Buffer::with_min_capacity(policy.initial_capacity),
            len: 0,
            policy,
        })
    }

    /// Number of logically valid elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// `true` when the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Minimum capacity of this sequence's policy.
    pub fn initial_capacity(&self) -> usize {
        self.policy.initial_capacity
    }

    /// Growth multiplier of this sequence's policy.
    pub fn resize_factor(&self) -> f64 {
        self.policy.resize_factor
    }

    /// The policy this sequence grows by.
    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    /// Checked access.
    pub fn at(&self, index: usize) -> Result<&T, SequenceError> {
        self.check(index)?;
        Ok(&self.buffer[index])
    }

    /// Checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, SequenceError> {
        self.check(index)?;
        Ok(&mut self.buffer[index])
    }

    /// First element. The sequence must not be empty.
    pub fn front(&self) -> &T {
        debug_assert!(self.len > 0, "front() on an empty sequence");
        &self.buffer[0]
    }

    /// Mutable first element. The sequence must not be empty.
    pub fn front_mut(&mut self) -> &mut T {
        debug_assert!(self.len > 0, "front_mut() on an empty sequence");
        &mut self.buffer[0]
    }

    /// Last element. The sequence must not be empty.
    pub fn back(&self) -> &T {
        debug_assert!(self.len > 0, "back() on an empty sequence");
        &self.buffer[self.len.wrapping_sub(1)]
    }

    /// Mutable last element. The sequence must not be empty.
    pub fn back_mut(&mut self) -> &mut T {
        debug_assert!(self.len > 0, "back_mut() on an empty sequence");
        let last = self.len.wrapping_sub(1);
        &mut self.buffer[last]
    }

    /// Drop the last element from the logical range.
    ///
    /// The slot is not cleared; the next append overwrites it.
    pub fn pop_back(&mut self) -> Result<(), SequenceError> {
        if self.len == 0 {
            return Err(SequenceError::Empty {
                operation: "pop_back",
            });
        }
        self.len -= 1;
        Ok(())
    }

    fn check(&self, index: usize) -> Result<(), SequenceError> {
        if index >= self.len {
            return Err(SequenceError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }
}

impl<T: Clone + Default> DynamicSequence<T> {
    /// Create an empty sequence with room for `max(capacity, 4)` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Buffer::with_capacity(capacity),
            len: 0,
            policy: GrowthPolicy::default(),
        }
    }

    /// Create a sequence holding clones of `items`, with capacity exactly
    /// `items.len()`.
    pub fn from_slice(items: &[T]) -> Self {
        let mut seq = Self::new();
        seq.buffer = Buffer::from_slice(items);
        seq.len = items.len();
        seq
    }

    /// Append `value`, growing the capacity by the resize factor when full.
    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity() {
            let next = self.policy.next_capacity(self.capacity());
            self.buffer.reserve(self.len, next);
        }
        self.buffer[self.len] = value;
        self.len += 1;
    }

    /// Fallible [`push_back`](DynamicSequence::push_back).
    ///
    /// On allocation failure the sequence is unchanged and `value` is
    /// dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<(), SequenceError> {
        if self.len == self.capacity() {
            let next = self.policy.next_capacity(self.capacity());
            self.buffer.try_reserve(self.len, next)?;
        }
        self.buffer[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Change the length to `new_len` without writing the new slots.
    ///
    /// Growing past the capacity reallocates to exactly `new_len` (subject
    /// to the minimum capacity). Slots in `[old len, new_len)` keep whatever
    /// the buffer holds there. Shrinking only moves the length; capacity and
    /// the dropped slots are left alone.
    pub fn resize_unfilled(&mut self, new_len: usize) {
        if new_len > self.capacity() {
            self.buffer.reserve(self.len, new_len);
        }
        self.len = new_len;
    }

    /// Change the length to `new_len`, setting any new slots to `value`.
    ///
    /// Shrinking behaves as in
    /// [`resize_unfilled`](DynamicSequence::resize_unfilled). The length
    /// only moves once every new slot is written, so a panicking clone
    /// leaves it unchanged.
    pub fn resize(&mut self, new_len: usize, value: T) {
        if new_len > self.capacity() {
            self.buffer.reserve(self.len, new_len);
        }
        for i in self.len..new_len {
            self.buffer[i].clone_from(&value);
        }
        self.len = new_len;
    }

    /// Ensure capacity for at least `capacity` elements.
    ///
    /// No-op when `capacity` does not exceed the current capacity.
    pub fn reserve(&mut self, capacity: usize) {
        self.buffer.reserve(self.len, capacity);
    }

    /// Fallible [`reserve`](DynamicSequence::reserve).
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), SequenceError> {
        self.buffer.try_reserve(self.len, capacity)
    }

    /// Reallocate so the capacity equals the length.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() > self.len {
            debug!(
                from = self.capacity(),
                to = self.len,
                "shrinking sequence to fit"
            );
            self.buffer.reallocate_exact(self.len, self.len);
        }
    }
}

impl<T> Default for DynamicSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Default> Clone for DynamicSequence<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.duplicate(self.len),
            len: self.len,
            policy: self.policy,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        // The copy is complete before the old block is released.
        *self = source.clone();
    }
}

impl<T: Clone + Default> From<&[T]> for DynamicSequence<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T: Clone + Default, const N: usize> From<[T; N]> for DynamicSequence<T> {
    fn from(items: [T; N]) -> Self {
        Self::from_slice(&items)
    }
}

impl<T> Index<usize> for DynamicSequence<T> {
    type Output = T;

    /// Unchecked-contract access: `index` must be below `len()`.
    ///
    /// Debug builds assert this. Release builds return whatever the slot
    /// holds for indices below the capacity, and panic beyond it.
    fn index(&self, index: usize) -> &T {
        debug_assert!(
            index < self.len,
            "index {index} out of range for sequence of length {}",
            self.len
        );
        &self.buffer[index]
    }
}

impl<T> IndexMut<usize> for DynamicSequence<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.len,
            "index {index} out of range for sequence of length {}",
            self.len
        );
        &mut self.buffer[index]
    }
}

impl<T: PartialEq> PartialEq for DynamicSequence<T> {
    /// Compares logical elements only; capacity and stale slots are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && (0..self.len).all(|i| self.buffer[i] == other.buffer[i])
    }
}

impl<T: Eq> Eq for DynamicSequence<T> {}

impl<T: fmt::Debug> fmt::Debug for DynamicSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len).map(|i| &self.buffer[i]))
            .finish()
    }
}
