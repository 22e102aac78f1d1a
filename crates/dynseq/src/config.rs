//! Growth policy parameters and validation.

use std::error::Error;
use std::fmt;

/// Capacity policy shared by a [`DynamicSequence`](crate::DynamicSequence)
/// and its [`Buffer`](crate::Buffer).
///
/// Controls the smallest block ever allocated and the multiplier applied to
/// the current capacity when an append finds the sequence full.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthPolicy {
    /// Minimum number of slots allocated once any allocation occurs.
    ///
    /// Default: 4. Must be at least 1.
    pub initial_capacity: usize,

    /// Multiplier applied to the current capacity on growth, floored.
    ///
    /// Default: 1.6. Must be finite and greater than 1.0.
    pub resize_factor: f64,
}

impl GrowthPolicy {
    /// Default minimum allocation in slots.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 4;

    /// Default growth multiplier.
    pub const DEFAULT_RESIZE_FACTOR: f64 = 1.6;

    /// Create a policy with the given parameters, validating them.
    pub fn new(initial_capacity: usize, resize_factor: f64) -> Result<Self, PolicyError> {
        let policy = Self {
            initial_capacity,
            resize_factor,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the policy's structural invariants.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.initial_capacity == 0 {
            return Err(PolicyError::ZeroInitialCapacity);
        }
        if !self.resize_factor.is_finite() || self.resize_factor <= 1.0 {
            return Err(PolicyError::InvalidResizeFactor {
                value: self.resize_factor,
            });
        }
        Ok(())
    }

    /// Capacity to request when a sequence with `current` slots is full.
    ///
    /// Computes `floor(resize_factor * current)`. When that does not exceed
    /// `current` (an empty buffer, or a tiny one left by an exact shrink) the
    /// result falls back to `current + 1`. The buffer raises any request to
    /// `initial_capacity`, so an empty sequence still starts at 4.
    pub fn next_capacity(&self, current: usize) -> usize {
        // Float-to-int `as` saturates, so huge capacities cannot wrap.
        let grown = (self.resize_factor * current as f64).floor() as usize;
        if grown > current {
            grown
        } else {
            current.saturating_add(1)
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            resize_factor: Self::DEFAULT_RESIZE_FACTOR,
        }
    }
}

/// Errors detected by [`GrowthPolicy::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum PolicyError {
    /// `initial_capacity` is zero.
    ZeroInitialCapacity,
    /// `resize_factor` is NaN, infinite, or not greater than 1.0.
    InvalidResizeFactor {
        /// The rejected factor.
        value: f64,
    },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInitialCapacity => write!(f, "initial capacity must be at least 1"),
            Self::InvalidResizeFactor { value } => {
                write!(f, "resize factor must be finite and > 1.0, got {value}")
            }
        }
    }
}

impl Error for PolicyError {}
