//! Sequence error types.

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

/// Errors reported by checked [`DynamicSequence`](crate::DynamicSequence)
/// and [`Buffer`](crate::Buffer) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequenceError {
    /// Checked access with an index outside `[0, len)`.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Logical length at the time of the call.
        len: usize,
    },
    /// An operation that needs at least one element was called on an empty
    /// sequence.
    Empty {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// The allocator could not provide a block of the requested size.
    AllocationFailed {
        /// Number of slots requested.
        requested: usize,
        /// The allocator's report.
        source: TryReserveError,
    },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for sequence of length {len}")
            }
            Self::Empty { operation } => {
                write!(f, "{operation} called on an empty sequence")
            }
            Self::AllocationFailed { requested, .. } => {
                write!(f, "failed to allocate buffer of {requested} slots")
            }
        }
    }
}

impl Error for SequenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AllocationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
