//! Growable sequence container over an owned fixed-capacity buffer.
//!
//! # Architecture
//!
//! ```text
//! DynamicSequence<T> (length, growth policy, checked access)
//! └── Buffer<T> (one Box<[T]> block: allocate, copy prefix, swap, release)
//! ```
//!
//! The buffer never knows how many slots are in use; the sequence never
//! allocates on its own. Growth multiplies the current capacity by
//! [`GrowthPolicy::resize_factor`] (1.6 by default) and floors the result,
//! and no allocation is ever smaller than
//! [`GrowthPolicy::initial_capacity`] (4 by default).
//!
//! # Access contract
//!
//! [`DynamicSequence::at`] and [`DynamicSequence::pop_back`] report
//! [`SequenceError`]s. Indexing, `front` and `back` expect a valid position;
//! debug builds assert it and release builds stay memory-safe but return
//! unspecified slot contents.
//!
//! # Panic safety
//!
//! Reallocation builds the new block completely before releasing the old
//! one. A panicking `Clone` impl during growth leaves the sequence exactly as
//! it was before the call.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod sequence;

// Public re-exports for the primary API surface.
pub use buffer::Buffer;
pub use config::{GrowthPolicy, PolicyError};
pub use error::SequenceError;
pub use sequence::DynamicSequence;
