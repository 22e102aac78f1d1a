//! Workload builders for dynseq benchmarks.
//!
//! - [`filled_sequence`]: a sequence grown purely through `push_back`
//! - [`access_pattern`]: deterministic pseudo-random index stream via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynseq::DynamicSequence;

/// Build a sequence of `len` integers by repeated `push_back` from empty.
pub fn filled_sequence(len: usize) -> DynamicSequence<u64> {
    let mut seq = DynamicSequence::new();
    for v in 0..len as u64 {
        seq.push_back(v);
    }
    seq
}

/// Generate `count` indices in `[0, len)` from a seeded LCG.
///
/// Same seed, same stream, so benchmark runs stay comparable.
pub fn access_pattern(len: usize, count: usize, seed: u64) -> Vec<usize> {
    assert!(len > 0, "access pattern over an empty range");
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % len as u64) as usize
        })
        .collect()
}
