//! Benchmark profiles and input builders for the silt container.
//!
//! Provides pre-built vectors so individual benchmarks measure the
//! operation under test rather than setup cost.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use silt::SiltVec;

/// Build a vector of `len` sequential `u64` values, capacity exactly `len`.
pub fn sequential_u64(len: usize) -> SiltVec<u64> {
    let mut v = SiltVec::with_capacity(len);
    for i in 0..len as u64 {
        v.push(i);
    }
    v
}

/// Build a vector of `len` owned strings, for benchmarking non-trivial
/// clone and drop paths.
pub fn owned_strings(len: usize) -> SiltVec<String> {
    let mut v = SiltVec::with_capacity(len);
    for i in 0..len {
        v.push(format!("element-{i}"));
    }
    v
}
