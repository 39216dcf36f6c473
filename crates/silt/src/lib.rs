//! Growable contiguous storage built directly on raw, untyped memory.
//!
//! Silt separates the two concerns a dynamic array usually conflates:
//! storage acquisition and object lifetime. This is the only crate in the
//! workspace that contains `unsafe` code; every `unsafe` block carries a
//! `// SAFETY:` comment stating the obligation it discharges.
//!
//! # Architecture
//!
//! ```text
//! SiltVec<T> (object lifetime: live prefix [0, len))
//! ├── RawBlock<T> (storage acquisition: capacity slots, no T ever
//! │                constructed or dropped by the block itself)
//! └── IntoIter<T> (owning cursor: takes the block, drains the live range)
//! ```
//!
//! `RawBlock` allocates and frees bytes; it never runs a constructor or
//! destructor. `SiltVec` owns one block plus a length and maintains the
//! invariant that exactly the first `len` slots hold live elements — on
//! every return path, including panic unwinds. Growth allocates a fresh
//! block, relocates the live prefix bitwise, and swaps block ownership, so
//! an allocation failure surfaces before the original array is touched.
//!
//! # Quick start
//!
//! ```rust
//! use silt::SiltVec;
//!
//! let mut v: SiltVec<i32> = SiltVec::new();
//! v.push(1);
//! v.push(2);
//! v.insert(1, 99);
//! assert_eq!(v.remove(0), 1);
//! assert_eq!(v.as_slice(), &[99, 2]);
//!
//! // The full slice surface is available through Deref.
//! assert_eq!(v.iter().sum::<i32>(), 101);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod iter;
pub mod raw;
pub mod vec;

// Public re-exports for the primary API surface.
pub use error::ReserveError;
pub use iter::IntoIter;
pub use raw::RawBlock;
pub use vec::SiltVec;
