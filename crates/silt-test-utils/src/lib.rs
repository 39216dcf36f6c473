//! Test fixtures for exercising silt's lifetime and panic contracts.
//!
//! Provides instrumented element types:
//!
//! - [`Tracked`] — constructions, clones, and drops counted by a shared
//!   [`Tally`], for asserting that every element is destroyed exactly once.
//! - [`FlakyClone`] — clone panics deterministically once a shared
//!   [`CloneFuse`] burns out, for panic-injection tests.
//! - [`FlakyDefault`] — same failure mode for default construction, armed
//!   per thread with [`arm_default_fuse`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::{
    arm_default_fuse, default_created, default_dropped, default_live, CloneFuse, FlakyClone,
    FlakyDefault, Tally, Tracked,
};
