//! Storage-acquisition error types.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors that can occur while acquiring backing storage.
///
/// Returned by the fallible reservation paths ([`RawBlock::allocate`] and
/// [`SiltVec::try_reserve`]). The infallible conveniences (`reserve`,
/// `push`, `insert`, ...) escalate these instead: capacity overflow panics
/// and out-of-memory calls [`std::alloc::handle_alloc_error`].
///
/// [`RawBlock::allocate`]: crate::RawBlock::allocate
/// [`SiltVec::try_reserve`]: crate::SiltVec::try_reserve
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReserveError {
    /// The requested element count cannot be laid out in the address space.
    CapacityOverflow {
        /// Number of elements requested.
        requested: usize,
    },
    /// The global allocator refused the request.
    OutOfMemory {
        /// Size of the refused request in bytes.
        bytes: usize,
        /// Alignment of the refused request in bytes.
        align: usize,
    },
}

impl fmt::Display for ReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: cannot lay out {requested} elements")
            }
            Self::OutOfMemory { bytes, align } => {
                write!(f, "out of memory: allocator refused {bytes} bytes (align {align})")
            }
        }
    }
}

impl Error for ReserveError {}

impl ReserveError {
    /// Convert into the infallible-path response: panic on overflow,
    /// `handle_alloc_error` on OOM.
    pub(crate) fn escalate(self) -> ! {
        match self {
            Self::CapacityOverflow { requested } => {
                panic!("capacity overflow: cannot lay out {requested} elements")
            }
            Self::OutOfMemory { bytes, align } => {
                let layout = Layout::from_size_align(bytes, align)
                    .expect("layout was valid when the allocation was attempted");
                std::alloc::handle_alloc_error(layout)
            }
        }
    }
}
