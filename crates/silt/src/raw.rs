//! Raw, untyped element storage and uninitialised-slot primitives.
//!
//! [`RawBlock`] owns a heap allocation sized for exactly `capacity`
//! elements of `T` and never constructs or drops a `T` inside it — object
//! lifetime is the owner's job ([`SiltVec`](crate::SiltVec) tracks the live
//! prefix). The free functions at the bottom are the crate's only way of
//! constructing into or vacating uninitialised slots in bulk, and they
//! unwind their own partial work when an element constructor panics.

use std::alloc::{alloc, dealloc, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use crate::error::ReserveError;

/// Owner of raw storage for `capacity` elements of `T`.
///
/// The block allocates on construction and frees on drop, but every slot
/// is uninitialised memory as far as the block is concerned: it runs no
/// constructor and no destructor. Callers must vacate any elements they
/// placed in the block before the block drops.
///
/// Move-only: duplicating ownership of raw storage has no meaning, so the
/// type implements neither `Clone` nor `Copy`. No two live blocks ever
/// reference the same buffer.
///
/// Zero-sized `T` never allocates; the capacity reports `usize::MAX`.
pub struct RawBlock<T> {
    /// Start of the allocation; dangling (but aligned) when empty.
    ptr: NonNull<T>,
    /// Element capacity of the allocation.
    cap: usize,
    _owns: PhantomData<T>,
}

impl<T> RawBlock<T> {
    /// Block with no storage: dangling pointer, zero capacity.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: if mem::size_of::<T>() == 0 { usize::MAX } else { 0 },
            _owns: PhantomData,
        }
    }

    /// Allocate storage for exactly `capacity` elements of `T`.
    ///
    /// No element is constructed. A zero-element request, or any request
    /// for a zero-sized `T`, allocates nothing and returns an empty block.
    ///
    /// # Errors
    ///
    /// [`ReserveError::CapacityOverflow`] when `capacity` elements cannot
    /// be laid out in the address space; [`ReserveError::OutOfMemory`] when
    /// the global allocator returns null.
    pub fn allocate(capacity: usize) -> Result<Self, ReserveError> {
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return Ok(Self::new());
        }
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| ReserveError::CapacityOverflow { requested: capacity })?;
        // SAFETY: `layout` has non-zero size — both `capacity` and
        // `size_of::<T>()` were checked above.
        let raw = unsafe { alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(Self {
                ptr,
                cap: capacity,
                _owns: PhantomData,
            }),
            None => Err(ReserveError::OutOfMemory {
                bytes: layout.size(),
                align: layout.align(),
            }),
        }
    }

    /// Start of the storage. Dangling (but aligned) when nothing is
    /// allocated, which is valid for zero-length reads and writes.
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Address of slot `index`.
    ///
    /// `index == capacity()` is allowed: the one-past-end address is a
    /// valid position marker but must never be read or written.
    ///
    /// # Safety
    ///
    /// `index` must be at most `capacity()`. Debug builds assert this;
    /// release builds do not check.
    pub unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(
            index <= self.cap,
            "slot index {index} out of range (capacity {})",
            self.cap
        );
        // SAFETY: the caller guarantees `index <= cap`, which keeps the
        // offset inside the allocation or at one-past-end.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Element capacity of the block. `usize::MAX` for zero-sized `T`.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Exchange storage with `other` in constant time.
    ///
    /// No allocation and no panic path; only the pointer and capacity
    /// change hands.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.cap, &mut other.cap);
    }
}

impl<T> Default for RawBlock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBlock<T> {
    fn drop(&mut self) {
        if self.cap != 0 && mem::size_of::<T>() != 0 {
            let layout = Layout::array::<T>(self.cap)
                .expect("layout was valid when the block was allocated");
            // SAFETY: `ptr` came from `alloc` with this exact layout and
            // has not been freed. Any elements the owner placed in the
            // block were vacated before the block dropped.
            unsafe { dealloc(self.ptr.as_ptr().cast(), layout) };
        }
    }
}

// SAFETY: the block owns its allocation exclusively and holds no shared
// state, so it can move to or be viewed from another thread whenever the
// element type itself can.
unsafe impl<T: Send> Send for RawBlock<T> {}
// SAFETY: as above — a `&RawBlock` exposes nothing but the pointer value
// and capacity.
unsafe impl<T: Sync> Sync for RawBlock<T> {}

/// Drop the `count` contiguous elements starting at `ptr`.
///
/// # Safety
///
/// All `count` slots starting at `ptr` must hold live elements that
/// nothing will observe afterwards.
pub(crate) unsafe fn drop_slots<T>(ptr: *mut T, count: usize) {
    // SAFETY: per the contract, `ptr..ptr+count` is a live slice.
    unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr, count)) };
}

/// Default-construct `count` elements into the uninitialised slots at
/// `dst`.
///
/// If a constructor panics, the elements constructed so far are dropped
/// before the panic continues, returning the destination to a fully
/// uninitialised state.
///
/// # Safety
///
/// `dst` must point to at least `count` writable, uninitialised slots.
pub(crate) unsafe fn fill_default<T: Default>(dst: *mut T, count: usize) {
    let mut guard = InitGuard {
        base: dst,
        initialised: 0,
    };
    for i in 0..count {
        // SAFETY: `i < count`, so `dst.add(i)` is a writable
        // uninitialised slot per the contract.
        unsafe { ptr::write(dst.add(i), T::default()) };
        guard.initialised = i + 1;
    }
    mem::forget(guard);
}

/// Clone `src` element-by-element into the uninitialised slots at `dst`.
///
/// Panic behaviour matches [`fill_default`]: a panicking `clone` unwinds
/// the partially constructed prefix.
///
/// # Safety
///
/// `dst` must point to at least `src.len()` writable, uninitialised slots
/// that do not overlap `src`.
pub(crate) unsafe fn fill_cloned<T: Clone>(src: &[T], dst: *mut T) {
    let mut guard = InitGuard {
        base: dst,
        initialised: 0,
    };
    for (i, elem) in src.iter().enumerate() {
        // SAFETY: `i < src.len()`, so `dst.add(i)` is a writable
        // uninitialised slot per the contract.
        unsafe { ptr::write(dst.add(i), elem.clone()) };
        guard.initialised = i + 1;
    }
    mem::forget(guard);
}

/// Tracks a partially initialised run of slots and unwinds it on drop.
///
/// `mem::forget` once every slot is constructed; an armed guard dropping
/// during a panic destroys exactly the prefix it has seen.
struct InitGuard<T> {
    base: *mut T,
    initialised: usize,
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `initialised` slots starting at `base` were
        // constructed before the unwind reached this guard.
        unsafe { drop_slots(self.base, self.initialised) };
    }
}
