//! Instrumented element types for lifetime and panic-injection tests.
//!
//! Three standard fixtures for container testing:
//!
//! - [`Tracked`] — every construction, clone, and drop is counted by a
//!   shared [`Tally`].
//! - [`FlakyClone`] — clones succeed a configured number of times across
//!   the whole family, then panic ([`CloneFuse::arm`]).
//! - [`FlakyDefault`] — default construction fails deterministically after
//!   N successes, armed per thread.

use std::cell::Cell;
use std::rc::Rc;

/// Shared construction/clone/drop counters for a family of [`Tracked`]
/// values.
///
/// Clone the tally freely — all handles observe the same counters.
#[derive(Clone, Default)]
pub struct Tally {
    inner: Rc<TallyInner>,
}

#[derive(Default)]
struct TallyInner {
    created: Cell<usize>,
    cloned: Cell<usize>,
    dropped: Cell<usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values built with [`Tracked::new`].
    pub fn created(&self) -> usize {
        self.inner.created.get()
    }

    /// Values built by `Clone`.
    pub fn cloned(&self) -> usize {
        self.inner.cloned.get()
    }

    /// Values destroyed so far.
    pub fn dropped(&self) -> usize {
        self.inner.dropped.get()
    }

    /// Values currently alive: `created + cloned - dropped`.
    pub fn live(&self) -> usize {
        self.created() + self.cloned() - self.dropped()
    }
}

/// An element whose constructions and drops are counted by a [`Tally`].
#[derive(Debug)]
pub struct Tracked {
    value: u64,
    tally: Tally,
}

impl Tracked {
    pub fn new(value: u64, tally: &Tally) -> Self {
        tally.inner.created.set(tally.inner.created.get() + 1);
        Self {
            value,
            tally: tally.clone(),
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.tally.inner.cloned.set(self.tally.inner.cloned.get() + 1);
        Self {
            value: self.value,
            tally: self.tally.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.tally.inner.dropped.set(self.tally.inner.dropped.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl std::fmt::Debug for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tally")
            .field("created", &self.created())
            .field("cloned", &self.cloned())
            .field("dropped", &self.dropped())
            .finish()
    }
}

/// Shared clone budget for a family of [`FlakyClone`] values.
///
/// The fuse allows a configured number of clones across the whole family;
/// the next clone panics. Constructions and drops are counted so tests can
/// assert that unwinding destroyed every successfully built element.
#[derive(Clone)]
pub struct CloneFuse {
    inner: Rc<CloneFuseInner>,
}

struct CloneFuseInner {
    remaining: Cell<usize>,
    created: Cell<usize>,
    dropped: Cell<usize>,
}

impl CloneFuse {
    /// Allow `clones` successful clones; the one after panics.
    pub fn arm(clones: usize) -> Self {
        Self {
            inner: Rc::new(CloneFuseInner {
                remaining: Cell::new(clones),
                created: Cell::new(0),
                dropped: Cell::new(0),
            }),
        }
    }

    /// Values built so far, originals and clones alike.
    pub fn created(&self) -> usize {
        self.inner.created.get()
    }

    /// Values destroyed so far.
    pub fn dropped(&self) -> usize {
        self.inner.dropped.get()
    }

    /// Values currently alive.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }
}

/// An element whose `clone` panics once its [`CloneFuse`] burns out.
#[derive(Debug)]
pub struct FlakyClone {
    value: u64,
    fuse: CloneFuse,
}

impl FlakyClone {
    pub fn new(value: u64, fuse: &CloneFuse) -> Self {
        fuse.inner.created.set(fuse.inner.created.get() + 1);
        Self {
            value,
            fuse: fuse.clone(),
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl Clone for FlakyClone {
    fn clone(&self) -> Self {
        let remaining = self.fuse.inner.remaining.get();
        if remaining == 0 {
            panic!("clone fuse burned out");
        }
        self.fuse.inner.remaining.set(remaining - 1);
        Self::new(self.value, &self.fuse)
    }
}

impl Drop for FlakyClone {
    fn drop(&mut self) {
        self.fuse.inner.dropped.set(self.fuse.inner.dropped.get() + 1);
    }
}

impl PartialEq for FlakyClone {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl std::fmt::Debug for CloneFuse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloneFuse")
            .field("remaining", &self.inner.remaining.get())
            .field("created", &self.created())
            .field("dropped", &self.dropped())
            .finish()
    }
}

thread_local! {
    static DEFAULT_REMAINING: Cell<usize> = const { Cell::new(usize::MAX) };
    static DEFAULT_CREATED: Cell<usize> = const { Cell::new(0) };
    static DEFAULT_DROPPED: Cell<usize> = const { Cell::new(0) };
}

/// Re-arm the current thread's default-construction fuse: `allowed`
/// defaults succeed, the next one panics. Resets the counters.
pub fn arm_default_fuse(allowed: usize) {
    DEFAULT_REMAINING.with(|c| c.set(allowed));
    DEFAULT_CREATED.with(|c| c.set(0));
    DEFAULT_DROPPED.with(|c| c.set(0));
}

/// [`FlakyDefault`] values built on this thread since the last arm.
pub fn default_created() -> usize {
    DEFAULT_CREATED.with(Cell::get)
}

/// [`FlakyDefault`] values destroyed on this thread since the last arm.
pub fn default_dropped() -> usize {
    DEFAULT_DROPPED.with(Cell::get)
}

/// [`FlakyDefault`] values currently alive on this thread.
pub fn default_live() -> usize {
    default_created() - default_dropped()
}

/// An element whose `Default` impl fails deterministically after the
/// thread fuse set by [`arm_default_fuse`] runs out. Drops are counted so
/// tests can assert unwind cleanup.
#[derive(Debug, PartialEq)]
pub struct FlakyDefault {
    _private: (),
}

impl Default for FlakyDefault {
    fn default() -> Self {
        DEFAULT_REMAINING.with(|c| {
            let remaining = c.get();
            if remaining == 0 {
                panic!("default fuse burned out");
            }
            c.set(remaining - 1);
        });
        DEFAULT_CREATED.with(|c| c.set(c.get() + 1));
        Self { _private: () }
    }
}

impl Drop for FlakyDefault {
    fn drop(&mut self) {
        DEFAULT_DROPPED.with(|c| c.set(c.get() + 1));
    }
}
