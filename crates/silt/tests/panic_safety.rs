//! Integration test: panic injection during element construction.
//!
//! A clone or default constructor that panics partway through a bulk
//! operation must leave the original data untouched and destroy every
//! partially constructed element exactly once. These tests arm the
//! fixture fuses to fail on the Nth construction and assert both halves
//! of that contract after the unwind.

use std::panic::{catch_unwind, AssertUnwindSafe};

use silt::SiltVec;
use silt_test_utils::{
    arm_default_fuse, default_created, default_live, CloneFuse, FlakyClone, FlakyDefault,
};

fn flaky_vec(len: u64, fuse: &CloneFuse) -> SiltVec<FlakyClone> {
    (0..len).map(|i| FlakyClone::new(i, fuse)).collect()
}

#[test]
fn clone_panic_leaves_the_source_intact() {
    let fuse = CloneFuse::arm(3);
    let source = flaky_vec(8, &fuse);

    let result = catch_unwind(AssertUnwindSafe(|| source.clone()));
    assert!(result.is_err());

    // All 8 originals are still live and unchanged; the 3 partial clones
    // were destroyed during the unwind.
    assert_eq!(source.len(), 8);
    for (i, elem) in source.iter().enumerate() {
        assert_eq!(elem.value(), i as u64);
    }
    assert_eq!(fuse.created(), 11);
    assert_eq!(fuse.live(), 8);
}

#[test]
fn clone_from_growth_panic_preserves_the_destination() {
    // Capacity suffices, so clone_from reuses storage: 4 prefix clones
    // succeed, then the suffix construction fails on its 3rd element.
    let fuse = CloneFuse::arm(4 + 2);
    let source = flaky_vec(12, &fuse);
    let mut destination = SiltVec::with_capacity(16);
    for i in 100..104u64 {
        destination.push(FlakyClone::new(i, &fuse));
    }

    let live_before = fuse.live();
    let result = catch_unwind(AssertUnwindSafe(|| destination.clone_from(&source)));
    assert!(result.is_err());

    // The destination length is unchanged and every element is live; the
    // prefix was overwritten (values now match the source), the partial
    // suffix was unwound.
    assert_eq!(destination.len(), 4);
    for (i, elem) in destination.iter().enumerate() {
        assert_eq!(elem.value(), i as u64);
    }
    assert_eq!(fuse.live(), live_before);
    drop(destination);
    drop(source);
    assert_eq!(fuse.live(), 0);
}

#[test]
fn clone_from_swap_path_panic_preserves_the_destination() {
    // Destination capacity is short, so clone_from builds a full fresh
    // copy before adopting it; a panic mid-copy leaves the destination
    // exactly as it was.
    let fuse = CloneFuse::arm(2);
    let source = flaky_vec(10, &fuse);
    let mut destination = flaky_vec(3, &fuse);

    let result = catch_unwind(AssertUnwindSafe(|| destination.clone_from(&source)));
    assert!(result.is_err());

    assert_eq!(destination.len(), 3);
    for (i, elem) in destination.iter().enumerate() {
        assert_eq!(elem.value(), i as u64);
    }
    assert_eq!(fuse.live(), 13);
}

#[test]
fn resize_panic_leaves_length_and_contents_unchanged() {
    arm_default_fuse(4);
    let mut v: SiltVec<FlakyDefault> = SiltVec::new();
    v.resize(3);
    assert_eq!(v.len(), 3);

    // Growing to 8 needs five more defaults but only one remains on the
    // fuse; the partial tail is unwound and the length stays 3.
    let result = catch_unwind(AssertUnwindSafe(|| v.resize(8)));
    assert!(result.is_err());
    assert_eq!(v.len(), 3);
    assert_eq!(default_created(), 4);
    assert_eq!(default_live(), 3);

    drop(v);
    assert_eq!(default_live(), 0);
}

#[test]
fn with_len_panic_leaks_nothing() {
    arm_default_fuse(2);
    let result = catch_unwind(|| SiltVec::<FlakyDefault>::with_len(5));
    assert!(result.is_err());
    assert_eq!(default_created(), 2);
    assert_eq!(default_live(), 0);
}

#[test]
fn extend_panic_keeps_the_constructed_prefix() {
    let fuse = CloneFuse::arm(3);
    let source = flaky_vec(6, &fuse);
    let mut v: SiltVec<FlakyClone> = SiltVec::new();

    let result = catch_unwind(AssertUnwindSafe(|| {
        v.extend(source.iter().map(|e| e.clone()));
    }));
    assert!(result.is_err());

    // Extend pushes one element at a time, so the three successful clones
    // are live in the vector and the vector is fully usable.
    assert_eq!(v.len(), 3);
    v.push(FlakyClone::new(50, &fuse));
    assert_eq!(v.len(), 4);
    drop(v);
    drop(source);
    assert_eq!(fuse.live(), 0);
}
