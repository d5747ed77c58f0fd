//! Passing comparisons must not touch the heap; only a failure pays for rows,
//! snapshots and the report.
#![allow(unsafe_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use bufcheck_core::{
    check_any_equal, check_any_equal_either, check_elements_between, check_elements_equal,
    check_elements_equal_either, check_elements_equal_generated, check_elements_pass_predicate,
    AnyBuffer,
};

struct CountingAlloc;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|n| n.set(n.get() + 1));
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

/// Heap allocations made on this thread while `f` runs.
fn allocations<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let before = ALLOCATIONS.with(Cell::get);
    let out = f();
    let after = ALLOCATIONS.with(Cell::get);
    (out, after - before)
}

#[test]
fn counter_sees_allocations() {
    let (v, n) = allocations(|| vec![1u8, 2, 3]);
    assert_eq!(v.len(), 3);
    assert!(n >= 1);
}

#[test]
fn passing_typed_checks_do_not_allocate() {
    let actual = [0u32, 1, 2, 3];
    let expected = [0u32, 1, 2, 3];
    let other = [9u32, 9, 9, 9];

    let (r, n) = allocations(|| check_elements_equal(&actual, &expected));
    assert!(r.is_ok());
    assert_eq!(n, 0, "equal");

    let (r, n) = allocations(|| check_elements_between(&actual, (|_| 0, |_| 10)));
    assert!(r.is_ok());
    assert_eq!(n, 0, "between");

    let (r, n) = allocations(|| check_elements_equal_generated(&actual, |i| i as u32));
    assert!(r.is_ok());
    assert_eq!(n, 0, "generated");

    let (r, n) = allocations(|| check_elements_equal_either(&actual, [&other[..], &expected[..]]));
    assert!(r.is_ok());
    assert_eq!(n, 0, "either");

    let (r, n) =
        allocations(|| check_elements_pass_predicate(&actual, |i, v| v as usize == i, &[]));
    assert!(r.is_ok());
    assert_eq!(n, 0, "predicate");
}

#[test]
fn passing_runtime_tagged_checks_do_not_allocate() {
    let actual = AnyBuffer::from(vec![1.0f32, 2.0]);
    let expected = actual.clone();

    let (r, n) = allocations(|| check_any_equal(&actual, &expected));
    assert!(r.is_ok());
    assert_eq!(n, 0, "any equal");

    let (r, n) = allocations(|| check_any_equal_either(&actual, [&expected, &expected]));
    assert!(r.is_ok());
    assert_eq!(n, 0, "any either");
}

#[test]
fn failing_check_allocates_its_report() {
    let (r, n) = allocations(|| check_elements_equal(&[1u8, 2], &[1, 3]));
    assert!(r.is_err());
    assert!(n > 0);
}
