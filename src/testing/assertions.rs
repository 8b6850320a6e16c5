//! Assertion functions for testing collector outputs.

use crate::collector::Collector;
use crate::testing::collect_split;
use std::fmt::Debug;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use ironfold::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that reducing `left` and `right` separately and merging them gives
/// the same output as reducing `left ++ right` in one pass.
///
/// # Panics
///
/// Panics if the split result differs from the sequential one.
pub fn assert_merge_consistent<T, C>(collector: &C, left: Vec<T>, right: Vec<T>)
where
    T: Clone + Debug,
    C: Collector<T>,
    C::Output: Debug + PartialEq,
{
    let whole: Vec<T> = left.iter().chain(right.iter()).cloned().collect();
    let split = collect_split(collector, vec![left.clone(), right.clone()]);
    let sequential = collect_split(collector, vec![whole]);
    assert_eq!(
        split, sequential,
        "Merge mismatch:\n  Left: {left:?}\n  Right: {right:?}\n  Split result: {split:?}\n  Sequential result: {sequential:?}"
    );
}

/// Assert that a collector over no input finishes with `expected`.
///
/// # Panics
///
/// Panics if `finish(create())` differs from `expected`.
pub fn assert_empty_input_defined<T, C>(collector: &C, expected: &C::Output)
where
    C: Collector<T>,
    C::Output: Debug + PartialEq,
{
    let actual = collector.finish(collector.create());
    assert_eq!(
        &actual, expected,
        "Empty-input mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}
