//! Testing utilities for collectors.
//!
//! This module helps users verify their own collectors (and compositions of
//! the built-in ones) against the collector contract:
//!
//! - **Partitioned runs**: [`collect_split`] accumulates every partition
//!   separately and merges them left to right, exactly as a partitioned
//!   driver would.
//! - **Assertions**: compare outputs and check that merging partial results
//!   agrees with a sequential run.
//!
//! # Quick Start
//!
//! ```
//! use ironfold::*;
//! use ironfold::testing::*;
//!
//! let join = joining_with(", ", "[", "]");
//! assert_merge_consistent(&join, vec![Some("a"), None], vec![Some("b")]);
//! assert_eq!(collect_split(&join, vec![vec![Some("a")], vec![], vec![Some("b")]]), "[a, b]");
//! ```
//!
//! # Assertion Functions
//!
//! - [`assert_collections_equal`]: exact order-dependent comparison
//! - [`assert_merge_consistent`]: split run equals sequential run
//! - [`assert_empty_input_defined`]: `finish(create())` matches an expected value

pub mod assertions;

pub use assertions::*;

use crate::collector::Collector;

/// Accumulate each partition on its own, merge the partial accumulators in
/// order and finish once.
///
/// An empty `partitions` list behaves like one empty partition.
pub fn collect_split<T, C>(collector: &C, partitions: Vec<Vec<T>>) -> C::Output
where
    C: Collector<T>,
{
    let mut merged: Option<C::Acc> = None;
    for part in partitions {
        let mut acc = collector.create();
        for v in part {
            collector.add_input(&mut acc, v);
        }
        match merged.as_mut() {
            Some(m) => collector.merge(m, acc),
            None => merged = Some(acc),
        }
    }
    let acc = merged.unwrap_or_else(|| collector.create());
    collector.finish(acc)
}
