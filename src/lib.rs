//! # Ironfold
//!
//! A **fold/reduce framework** for Rust. A reduction is described once, as a
//! [`Collector`], and can then be driven sequentially, over partitions on a
//! thread pool, or nested inside another collector.
//!
//! ## Key Features
//!
//! - **Four-part contract** - `create`, `add_input`, `merge`, `finish`, plus
//!   [`Characteristics`] hints
//! - **Distinct by key** - first-wins or last-wins, absent keys allowed
//! - **Typed averaging** - the average comes back in the value function's own
//!   numeric type (`i32` in, `i32` out), computed through arbitrary-precision decimals
//! - **Joining** - delimiter, prefix and suffix; absent elements are skipped
//! - **Grouping** - per-key downstream collectors, `None` is a valid key,
//!   output into any map type
//! - **Reference runner** - sequential or rayon-partitioned execution with
//!   order-preserving merges
//!
//! ## Quick Start
//!
//! ```
//! use ironfold::*;
//!
//! let words = vec!["fig", "kiwi", "plum", "pear", "lime"];
//!
//! let by_len = words
//!     .clone()
//!     .into_iter()
//!     .collect_with(grouping_by_with(|w: &&str| w.len(), joining("/")));
//! assert_eq!(by_len[&3usize], "fig");
//! assert_eq!(by_len[&4usize], "kiwi/plum/pear/lime");
//!
//! let avg_len = words.into_iter().collect_with(averaging(|w: &&str| i32::try_from(w.len()).ok()));
//! assert_eq!(avg_len, Some(3));
//! ```
//!
//! ## Core Concepts
//!
//! ### Collector
//!
//! A [`Collector<T>`] owns no data itself. A driver asks it for an empty
//! accumulator, feeds elements into it, merges accumulators built on other
//! partitions, and finally turns the accumulator into the result. Merging
//! consumes the second accumulator, so each partition's state has exactly one
//! owner at any time.
//!
//! ### Absent values
//!
//! Absent keys and values are modelled with `Option`:
//! - distinct and grouping accept `Option<K>` keys; `None` is one bucket
//! - averaging takes `Fn(&T) -> Option<N>` and skips `None`
//! - joining skips elements whose [`Joinable::segment`] is `None`
//!
//! ### Numeric domains
//!
//! The [`numeric`] module maps every supported number type to a [`TypeTag`]
//! and narrows exact decimals back into that type. Integral targets truncate
//! toward zero and wrap; floating targets round to nearest.
//!
//! ### Execution Modes
//!
//! - **Sequential** - [`CollectExt::collect_with`] or [`Runner::sequential`]
//! - **Parallel** - [`Runner::parallel`], partitions accumulated with rayon
//!
//! Both produce the same result for any collector whose merge is associative.
//!
//! ## Module Overview
//!
//! - [`collector`] - the contract and closure-built collectors
//! - [`combiners`] - built-in collectors
//! - [`numeric`] - type tags and decimal narrowing
//! - [`runner`] - sequential and parallel drivers
//! - [`testing`] - helpers for testing collectors

pub mod collector;
pub mod combiners;
pub mod numeric;
pub mod runner;
pub mod testing;

// General re-exports
pub use collector::{Characteristics, Collector, FnCollector, collector_of, collector_of_identity};
pub use combiners::*;
pub use numeric::{Number, Numeric, TypeTag, convert, return_type_of};
pub use runner::{CollectExt, ExecMode, Runner};
