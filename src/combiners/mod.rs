//! Built-in collectors.
//!
//! These are reusable implementations of [`Collector`](crate::Collector):
//!
//! - [`DistinctBy`] -- one element per derived key, first-wins or last-wins.
//! - [`Averaging`] -- average reported in the value function's numeric type.
//! - [`Joining`] -- delimiter/prefix/suffix string joining that skips absent elements.
//! - [`GroupingBy`] -- per-key downstream reduction with null-tolerant keys.
//! - [`ToVec`], [`Counting`], [`Summing`] -- small building blocks, mostly useful
//!   as grouping downstreams.
//!
//! Each collector documents its accumulator type and output type.
//!
//! # Examples
//! ```
//! use ironfold::*;
//! use std::collections::BTreeMap;
//!
//! #[derive(Clone)]
//! struct Sale { region: Option<&'static str>, amount: i64 }
//!
//! let sales = vec![
//!     Sale { region: Some("north"), amount: 10 },
//!     Sale { region: None, amount: 7 },
//!     Sale { region: Some("north"), amount: 21 },
//! ];
//!
//! let avg_by_region = sales.into_iter().collect_with(grouping_by_into(
//!     |s: &Sale| s.region,
//!     BTreeMap::new,
//!     averaging(|s: &Sale| Some(s.amount)),
//! ));
//! assert_eq!(avg_by_region[&Some("north")], Some(15));
//! assert_eq!(avg_by_region[&None::<&str>], Some(7));
//! ```

mod basic;
mod distinct;
mod grouping;
mod joining;
mod statistical;

pub use basic::{Counting, SumAcc, Summing, ToVec, summing};
pub use distinct::{DistinctBy, distinct_by, distinct_by_first, distinct_by_last};
pub use grouping::{GroupingBy, grouping_by, grouping_by_into, grouping_by_with};
pub use joining::{Joinable, Joiner, Joining, Shown, joining, joining_with};
pub use statistical::{Averaging, averaging};
