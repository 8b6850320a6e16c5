//! The collector contract.
//!
//! A [`Collector`] describes a terminal reduction as four parts:
//!
//! - `create` -- build an empty accumulator
//! - `add_input` -- absorb one element into an accumulator
//! - `merge` -- fold a second accumulator (from another partition) into the first
//! - `finish` -- turn the accumulator into the public result
//!
//! A driver calls `create` once per partition, `add_input` for every element of
//! that partition, `merge` to combine partitions (in any grouping, preserving
//! partition order) and `finish` exactly once. `finish(create())` is always
//! defined, so empty input never fails.
//!
//! Accumulators are owned by exactly one partition at a time. `merge` takes the
//! second accumulator by value and leaves the result in the first.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::BitOr;

/// Hints a collector gives its driver.
///
/// The flags are advisory. [`Runner`](crate::Runner) and the built-in
/// collectors never read them: partitions are always merged in source order
/// and no accumulator is shared between threads, whatever a collector
/// declares. A driver that does act on `UNORDERED` or `CONCURRENT` takes on
/// the obligation to check the collector really is order-insensitive or
/// thread-safe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Characteristics(u8);

impl Characteristics {
    /// `finish` is the identity; `Acc` and `Output` are the same type.
    pub const IDENTITY_FINISH: Self = Self(1);
    /// Result does not depend on encounter order.
    pub const UNORDERED: Self = Self(1 << 1);
    /// One accumulator may be fed from several threads.
    pub const CONCURRENT: Self = Self(1 << 2);

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Characteristics {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// A reduction over elements of type `T`.
///
/// - Accumulator: [`Collector::Acc`], opaque to callers
/// - Output: [`Collector::Output`]
///
/// Implementations provide no internal synchronization: one accumulator is
/// only ever touched by one thread at a time. `merge` must be associative.
pub trait Collector<T> {
    type Acc;
    type Output;

    fn create(&self) -> Self::Acc;

    fn add_input(&self, acc: &mut Self::Acc, input: T);

    fn merge(&self, acc: &mut Self::Acc, other: Self::Acc);

    fn finish(&self, acc: Self::Acc) -> Self::Output;

    fn characteristics(&self) -> Characteristics {
        Characteristics::empty()
    }
}

impl<T, C> Collector<T> for &C
where
    C: Collector<T> + ?Sized,
{
    type Acc = C::Acc;
    type Output = C::Output;

    fn create(&self) -> Self::Acc {
        (**self).create()
    }

    fn add_input(&self, acc: &mut Self::Acc, input: T) {
        (**self).add_input(acc, input);
    }

    fn merge(&self, acc: &mut Self::Acc, other: Self::Acc) {
        (**self).merge(acc, other);
    }

    fn finish(&self, acc: Self::Acc) -> Self::Output {
        (**self).finish(acc)
    }

    fn characteristics(&self) -> Characteristics {
        (**self).characteristics()
    }
}

/* ===================== FnCollector ===================== */

/// A collector assembled from four closures.
///
/// Build one with [`collector_of`] or [`collector_of_identity`].
pub struct FnCollector<T, A, R, S, Ac, Co, Fi> {
    supplier: S,
    accumulator: Ac,
    combiner: Co,
    finisher: Fi,
    characteristics: Characteristics,
    _m: PhantomData<fn(T, A) -> R>,
}

impl<T, A, R, S, Ac, Co, Fi> Clone for FnCollector<T, A, R, S, Ac, Co, Fi>
where
    S: Clone,
    Ac: Clone,
    Co: Clone,
    Fi: Clone,
{
    fn clone(&self) -> Self {
        Self {
            supplier: self.supplier.clone(),
            accumulator: self.accumulator.clone(),
            combiner: self.combiner.clone(),
            finisher: self.finisher.clone(),
            characteristics: self.characteristics,
            _m: PhantomData,
        }
    }
}

impl<T, A, R, S, Ac, Co, Fi> Collector<T> for FnCollector<T, A, R, S, Ac, Co, Fi>
where
    S: Fn() -> A,
    Ac: Fn(&mut A, T),
    Co: Fn(&mut A, A),
    Fi: Fn(A) -> R,
{
    type Acc = A;
    type Output = R;

    fn create(&self) -> A {
        (self.supplier)()
    }

    fn add_input(&self, acc: &mut A, input: T) {
        (self.accumulator)(acc, input);
    }

    fn merge(&self, acc: &mut A, other: A) {
        (self.combiner)(acc, other);
    }

    fn finish(&self, acc: A) -> R {
        (self.finisher)(acc)
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}

/// Build a collector from a supplier, an accumulator step, a combiner and a finisher.
///
/// ```
/// use ironfold::{collector_of, Characteristics, CollectExt};
///
/// let longest = collector_of(
///     || 0usize,
///     |acc: &mut usize, s: String| *acc = (*acc).max(s.len()),
///     |acc: &mut usize, other: usize| *acc = (*acc).max(other),
///     |acc: usize| acc,
///     Characteristics::UNORDERED,
/// );
/// let words = vec!["a".to_string(), "abc".to_string(), "ab".to_string()];
/// assert_eq!(words.into_iter().collect_with(&longest), 3);
/// ```
pub fn collector_of<T, A, R, S, Ac, Co, Fi>(
    supplier: S,
    accumulator: Ac,
    combiner: Co,
    finisher: Fi,
    characteristics: Characteristics,
) -> FnCollector<T, A, R, S, Ac, Co, Fi>
where
    S: Fn() -> A,
    Ac: Fn(&mut A, T),
    Co: Fn(&mut A, A),
    Fi: Fn(A) -> R,
{
    FnCollector {
        supplier,
        accumulator,
        combiner,
        finisher,
        characteristics,
        _m: PhantomData,
    }
}

/// Build a collector whose accumulator is its result.
///
/// The returned collector always reports [`Characteristics::IDENTITY_FINISH`].
pub fn collector_of_identity<T, A, S, Ac, Co>(
    supplier: S,
    accumulator: Ac,
    combiner: Co,
) -> FnCollector<T, A, A, S, Ac, Co, fn(A) -> A>
where
    S: Fn() -> A,
    Ac: Fn(&mut A, T),
    Co: Fn(&mut A, A),
{
    collector_of(
        supplier,
        accumulator,
        combiner,
        identity::<A> as fn(A) -> A,
        Characteristics::IDENTITY_FINISH,
    )
}

fn identity<A>(a: A) -> A {
    a
}
