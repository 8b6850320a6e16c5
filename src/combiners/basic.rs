//! Basic downstream collectors: `ToVec`, `Counting`, `Summing`

use crate::collector::{Characteristics, Collector};
use crate::numeric::Numeric;
use std::marker::PhantomData;

/* ===================== ToVec ===================== */

/// Collect elements into a `Vec<T>` in encounter order.
///
/// - Accumulator: `Vec<T>`
/// - Output: `Vec<T>` (identity finish)
#[derive(Clone, Copy, Debug, Default)]
pub struct ToVec;

impl<T> Collector<T> for ToVec {
    type Acc = Vec<T>;
    type Output = Vec<T>;

    fn create(&self) -> Vec<T> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<T>, v: T) {
        acc.push(v);
    }

    fn merge(&self, acc: &mut Vec<T>, mut other: Vec<T>) {
        if acc.is_empty() {
            *acc = other;
        } else {
            acc.append(&mut other);
        }
    }

    fn finish(&self, acc: Vec<T>) -> Vec<T> {
        acc
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IDENTITY_FINISH
    }
}

/* ===================== Counting ===================== */

/// Number of elements absorbed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counting;

impl<T> Collector<T> for Counting {
    type Acc = u64;
    type Output = u64;

    fn create(&self) -> u64 {
        0
    }

    fn add_input(&self, acc: &mut u64, _v: T) {
        *acc += 1;
    }

    fn merge(&self, acc: &mut u64, other: u64) {
        *acc += other;
    }

    fn finish(&self, acc: u64) -> u64 {
        acc
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IDENTITY_FINISH | Characteristics::UNORDERED
    }
}

/* ===================== Summing<N> ===================== */

/// Sum of `value_fn(t)` over all elements, skipping `None`.
///
/// - Accumulator: `Option<N>` (`None` until a value is seen, or once the sum
///   becomes unusable)
/// - Output: `Option<N>`
///
/// Addition follows [`Numeric::accumulate`], so fixed-width integers wrap.
pub struct Summing<N, F> {
    value_fn: F,
    _m: PhantomData<fn() -> N>,
}

impl<N, F: Clone> Clone for Summing<N, F> {
    fn clone(&self) -> Self {
        Self {
            value_fn: self.value_fn.clone(),
            _m: PhantomData,
        }
    }
}

/// Sum the values produced by `value_fn`.
pub fn summing<T, N, F>(value_fn: F) -> Summing<N, F>
where
    N: Numeric,
    F: Fn(&T) -> Option<N>,
{
    Summing {
        value_fn,
        _m: PhantomData,
    }
}

/// Accumulator for [`Summing`].
#[derive(Clone, Debug, PartialEq)]
pub struct SumAcc<N> {
    sum: Option<N>,
    unusable: bool,
}

impl<N: Numeric> SumAcc<N> {
    fn push(&mut self, v: N) {
        if self.unusable {
            return;
        }
        self.sum = match self.sum.take() {
            None => Some(v),
            Some(cur) => {
                let next = cur.accumulate(v);
                self.unusable = next.is_none();
                next
            }
        };
    }
}

impl<T, N, F> Collector<T> for Summing<N, F>
where
    N: Numeric,
    F: Fn(&T) -> Option<N>,
{
    type Acc = SumAcc<N>;
    type Output = Option<N>;

    fn create(&self) -> SumAcc<N> {
        SumAcc {
            sum: None,
            unusable: false,
        }
    }

    fn add_input(&self, acc: &mut SumAcc<N>, t: T) {
        if let Some(v) = (self.value_fn)(&t) {
            acc.push(v);
        }
    }

    fn merge(&self, acc: &mut SumAcc<N>, other: SumAcc<N>) {
        if other.unusable {
            acc.unusable = true;
            acc.sum = None;
        } else if let Some(v) = other.sum {
            acc.push(v);
        }
    }

    fn finish(&self, acc: SumAcc<N>) -> Option<N> {
        if acc.unusable { None } else { acc.sum }
    }
}
