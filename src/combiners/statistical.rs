//! Statistical collectors: `Averaging`

use crate::collector::Collector;
use crate::numeric::{Numeric, convert, divide};
use std::marker::PhantomData;
use tracing::debug;

/* ===================== Averaging<N, F> ===================== */

/// Average of `value_fn(t)`, reported in the value function's own numeric type.
///
/// - Accumulator: `Vec<T>` (every element is buffered until `finish`)
/// - Output: `Option<N>`
///
/// The sum is taken in `N` (so fixed-width integers wrap like `N` does),
/// widened to an arbitrary-precision [`BigDecimal`](bigdecimal::BigDecimal),
/// divided by the number of elements that produced a value and narrowed back
/// to `N` via [`convert`] with `N::TAG`. Integral results therefore truncate
/// toward zero: the average of `1i32` and `2i32` is `1`. Floating results are
/// the nearest value to the decimal quotient, at any magnitude.
///
/// Returns `None` when no element produced a value, when the sum is not
/// finite (NaN or infinite floats, an overflowing fixed [`Decimal`]), or when
/// a fixed [`Decimal`] cannot hold the quotient.
///
/// [`Decimal`]: rust_decimal::Decimal
pub struct Averaging<N, F> {
    value_fn: F,
    _m: PhantomData<fn() -> N>,
}

impl<N, F: Clone> Clone for Averaging<N, F> {
    fn clone(&self) -> Self {
        Self {
            value_fn: self.value_fn.clone(),
            _m: PhantomData,
        }
    }
}

/// Average the values produced by `value_fn`; `None` values are skipped.
///
/// ```
/// use ironfold::{averaging, CollectExt};
///
/// let avg = vec![1, 2, 3].into_iter().collect_with(averaging(|x: &i32| Some(*x)));
/// assert_eq!(avg, Some(2));
///
/// let none: Option<f64> = Vec::<f64>::new().into_iter().collect_with(averaging(|x: &f64| Some(*x)));
/// assert_eq!(none, None);
/// ```
pub fn averaging<T, N, F>(value_fn: F) -> Averaging<N, F>
where
    N: Numeric,
    F: Fn(&T) -> Option<N>,
{
    Averaging {
        value_fn,
        _m: PhantomData,
    }
}

impl<N, F> Averaging<N, F>
where
    N: Numeric,
{
    fn average_of<T>(&self, rows: &[T]) -> Option<N>
    where
        F: Fn(&T) -> Option<N>,
    {
        let mut count = 0u64;
        let mut sum: Option<N> = None;
        for v in rows.iter().filter_map(|t| (self.value_fn)(t)) {
            count += 1;
            sum = match sum {
                None => Some(v),
                Some(cur) => match cur.accumulate(v) {
                    Some(next) => Some(next),
                    None => {
                        debug!(count, "average: sum left the numeric domain");
                        return None;
                    }
                },
            };
        }

        let Some(total) = sum?.to_decimal() else {
            debug!(count, "average: sum has no decimal form");
            return None;
        };
        let avg = N::from_number(convert(divide(&total, count), N::TAG));
        if avg.is_none() {
            debug!(count, tag = ?N::TAG, "average: quotient does not fit the value type");
        }
        avg
    }
}

impl<T, N, F> Collector<T> for Averaging<N, F>
where
    N: Numeric,
    F: Fn(&T) -> Option<N>,
{
    type Acc = Vec<T>;
    type Output = Option<N>;

    fn create(&self) -> Vec<T> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<T>, v: T) {
        acc.push(v);
    }

    fn merge(&self, acc: &mut Vec<T>, mut other: Vec<T>) {
        acc.append(&mut other);
    }

    fn finish(&self, acc: Vec<T>) -> Option<N> {
        self.average_of(&acc)
    }
}
