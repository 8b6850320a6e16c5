//! Delimiter joining: `Joining`, its `Joiner` accumulator and the `Joinable` element trait

use crate::collector::Collector;
use crate::numeric::Number;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::fmt;

/* ===================== Joinable ===================== */

/// An element that renders to a join segment.
///
/// `None` means "absent": the element is skipped entirely, without a
/// placeholder and without an extra delimiter.
pub trait Joinable {
    fn segment(&self) -> Option<Cow<'_, str>>;
}

impl Joinable for str {
    fn segment(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl Joinable for String {
    fn segment(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl<T: Joinable + ?Sized> Joinable for &T {
    fn segment(&self) -> Option<Cow<'_, str>> {
        (**self).segment()
    }
}

impl<T: Joinable + ?Sized> Joinable for Box<T> {
    fn segment(&self) -> Option<Cow<'_, str>> {
        (**self).segment()
    }
}

impl<T: Joinable> Joinable for Option<T> {
    fn segment(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(Joinable::segment)
    }
}

macro_rules! joinable_via_display {
    ($($ty:ty),* $(,)?) => {$(
        impl Joinable for $ty {
            fn segment(&self) -> Option<Cow<'_, str>> {
                Some(Cow::Owned(self.to_string()))
            }
        }
    )*};
}

joinable_via_display!(
    char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    Decimal, BigDecimal, BigInt, Number,
);

/// Join any [`Display`](fmt::Display) value by its formatted text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shown<T>(pub T);

impl<T: fmt::Display> Joinable for Shown<T> {
    fn segment(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.0.to_string()))
    }
}

/* ===================== Joiner ===================== */

/// A growing `prefix + a<delim>b<delim>c + suffix` string.
///
/// Prefix and suffix are applied once, at render time, so partial joiners
/// can be merged without duplicating them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Joiner {
    delimiter: String,
    prefix: String,
    suffix: String,
    body: Option<String>,
}

impl Joiner {
    #[must_use]
    pub fn new(
        delimiter: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            delimiter: delimiter.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            body: None,
        }
    }

    /// Append one segment, preceded by the delimiter unless it is the first.
    pub fn add(&mut self, segment: &str) -> &mut Self {
        match &mut self.body {
            Some(body) => {
                body.push_str(&self.delimiter);
                body.push_str(segment);
            }
            None => self.body = Some(segment.to_owned()),
        }
        self
    }

    /// Append the segments of `other` (without its prefix or suffix).
    ///
    /// The junction uses this joiner's delimiter; segments inside `other`
    /// keep the delimiter they were joined with.
    pub fn merge(&mut self, other: Self) -> &mut Self {
        if let Some(rest) = other.body {
            match &mut self.body {
                Some(body) => {
                    body.push_str(&self.delimiter);
                    body.push_str(&rest);
                }
                None => self.body = Some(rest),
            }
        }
        self
    }

    /// Whether no segment has been added yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.body.is_none()
    }

    /// Length in bytes of the rendered string.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefix.len() + self.body.as_ref().map_or(0, String::len) + self.suffix.len()
    }
}

impl fmt::Display for Joiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)?;
        if let Some(body) = &self.body {
            f.write_str(body)?;
        }
        f.write_str(&self.suffix)
    }
}

/* ===================== Joining ===================== */

/// Join elements into one `String`, skipping absent ones.
///
/// - Accumulator: [`Joiner`]
/// - Output: `String`
///
/// With no elements the result is exactly `prefix + suffix`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Joining {
    delimiter: String,
    prefix: String,
    suffix: String,
}

/// Join with `delimiter` and no prefix or suffix.
pub fn joining(delimiter: impl Into<String>) -> Joining {
    joining_with(delimiter, "", "")
}

/// Join with `delimiter`, wrapping the result in `prefix` and `suffix`.
///
/// ```
/// use ironfold::{joining_with, CollectExt};
///
/// let out = vec![Some("a"), None, Some("b")]
///     .into_iter()
///     .collect_with(joining_with(", ", "[", "]"));
/// assert_eq!(out, "[a, b]");
/// ```
pub fn joining_with(
    delimiter: impl Into<String>,
    prefix: impl Into<String>,
    suffix: impl Into<String>,
) -> Joining {
    Joining {
        delimiter: delimiter.into(),
        prefix: prefix.into(),
        suffix: suffix.into(),
    }
}

impl<T: Joinable> Collector<T> for Joining {
    type Acc = Joiner;
    type Output = String;

    fn create(&self) -> Joiner {
        Joiner::new(
            self.delimiter.clone(),
            self.prefix.clone(),
            self.suffix.clone(),
        )
    }

    fn add_input(&self, acc: &mut Joiner, v: T) {
        if let Some(segment) = v.segment() {
            acc.add(&segment);
        }
    }

    fn merge(&self, acc: &mut Joiner, other: Joiner) {
        acc.merge(other);
    }

    fn finish(&self, acc: Joiner) -> String {
        acc.to_string()
    }
}
