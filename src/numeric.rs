//! Numeric type tags and decimal narrowing.
//!
//! Averages are computed in arbitrary-precision decimal arithmetic and then
//! narrowed back to the numeric type the caller's value function produces.
//! This module holds the pieces for that round trip:
//!
//! - [`TypeTag`]: a closed set of target numeric kinds.
//! - [`Number`]: a value of one of those kinds (plus a raw [`BigDecimal`]).
//! - [`convert`]: look up the narrowing for a tag in a static table; unknown
//!   tags pass the decimal through unchanged.
//! - [`Numeric`]: implemented by every type an average can be taken over. Its
//!   associated [`Numeric::TAG`] replaces runtime return-type inspection.
//! - [`divide`]: decimal quotient with a fixed number of extra fraction digits.
//!
//! Narrowing follows the target's own rules: integral kinds truncate toward
//! zero and then wrap to their width, floating kinds round to nearest.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, Sign};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fraction digits a quotient carries beyond those of its dividend.
pub const QUOTIENT_DIGITS: u32 = 40;

/// Target numeric kind for a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Byte,
    Short,
    Int,
    BigInteger,
    Long,
    Float,
    Double,
    /// No conversion registered; values stay decimal.
    Unknown,
}

/// A converted numeric value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Number {
    Byte(i8),
    Short(i16),
    Int(i32),
    BigInteger(BigInt),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(BigDecimal),
}

impl Number {
    /// The tag this value was produced for.
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        match self {
            Self::Byte(_) => TypeTag::Byte,
            Self::Short(_) => TypeTag::Short,
            Self::Int(_) => TypeTag::Int,
            Self::BigInteger(_) => TypeTag::BigInteger,
            Self::Long(_) => TypeTag::Long,
            Self::Float(_) => TypeTag::Float,
            Self::Double(_) => TypeTag::Double,
            Self::Decimal(_) => TypeTag::Unknown,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::BigInteger(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
        }
    }
}

/// `total / count`, truncated after `QUOTIENT_DIGITS` extra fraction digits.
///
/// The integral part is always exact, so truncating narrowings see the true
/// quotient. `count` must be non-zero.
///
/// ```
/// use bigdecimal::BigDecimal;
/// use ironfold::numeric::divide;
///
/// assert_eq!(divide(&BigDecimal::from(3), 2), "1.5".parse::<BigDecimal>().unwrap());
/// ```
#[must_use]
pub fn divide(total: &BigDecimal, count: u64) -> BigDecimal {
    let (digits, scale) = total.as_bigint_and_exponent();
    let widened = digits * BigInt::from(10u8).pow(QUOTIENT_DIGITS);
    let quotient = widened / BigInt::from(count);
    BigDecimal::new(quotient, scale + i64::from(QUOTIENT_DIGITS)).normalized()
}

/* ===================== conversion table ===================== */

type Narrowing = fn(&BigDecimal) -> Number;

fn truncated(value: &BigDecimal) -> BigInt {
    let (whole, _) = value
        .with_scale_round(0, RoundingMode::Down)
        .into_bigint_and_exponent();
    whole
}

// Low 64 bits in two's complement, like a narrowing primitive cast.
#[allow(clippy::cast_possible_wrap)]
fn wrapped(value: &BigDecimal) -> i64 {
    let (sign, words) = truncated(value).to_u64_digits();
    let low = words.first().copied().unwrap_or_default();
    let bits = if sign == Sign::Minus { low.wrapping_neg() } else { low };
    bits as i64
}

#[allow(clippy::cast_possible_truncation)]
fn to_byte(value: &BigDecimal) -> Number {
    Number::Byte(wrapped(value) as i8)
}

#[allow(clippy::cast_possible_truncation)]
fn to_short(value: &BigDecimal) -> Number {
    Number::Short(wrapped(value) as i16)
}

#[allow(clippy::cast_possible_truncation)]
fn to_int(value: &BigDecimal) -> Number {
    Number::Int(wrapped(value) as i32)
}

fn to_big_integer(value: &BigDecimal) -> Number {
    Number::BigInteger(truncated(value))
}

fn to_long(value: &BigDecimal) -> Number {
    Number::Long(wrapped(value))
}

// Parsing the decimal text rounds to nearest in one step.
fn to_float(value: &BigDecimal) -> Number {
    Number::Float(value.to_string().parse().unwrap_or(f32::NAN))
}

fn to_double(value: &BigDecimal) -> Number {
    Number::Double(value.to_string().parse().unwrap_or(f64::NAN))
}

static CONVERSIONS: [(TypeTag, Narrowing); 7] = [
    (TypeTag::Byte, to_byte),
    (TypeTag::Short, to_short),
    (TypeTag::Int, to_int),
    (TypeTag::BigInteger, to_big_integer),
    (TypeTag::Long, to_long),
    (TypeTag::Float, to_float),
    (TypeTag::Double, to_double),
];

/// Narrow `value` to the numeric kind named by `tag`.
///
/// Tags without a table entry return the decimal unchanged.
///
/// ```
/// use bigdecimal::BigDecimal;
/// use ironfold::numeric::{convert, Number, TypeTag};
///
/// let d: BigDecimal = "1.5".parse().unwrap();
/// assert_eq!(convert(d.clone(), TypeTag::Int), Number::Int(1));
/// assert_eq!(convert(d.clone(), TypeTag::Double), Number::Double(1.5));
/// assert_eq!(convert(d.clone(), TypeTag::Unknown), Number::Decimal(d));
/// ```
#[must_use]
pub fn convert(value: BigDecimal, tag: TypeTag) -> Number {
    match CONVERSIONS.iter().find(|(t, _)| *t == tag) {
        Some((_, narrow)) => narrow(&value),
        None => Number::Decimal(value),
    }
}

/* ===================== Numeric ===================== */

/// A numeric type that can be summed, widened to [`BigDecimal`] and narrowed back.
pub trait Numeric: Sized {
    /// Which conversion turns a decimal back into `Self`.
    const TAG: TypeTag;

    /// Add with this type's own semantics. `None` means the sum is unusable.
    fn accumulate(self, rhs: Self) -> Option<Self>;

    /// Widen to an exact decimal. `None` when the value has no decimal form.
    fn to_decimal(&self) -> Option<BigDecimal>;

    /// Extract `Self` from a converted number of the matching kind.
    fn from_number(number: Number) -> Option<Self>;
}

/// The numeric kind a value function produces.
pub fn return_type_of<T, N, F>(_value_fn: &F) -> TypeTag
where
    N: Numeric,
    F: Fn(&T) -> Option<N>,
{
    N::TAG
}

macro_rules! integral {
    ($($ty:ty => $tag:ident),* $(,)?) => {$(
        impl Numeric for $ty {
            const TAG: TypeTag = TypeTag::$tag;

            fn accumulate(self, rhs: Self) -> Option<Self> {
                Some(self.wrapping_add(rhs))
            }

            fn to_decimal(&self) -> Option<BigDecimal> {
                Some(BigDecimal::from(*self))
            }

            fn from_number(number: Number) -> Option<Self> {
                match number {
                    Number::$tag(v) => Some(v),
                    _ => None,
                }
            }
        }
    )*};
}

integral!(i8 => Byte, i16 => Short, i32 => Int, i64 => Long);

macro_rules! floating {
    ($($ty:ty => $tag:ident),* $(,)?) => {$(
        impl Numeric for $ty {
            const TAG: TypeTag = TypeTag::$tag;

            fn accumulate(self, rhs: Self) -> Option<Self> {
                Some(self + rhs)
            }

            // Shortest round-trip text, so 0.1 widens to exactly 0.1.
            fn to_decimal(&self) -> Option<BigDecimal> {
                if !self.is_finite() {
                    return None;
                }
                BigDecimal::from_str(&self.to_string()).ok()
            }

            fn from_number(number: Number) -> Option<Self> {
                match number {
                    Number::$tag(v) => Some(v),
                    _ => None,
                }
            }
        }
    )*};
}

floating!(f32 => Float, f64 => Double);

impl Numeric for BigInt {
    const TAG: TypeTag = TypeTag::BigInteger;

    fn accumulate(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }

    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(BigDecimal::from(self.clone()))
    }

    fn from_number(number: Number) -> Option<Self> {
        match number {
            Number::BigInteger(v) => Some(v),
            _ => None,
        }
    }
}

impl Numeric for BigDecimal {
    const TAG: TypeTag = TypeTag::Unknown;

    fn accumulate(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }

    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(self.clone())
    }

    fn from_number(number: Number) -> Option<Self> {
        match number {
            Number::Decimal(v) => Some(v),
            _ => None,
        }
    }
}

/// Fixed 28-digit decimals sum with overflow checks and come back rounded to
/// their own precision.
impl Numeric for Decimal {
    const TAG: TypeTag = TypeTag::Unknown;

    fn accumulate(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }

    fn to_decimal(&self) -> Option<BigDecimal> {
        BigDecimal::from_str(&self.to_string()).ok()
    }

    fn from_number(number: Number) -> Option<Self> {
        match number {
            Number::Decimal(v) => {
                let text = v.with_prec(28).normalized().to_string();
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .ok()
            }
            _ => None,
        }
    }
}
