//! Exact decimal coordinates with an explicit, per-build precision.
//!
//! Every arithmetic result is rounded to `precision` significant digits, ties away from zero.
//! Modulo is Euclidean and index division floors, both computed on aligned integer mantissas
//! so no intermediate rounding leaks into boundary decisions.

use std::num::NonZeroU32;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::foundation::error::{GridError, GridResult};

/// Number of significant decimal digits kept after every operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(into = "u32")]
pub struct Precision(NonZeroU32);

impl Precision {
    /// Precision used when none is configured.
    pub const DEFAULT_DIGITS: u32 = 16;
    /// Largest accepted precision. Division scales by `10^digits`, so this bounds its cost.
    pub const MAX_DIGITS: u32 = 1000;

    /// Validate `digits` against `1..=MAX_DIGITS`.
    pub fn new(digits: u64) -> GridResult<Self> {
        u32::try_from(digits)
            .ok()
            .filter(|&d| d <= Self::MAX_DIGITS)
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(GridError::InvalidPrecision(digits))
    }

    /// Significant digits.
    pub fn digits(self) -> u32 {
        self.0.get()
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(NonZeroU32::new(Self::DEFAULT_DIGITS).unwrap_or(NonZeroU32::MIN))
    }
}

impl From<Precision> for u32 {
    fn from(value: Precision) -> Self {
        value.digits()
    }
}

impl<'de> serde::Deserialize<'de> for Precision {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let digits = u64::deserialize(deserializer)?;
        Self::new(digits).map_err(serde::de::Error::custom)
    }
}

/// A real-valued coordinate held as an exact decimal.
///
/// Construction is exact; rounding only happens inside [`DecimalContext`] operations.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExactCoordinate(BigDecimal);

impl ExactCoordinate {
    /// Exact zero.
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    /// Exact integer value.
    pub fn from_integer(v: u64) -> Self {
        Self(BigDecimal::from(v))
    }

    /// Parse a plain decimal literal such as `"1.25"` or `"4"`.
    pub fn parse(s: &str) -> GridResult<Self> {
        BigDecimal::from_str(s.trim())
            .map(Self)
            .map_err(|e| GridError::validation(format!("'{s}' is not a decimal number: {e}")))
    }

    /// `true` for any representation of zero, whatever its scale.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Lossy conversion for geometry consumers; never used for alignment decisions.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// Borrow the underlying [`BigDecimal`].
    pub fn as_big_decimal(&self) -> &BigDecimal {
        &self.0
    }

    fn parts(&self) -> (BigInt, i64) {
        self.0.as_bigint_and_exponent()
    }
}

impl From<u32> for ExactCoordinate {
    fn from(value: u32) -> Self {
        Self::from_integer(u64::from(value))
    }
}

impl From<BigDecimal> for ExactCoordinate {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl FromStr for ExactCoordinate {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ExactCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_zero() {
            return f.write_str("0");
        }
        write!(f, "{}", self.0.normalized())
    }
}

impl serde::Serialize for ExactCoordinate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ExactCoordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Integer(u64),
            Float(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            Repr::Integer(v) => Ok(Self::from_integer(v)),
            // Shortest round-trip text, so `0.1` stays `0.1` instead of its binary expansion.
            Repr::Float(v) => Self::parse(&v.to_string()).map_err(serde::de::Error::custom),
        }
    }
}

/// Arithmetic context carrying the precision of one chain build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecimalContext {
    precision: Precision,
}

impl DecimalContext {
    /// Context rounding to `precision` significant digits.
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }

    /// Precision applied by every operation.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Round `v` to the context precision.
    pub fn round(&self, v: &ExactCoordinate) -> ExactCoordinate {
        let (mantissa, scale) = v.parts();
        ExactCoordinate(self.round_parts(mantissa, scale))
    }

    /// `a + b`, rounded.
    pub fn add(&self, a: &ExactCoordinate, b: &ExactCoordinate) -> ExactCoordinate {
        self.round(&ExactCoordinate(&a.0 + &b.0))
    }

    /// `a - b`, rounded.
    pub fn sub(&self, a: &ExactCoordinate, b: &ExactCoordinate) -> ExactCoordinate {
        self.round(&ExactCoordinate(&a.0 - &b.0))
    }

    /// `a * b`, rounded.
    pub fn mul(&self, a: &ExactCoordinate, b: &ExactCoordinate) -> ExactCoordinate {
        self.round(&ExactCoordinate(&a.0 * &b.0))
    }

    /// `a * n`, rounded.
    pub fn mul_int(&self, a: &ExactCoordinate, n: u64) -> ExactCoordinate {
        self.mul(a, &ExactCoordinate::from_integer(n))
    }

    /// `a / b` correctly rounded to the context precision.
    pub fn div(&self, a: &ExactCoordinate, b: &ExactCoordinate) -> GridResult<ExactCoordinate> {
        let (ma, sa) = a.parts();
        let (mb, sb) = b.parts();
        if mb.is_zero() {
            return Err(GridError::arithmetic(format!("division of {a} by zero")));
        }
        if ma.is_zero() {
            return Ok(ExactCoordinate::zero());
        }

        let negative = ma.is_negative() != mb.is_negative();
        let na = ma.abs();
        let nb = mb.abs();
        let digits = i64::from(self.precision.digits());

        // Scale so that the integer quotient carries `digits` or `digits + 1` digits.
        let k = digits + digit_count(&nb) as i64 - digit_count(&na) as i64;
        let (num, den) = if k >= 0 {
            (na * pow10(k as u64), nb)
        } else {
            (na, nb * pow10(k.unsigned_abs()))
        };
        let (q, r) = num.div_rem(&den);

        let extra = (digit_count(&q) as i64 - digits).max(0) as u64;
        let divisor = pow10(extra);
        let (mut q, low) = q.div_rem(&divisor);
        let discarded = low * &den + r;
        if (&discarded + &discarded) >= divisor * den {
            q += BigInt::one();
        }
        let q = if negative { -q } else { q };
        Ok(ExactCoordinate(BigDecimal::new(q, k + sa - sb - extra as i64)))
    }

    /// Euclidean remainder: always in `[0, |b|)`.
    pub fn rem_euclid(
        &self,
        a: &ExactCoordinate,
        b: &ExactCoordinate,
    ) -> GridResult<ExactCoordinate> {
        let (ma, mb, scale) = aligned(a, b);
        if mb.is_zero() {
            return Err(GridError::arithmetic(format!("modulo of {a} by zero")));
        }
        let r = ma.mod_floor(&mb.abs());
        Ok(ExactCoordinate(self.round_parts(r, scale)))
    }

    /// `floor(a / b)` computed exactly.
    pub fn div_floor(&self, a: &ExactCoordinate, b: &ExactCoordinate) -> GridResult<BigInt> {
        let (ma, mb, _) = aligned(a, b);
        if mb.is_zero() {
            return Err(GridError::arithmetic(format!(
                "integer division of {a} by zero"
            )));
        }
        Ok(ma.div_floor(&mb))
    }

    fn round_parts(&self, mantissa: BigInt, scale: i64) -> BigDecimal {
        let digits = u64::from(self.precision.digits());
        let count = digit_count(&mantissa);
        if count <= digits {
            return BigDecimal::new(mantissa, scale);
        }
        let drop = count - digits;
        let divisor = pow10(drop);
        let negative = mantissa.is_negative();
        let (mut q, r) = mantissa.abs().div_rem(&divisor);
        if (&r + &r) >= divisor {
            q += BigInt::one();
        }
        let q = if negative { -q } else { q };
        BigDecimal::new(q, scale - drop as i64)
    }
}

fn aligned(a: &ExactCoordinate, b: &ExactCoordinate) -> (BigInt, BigInt, i64) {
    let (ma, sa) = a.parts();
    let (mb, sb) = b.parts();
    let scale = sa.max(sb);
    let ma = ma * pow10((scale - sa) as u64);
    let mb = mb * pow10((scale - sb) as u64);
    (ma, mb, scale)
}

fn pow10(exp: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exp as usize)
}

fn digit_count(v: &BigInt) -> u64 {
    if v.is_zero() {
        return 1;
    }
    v.magnitude().to_str_radix(10).len() as u64
}

#[cfg(test)]
#[path = "../../tests/unit/exact/decimal.rs"]
mod tests;
