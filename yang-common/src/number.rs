//! Arbitrary-sign integer / fixed-point decimal core (spec §3, §4.A).
//!
//! A [`Number`] is a tagged magnitude (`Positive`/`Negative`/`Min`/`Max`)
//! plus a `fraction_digits` scale: the magnitude is the value multiplied by
//! `10^fraction_digits`, so `Number { kind: Positive(314), fraction_digits: 2 }`
//! denotes `3.14`. Integers are simply `fraction_digits == 0`.
//!
//! `Min`/`Max` are domain sentinels (used for the `min`/`max` keywords in
//! range statements) and never carry a magnitude.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// The tagged magnitude of a [`Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumberKind {
    Positive(u64),
    Negative(u64),
    Min,
    Max,
}

/// A signed, fixed-point number with an explicit fractional scale.
///
/// `Positive(0)` and `Negative(0)` are distinct in representation (different
/// tags) but compare equal -- there is no signed zero in YANG's numeric
/// domain.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Number {
    pub kind: NumberKind,
    pub fraction_digits: u8,
}

/// The largest magnitude a decimal64 value can hold, regardless of scale:
/// `i64::MAX` as an unsigned scaled integer. Values produced by
/// [`Number::from_float`] that would exceed this are clamped to `Max`/`Min`.
const DECIMAL64_MAX_MAGNITUDE: u64 = i64::MAX as u64;
/// Magnitude bound for the negative side (`i64::MIN`'s absolute value).
const DECIMAL64_MIN_MAGNITUDE: u64 = i64::MAX as u64 + 1;

impl Number {
    pub fn from_int(value: i64, fraction_digits: u8) -> Self {
        if value < 0 {
            Number { kind: NumberKind::Negative(value.unsigned_abs()), fraction_digits }
        } else {
            Number { kind: NumberKind::Positive(value as u64), fraction_digits }
        }
    }

    pub fn from_uint(value: u64, fraction_digits: u8) -> Self {
        Number { kind: NumberKind::Positive(value), fraction_digits }
    }

    pub fn min_sentinel() -> Self {
        Number { kind: NumberKind::Min, fraction_digits: 0 }
    }

    pub fn max_sentinel() -> Self {
        Number { kind: NumberKind::Max, fraction_digits: 0 }
    }

    /// Re-stamp a `Min`/`Max` sentinel with a different `fraction_digits` so
    /// it compares cleanly against siblings produced by a decimal parse at
    /// that precision (spec §9, third open question).
    pub fn with_fraction_digits(self, fraction_digits: u8) -> Self {
        Number { kind: self.kind, fraction_digits }
    }

    /// Quantize an `f64` into a decimal `Number`, as used when a default
    /// numeric literal arrives via some other channel than the textual
    /// grammar. Multiplies by 10 until the fractional part vanishes or 18
    /// fraction digits are reached, then clamps magnitudes beyond the
    /// decimal64 domain to `Max`/`Min`.
    pub fn from_float(value: f64) -> Self {
        let negative = value.is_sign_negative() && value != 0.0;
        let mut v = value.abs();
        let mut fd: u8 = 0;
        while fd < 18 && (v - v.round()).abs() > 1e-9 {
            v *= 10.0;
            fd += 1;
        }
        v = v.round();
        let bound = if negative { DECIMAL64_MIN_MAGNITUDE } else { DECIMAL64_MAX_MAGNITUDE } as f64;
        if v > bound {
            return if negative { Self::min_sentinel() } else { Self::max_sentinel() };
        }
        let mag = v as u64;
        if negative {
            Number { kind: NumberKind::Negative(mag), fraction_digits: fd }
        } else {
            Number { kind: NumberKind::Positive(mag), fraction_digits: fd }
        }
    }

    /// Parse a YANG integer literal: optional leading `-`, then decimal
    /// digits only (YANG integers have no hex/octal/binary forms).
    pub fn parse_int(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("not a valid integer: {s:?}"));
        }
        let mag: u64 = digits
            .parse()
            .map_err(|_| format!("integer out of range: {s:?}"))?;
        if negative {
            Ok(Number { kind: NumberKind::Negative(mag), fraction_digits: 0 })
        } else {
            Ok(Number { kind: NumberKind::Positive(mag), fraction_digits: 0 })
        }
    }

    /// Parse a YANG `decimal64` literal at a fixed `fraction_digits` scale.
    /// Returns `Err` if the literal has more fractional digits than the
    /// declared scale (`OverPrecision`, spec §4.A).
    pub fn parse_decimal(s: &str, fraction_digits: u8) -> Result<Self, String> {
        let s = s.trim();
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (int_part, frac_part) = match rest.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rest, ""),
        };
        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("not a valid decimal: {s:?}"));
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("not a valid decimal: {s:?}"));
        }
        if frac_part.len() > fraction_digits as usize {
            return Err(format!(
                "{s:?} has too much precision for fraction-digits {fraction_digits}"
            ));
        }
        let int_val: u64 = int_part
            .parse()
            .map_err(|_| format!("decimal out of range: {s:?}"))?;
        let mut frac_digits_str = frac_part.to_string();
        while frac_digits_str.len() < fraction_digits as usize {
            frac_digits_str.push('0');
        }
        let frac_val: u64 = if frac_digits_str.is_empty() {
            0
        } else {
            frac_digits_str.parse().map_err(|_| format!("decimal out of range: {s:?}"))?
        };
        let scale = 10u64.checked_pow(fraction_digits as u32).unwrap_or(u64::MAX);
        let mag = int_val
            .checked_mul(scale)
            .and_then(|m| m.checked_add(frac_val))
            .ok_or_else(|| format!("decimal out of range: {s:?}"))?;
        if negative {
            Ok(Number { kind: NumberKind::Negative(mag), fraction_digits })
        } else {
            Ok(Number { kind: NumberKind::Positive(mag), fraction_digits })
        }
    }

    /// Logical signed value as `i128` at this number's own `fraction_digits`
    /// scale, or `None` for the `Min`/`Max` sentinels.
    fn signed_magnitude(&self) -> Option<i128> {
        match self.kind {
            NumberKind::Positive(m) => Some(m as i128),
            NumberKind::Negative(m) => Some(-(m as i128)),
            NumberKind::Min | NumberKind::Max => None,
        }
    }

    /// Compare two numbers, normalizing to the coarser-grained operand's
    /// `fraction_digits` by scaling the finer one up.
    fn cmp(&self, other: &Number) -> Ordering {
        match (self.kind, other.kind) {
            (NumberKind::Min, NumberKind::Min) => Ordering::Equal,
            (NumberKind::Max, NumberKind::Max) => Ordering::Equal,
            (NumberKind::Min, _) => Ordering::Less,
            (_, NumberKind::Min) => Ordering::Greater,
            (NumberKind::Max, _) => Ordering::Greater,
            (_, NumberKind::Max) => Ordering::Less,
            _ => {
                let fd = self.fraction_digits.max(other.fraction_digits);
                let a = self.signed_magnitude().unwrap()
                    * 10i128.pow((fd - self.fraction_digits) as u32);
                let b = other.signed_magnitude().unwrap()
                    * 10i128.pow((fd - other.fraction_digits) as u32);
                a.cmp(&b)
            }
        }
    }

    pub fn less(&self, other: &Number) -> bool {
        self.cmp(other) == Ordering::Less
    }

    pub fn equal(&self, other: &Number) -> bool {
        self.cmp(other) == Ordering::Equal
    }

    /// Integer part of the absolute value (0 for the `Min`/`Max` sentinels,
    /// which carry no magnitude).
    pub fn trunc(&self) -> u64 {
        let scale = 10u64.checked_pow(self.fraction_digits as u32).unwrap_or(1);
        match self.kind {
            NumberKind::Positive(m) | NumberKind::Negative(m) => m / scale.max(1),
            NumberKind::Min | NumberKind::Max => 0,
        }
    }

    /// Fractional part, normalized to 18 digits (e.g. `3.14` with
    /// `fraction_digits = 2` yields `140_000_000_000_000_000`).
    pub fn frac(&self) -> u64 {
        let scale = 10u64.checked_pow(self.fraction_digits as u32).unwrap_or(1);
        let frac = match self.kind {
            NumberKind::Positive(m) | NumberKind::Negative(m) => m % scale.max(1),
            NumberKind::Min | NumberKind::Max => 0,
        };
        let widen = 18u32.saturating_sub(self.fraction_digits as u32);
        frac.saturating_mul(10u64.checked_pow(widen).unwrap_or(u64::MAX))
    }

    /// Add `k` units of the lowest representable quantum at this number's
    /// scale, handling sign crossing. `Min`/`Max` sentinels are unaffected
    /// since they carry no magnitude to add to.
    pub fn add_quantum(&self, k: i64) -> Number {
        let fd = self.fraction_digits;
        match self.kind {
            NumberKind::Min | NumberKind::Max => *self,
            NumberKind::Positive(m) => {
                if k >= 0 {
                    Number { kind: NumberKind::Positive(m.saturating_add(k as u64)), fraction_digits: fd }
                } else {
                    let kk = k.unsigned_abs();
                    if kk <= m {
                        Number { kind: NumberKind::Positive(m - kk), fraction_digits: fd }
                    } else {
                        Number { kind: NumberKind::Negative(kk - m), fraction_digits: fd }
                    }
                }
            }
            NumberKind::Negative(m) => {
                if k <= 0 {
                    Number { kind: NumberKind::Negative(m.saturating_add(k.unsigned_abs())), fraction_digits: fd }
                } else {
                    let kk = k as u64;
                    if kk <= m {
                        Number { kind: NumberKind::Negative(m - kk), fraction_digits: fd }
                    } else {
                        Number { kind: NumberKind::Positive(kk - m), fraction_digits: fd }
                    }
                }
            }
        }
    }

    /// Losslessly convert to `i64`, or an error if the magnitude (at
    /// `fraction_digits == 0`) does not fit.
    pub fn to_int64(&self) -> Result<i64, String> {
        match self.kind {
            NumberKind::Min => Ok(i64::MIN),
            NumberKind::Max => Ok(i64::MAX),
            NumberKind::Positive(m) => {
                i64::try_from(m).map_err(|_| format!("{m} overflows i64"))
            }
            NumberKind::Negative(m) => {
                if m == 0 {
                    Ok(0)
                } else if m <= DECIMAL64_MIN_MAGNITUDE {
                    Ok(-(m as i128) as i64)
                } else {
                    Err(format!("-{m} overflows i64"))
                }
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NumberKind::Min => write!(f, "min"),
            NumberKind::Max => write!(f, "max"),
            NumberKind::Positive(m) | NumberKind::Negative(m) => {
                if matches!(self.kind, NumberKind::Negative(_)) && m != 0 {
                    write!(f, "-")?;
                }
                if self.fraction_digits == 0 {
                    write!(f, "{m}")
                } else {
                    let scale = 10u64.pow(self.fraction_digits as u32);
                    let int_part = m / scale;
                    let frac_part = m % scale;
                    write!(f, "{int_part}.{frac_part:0width$}", width = self.fraction_digits as usize)
                }
            }
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_and_negative_zero_compare_equal() {
        let a = Number { kind: NumberKind::Positive(0), fraction_digits: 0 };
        let b = Number { kind: NumberKind::Negative(0), fraction_digits: 0 };
        assert!(a.equal(&b));
    }

    #[test]
    fn trichotomy_holds() {
        let a = Number::from_int(-5, 0);
        let b = Number::from_int(3, 0);
        assert!(a.less(&b));
        assert!(!b.less(&a));
        assert!(!a.equal(&b));
    }

    #[test]
    fn min_max_sentinels_bound_everything() {
        let min = Number::min_sentinel();
        let max = Number::max_sentinel();
        let mid = Number::from_int(0, 0);
        assert!(min.less(&mid));
        assert!(mid.less(&max));
        assert!(min.less(&max));
    }

    #[test]
    fn add_quantum_crosses_sign_from_negative() {
        let n = Number::from_int(-2, 0);
        let r = n.add_quantum(5);
        assert_eq!(r.to_int64().unwrap(), 3);
    }

    #[test]
    fn add_quantum_crosses_sign_from_positive() {
        let n = Number::from_int(2, 0);
        let r = n.add_quantum(-5);
        assert_eq!(r.to_int64().unwrap(), -3);
    }

    #[test]
    fn parse_decimal_over_precision_errors() {
        assert!(Number::parse_decimal("1.2345", 2).is_err());
    }

    #[test]
    fn parse_decimal_pads_fraction() {
        let n = Number::parse_decimal("3.1", 3).unwrap();
        assert_eq!(n.to_string(), "3.100");
    }

    #[test]
    fn display_prepends_zero_for_empty_integer_part() {
        let n = Number::parse_decimal("0.1", 1).unwrap();
        assert_eq!(n.to_string(), "0.1");
    }

    #[test]
    fn trunc_and_frac() {
        let n = Number::parse_decimal("3.14", 2).unwrap();
        assert_eq!(n.trunc(), 3);
        assert_eq!(n.frac(), 140_000_000_000_000_000);
    }

    #[test]
    fn compare_across_fraction_digits() {
        let coarse = Number::from_int(1, 0);
        let fine = Number::parse_decimal("1.000", 3).unwrap();
        assert!(coarse.equal(&fine));
    }
}
