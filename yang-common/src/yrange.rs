//! Numeric ranges: `YRange` (one `lo..hi` part) and `YangRange` (a sorted,
//! coalesced sequence of them), plus the `range`/`length` grammar parser
//! (spec §3, §4.A).

use std::fmt;

use crate::number::Number;

/// A single `lo..hi` (or single-value) range part. Valid iff `min <= max`.
#[derive(Debug, Clone, Copy)]
pub struct YRange {
    pub min: Number,
    pub max: Number,
}

impl YRange {
    pub fn new(min: Number, max: Number) -> Self {
        Self { min, max }
    }

    pub fn single(value: Number) -> Self {
        Self { min: value, max: value }
    }

    pub fn is_valid(&self) -> bool {
        !self.max.less(&self.min)
    }

    pub fn equal(&self, other: &YRange) -> bool {
        self.min.equal(&other.min) && self.max.equal(&other.max)
    }
}

/// An ordered, non-overlapping, coalesced sequence of [`YRange`]s.
#[derive(Debug, Clone, Default)]
pub struct YangRange {
    parts: Vec<YRange>,
}

/// Errors produced while parsing or validating a range/length grammar
/// string (spec §4.A).
#[derive(Debug, Clone, PartialEq)]
pub enum RangeError {
    TooManyDots(String),
    OutOfOrder { part: String },
    OverPrecision(String),
    NegativeLength(String),
    Empty,
    NotInParent,
    Malformed(String),
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::TooManyDots(part) => write!(f, "too many dots in range part: {part:?}"),
            RangeError::OutOfOrder { part } => write!(f, "range part out of order: {part:?}"),
            RangeError::OverPrecision(part) => {
                write!(f, "{part:?} has too much precision")
            }
            RangeError::NegativeLength(part) => write!(f, "negative length: {part:?}"),
            RangeError::Empty => write!(f, "empty range expression"),
            RangeError::NotInParent => write!(f, "range is not within the parent type's range"),
            RangeError::Malformed(part) => write!(f, "malformed range part: {part:?}"),
        }
    }
}

impl std::error::Error for RangeError {}

/// The `min`/`max` endpoints a bare `min`/`max` keyword resolves to while
/// parsing one range expression: either the builtin type's domain, or (for
/// a restriction clause) the parent range's own bounds.
#[derive(Debug, Clone, Copy)]
pub struct RangeDomain {
    pub min: Number,
    pub max: Number,
}

impl YangRange {
    pub fn from_parts(mut parts: Vec<YRange>) -> Self {
        parts.sort_by(|a, b| a.min.cmp_for_sort(&b.min));
        Self { parts }
    }

    pub fn parts(&self) -> &[YRange] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Fold adjacent/overlapping parts (after sorting) into the minimal
    /// equivalent set. `r[i+1]` merges into `r[i]` whenever
    /// `r[i].max.add_quantum(1) >= r[i+1].min`.
    pub fn coalesce(mut self) -> Self {
        self.parts.sort_by(|a, b| a.min.cmp_for_sort(&b.min));
        let mut out: Vec<YRange> = Vec::with_capacity(self.parts.len());
        for part in self.parts.into_iter() {
            if let Some(last) = out.last_mut() {
                if !last.max.add_quantum(1).less(&part.min) {
                    if last.max.less(&part.max) {
                        last.max = part.max;
                    }
                    continue;
                }
            }
            out.push(part);
        }
        Self { parts: out }
    }

    /// `Ok(())` iff every part is individually valid (`min <= max`) and
    /// consecutive parts are properly separated: `r[i].max.add_quantum(1) <
    /// r[i+1].min`.
    pub fn validate(&self) -> Result<(), RangeError> {
        for part in &self.parts {
            if !part.is_valid() {
                return Err(RangeError::OutOfOrder { part: format!("{}..{}", part.min, part.max) });
            }
        }
        for pair in self.parts.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if !a.max.add_quantum(1).less(&b.min) {
                return Err(RangeError::OutOfOrder {
                    part: format!("{}..{} overlaps {}..{}", a.min, a.max, b.min, b.max),
                });
            }
        }
        Ok(())
    }

    /// Strict containment: every part of `sub` must lie entirely within
    /// some part of `self`.
    pub fn contains(&self, sub: &YangRange) -> bool {
        sub.parts.iter().all(|s| {
            self.parts.iter().any(|r| !s.min.less(&r.min) && !r.max.less(&s.max))
        })
    }

    /// Permissive containment matching the upstream behaviour spec §9
    /// flags as possibly buggy: short-circuits to `true` whenever either
    /// side spans the full `min..max` domain, even if the other side has
    /// bounded parts outside of it. Kept distinct from [`Self::contains`]
    /// so callers opt in explicitly; not used by any call site in this
    /// workspace other than documentation/tests, preserved for parity with
    /// the reference implementation's historical behaviour.
    pub fn contains_permissive(&self, sub: &YangRange) -> bool {
        let spans_domain = |r: &YangRange| {
            r.parts.len() == 1
                && matches!(r.parts[0].min.kind, crate::number::NumberKind::Min)
                && matches!(r.parts[0].max.kind, crate::number::NumberKind::Max)
        };
        if spans_domain(self) || spans_domain(sub) {
            return true;
        }
        self.contains(sub)
    }

    pub fn equal(&self, other: &YangRange) -> bool {
        self.parts.len() == other.parts.len()
            && self.parts.iter().zip(other.parts.iter()).all(|(a, b)| a.equal(b))
    }
}

impl Number {
    /// Total ordering helper for sorting, treating `Min < Negative < Positive < Max`.
    fn cmp_for_sort(&self, other: &Number) -> std::cmp::Ordering {
        if self.less(other) {
            std::cmp::Ordering::Less
        } else if other.less(self) {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    }
}

/// Parse a pipe-separated range/length expression: one or more parts, each
/// either a single number or `lo..hi`; `min`/`max` stand in for `domain`'s
/// endpoints. Leading/trailing ASCII whitespace is stripped per side.
///
/// `decimal` selects `Number::parse_decimal(_, frac_digits)` over
/// `Number::parse_int` for each endpoint. Integer use (e.g. `length`)
/// additionally rejects negative values via `reject_negative`.
pub fn parse_ranges(
    s: &str,
    decimal: bool,
    frac_digits: u8,
    domain: RangeDomain,
    reject_negative: bool,
) -> Result<YangRange, RangeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(RangeError::Empty);
    }
    let mut parts = Vec::new();
    for raw_part in s.split('|') {
        let part = raw_part.trim();
        if part.is_empty() {
            return Err(RangeError::Malformed(raw_part.to_string()));
        }
        let dot_count = part.matches("..").count();
        if dot_count > 1 {
            return Err(RangeError::TooManyDots(part.to_string()));
        }
        let (lo_str, hi_str) = if dot_count == 1 {
            let idx = part.find("..").unwrap();
            (part[..idx].trim(), Some(part[idx + 2..].trim()))
        } else {
            (part, None)
        };
        let lo = parse_endpoint(lo_str, decimal, frac_digits, domain)?;
        let hi = match hi_str {
            Some(h) => parse_endpoint(h, decimal, frac_digits, domain)?,
            None => lo,
        };
        if reject_negative {
            for n in [&lo, &hi] {
                if matches!(n.kind, crate::number::NumberKind::Negative(m) if m != 0) {
                    return Err(RangeError::NegativeLength(part.to_string()));
                }
            }
        }
        let range = YRange::new(lo, hi);
        if !range.is_valid() {
            return Err(RangeError::OutOfOrder { part: part.to_string() });
        }
        parts.push(range);
    }
    let range = YangRange::from_parts(parts).coalesce();
    range.validate()?;
    Ok(range)
}

fn parse_endpoint(
    s: &str,
    decimal: bool,
    frac_digits: u8,
    domain: RangeDomain,
) -> Result<Number, RangeError> {
    match s {
        "min" => Ok(domain.min.with_fraction_digits(frac_digits)),
        "max" => Ok(domain.max.with_fraction_digits(frac_digits)),
        _ if decimal => Number::parse_decimal(s, frac_digits)
            .map_err(|_| RangeError::OverPrecision(s.to_string())),
        _ => Number::parse_int(s).map_err(|e| RangeError::Malformed(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_domain() -> RangeDomain {
        RangeDomain { min: Number::min_sentinel(), max: Number::max_sentinel() }
    }

    #[test]
    fn coalesce_merges_adjacent_and_overlapping() {
        let range = parse_ranges("4..5|0|2..3", false, 0, int_domain(), false).unwrap();
        let parts = range.parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].min.to_int64().unwrap(), 0);
        assert_eq!(parts[0].max.to_int64().unwrap(), 0);
        assert_eq!(parts[1].min.to_int64().unwrap(), 2);
        assert_eq!(parts[1].max.to_int64().unwrap(), 5);
    }

    #[test]
    fn too_many_dots_rejected() {
        let err = parse_ranges("1....5", false, 0, int_domain(), false).unwrap_err();
        assert!(matches!(err, RangeError::TooManyDots(_)));
    }

    #[test]
    fn out_of_order_rejected() {
        let err = parse_ranges("5..1", false, 0, int_domain(), false).unwrap_err();
        assert!(matches!(err, RangeError::OutOfOrder { .. }));
    }

    #[test]
    fn negative_length_rejected() {
        let err = parse_ranges("-1..5", false, 0, int_domain(), true).unwrap_err();
        assert!(matches!(err, RangeError::NegativeLength(_)));
    }

    #[test]
    fn decimal_range_containment() {
        let domain = RangeDomain { min: Number::min_sentinel(), max: Number::max_sentinel() };
        let parent = parse_ranges("min..max", true, 3, domain, false).unwrap();
        let child_domain = RangeDomain { min: parent.parts()[0].min, max: parent.parts()[0].max };
        let child = parse_ranges("1..3.14", true, 3, child_domain, false).unwrap();
        assert!(parent.contains(&child));
        assert_eq!(child.parts()[0].min.to_string(), "1.000");
        assert_eq!(child.parts()[0].max.to_string(), "3.140");
    }

    #[test]
    fn decimal_over_precision_is_an_error() {
        let domain = int_domain();
        let err = parse_ranges("1..3.14", true, 1, domain, false).unwrap_err();
        assert!(matches!(err, RangeError::OverPrecision(_)));
    }

    #[test]
    fn validate_accepts_sorted_coalesced() {
        let range = parse_ranges("1..3|10..20", false, 0, int_domain(), false).unwrap();
        assert!(range.validate().is_ok());
    }
}
