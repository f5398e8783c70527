use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Serialize, Serializer};

/// A numeric field value read from the sample table.
///
/// Source tables contain blanks, `NA` markers and other junk in numeric
/// columns. Those are not rejected; they become [`Reading::NotANumber`] and
/// flow through samples and statistics unchanged. Range accumulators skip
/// them, frequency tables count them under their own key.
///
/// [`Reading::Number`] never holds NaN.
///
/// Readings are totally ordered: numbers ascending (`-0` equals `0`), with
/// `NotANumber` after every number.
#[derive(Debug, Clone, Copy, Default)]
pub enum Reading {
    Number(f64),
    #[default]
    NotANumber,
}

impl Reading {
    /// Parses the longest numeric prefix of `raw`.
    ///
    /// Leading whitespace is skipped, then an optional sign followed by either
    /// `Infinity` or a decimal literal with optional fraction and exponent.
    /// Trailing garbage is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapzone_stats::reading::Reading;
    ///
    /// assert_eq!(Reading::parse("42"), Reading::Number(42.0));
    /// assert_eq!(Reading::parse(" 1.5e2kg"), Reading::Number(150.0));
    /// assert_eq!(Reading::parse(".5"), Reading::Number(0.5));
    /// assert_eq!(Reading::parse("NA"), Reading::NotANumber);
    /// assert_eq!(Reading::parse(""), Reading::NotANumber);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim_start();
        let bytes = s.as_bytes();

        let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
        if s[end..].starts_with("Infinity") {
            return if s.starts_with('-') {
                Self::Number(f64::NEG_INFINITY)
            } else {
                Self::Number(f64::INFINITY)
            };
        }

        let int_digits = count_digits(&bytes[end..]);
        end += int_digits;
        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = count_digits(&bytes[end + 1..]);
            if int_digits > 0 || frac_digits > 0 {
                end += 1 + frac_digits;
            }
        }
        if int_digits == 0 && frac_digits == 0 {
            return Self::NotANumber;
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let exp_digits = count_digits(&bytes[exp_end..]);
            if exp_digits > 0 {
                end = exp_end + exp_digits;
            }
        }

        s[..end].parse::<f64>().map_or(Self::NotANumber, Self::from)
    }

    /// Parses an optional field; a missing field is not a number.
    #[must_use]
    pub fn parse_field(raw: Option<&str>) -> Self {
        raw.map_or(Self::NotANumber, Self::parse)
    }

    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v),
            Self::NotANumber => None,
        }
    }

    #[must_use]
    pub fn is_number(self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns `true` if this reading is a number equal to `expected`.
    #[must_use]
    #[expect(clippy::float_cmp)]
    pub fn is_exactly(self, expected: f64) -> bool {
        matches!(self, Self::Number(v) if v == expected)
    }

    /// Returns `true` if this reading is a number not below `bound`.
    #[must_use]
    pub fn is_at_least(self, bound: f64) -> bool {
        matches!(self, Self::Number(v) if v >= bound)
    }

    fn canonical_bits(v: f64) -> u64 {
        if v == 0.0 { 0.0_f64.to_bits() } else { v.to_bits() }
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::NotANumber
        } else {
            Self::Number(value)
        }
    }
}

impl Ord for Reading {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => {
                let a = if *a == 0.0 { 0.0 } else { *a };
                let b = if *b == 0.0 { 0.0 } else { *b };
                a.total_cmp(&b)
            }
            (Self::Number(_), Self::NotANumber) => Ordering::Less,
            (Self::NotANumber, Self::Number(_)) => Ordering::Greater,
            (Self::NotANumber, Self::NotANumber) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Reading {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Reading {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Reading {}

impl Hash for Reading {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Number(v) => {
                state.write_u8(0);
                state.write_u64(Self::canonical_bits(*v));
            }
            Self::NotANumber => state.write_u8(1),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => fmt::Display::fmt(v, f),
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}

impl Serialize for Reading {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Number(v) => serializer.serialize_f64(*v),
            Self::NotANumber => serializer.serialize_str("NaN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_parse_prefix() {
        assert_eq!(Reading::parse("12abc"), Reading::Number(12.0));
        assert_eq!(Reading::parse("-3.25"), Reading::Number(-3.25));
        assert_eq!(Reading::parse("+7"), Reading::Number(7.0));
        assert_eq!(Reading::parse("1."), Reading::Number(1.0));
        assert_eq!(Reading::parse("2e"), Reading::Number(2.0));
        assert_eq!(Reading::parse("2e-1x"), Reading::Number(0.2));
        assert_eq!(Reading::parse("  0.5  "), Reading::Number(0.5));
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(Reading::parse("Infinity"), Reading::Number(f64::INFINITY));
        assert_eq!(
            Reading::parse("-Infinityx"),
            Reading::Number(f64::NEG_INFINITY)
        );
        assert_eq!(Reading::parse("inf"), Reading::NotANumber);
    }

    #[test]
    fn test_parse_junk() {
        for raw in ["", " ", "NA", "-", ".", "+.", "e5", "abc", "NaN"] {
            assert_eq!(Reading::parse(raw), Reading::NotANumber, "{raw:?}");
        }
        assert_eq!(Reading::parse_field(None), Reading::NotANumber);
    }

    #[test]
    fn test_nan_never_stored_as_number() {
        assert_eq!(Reading::from(f64::NAN), Reading::NotANumber);
        assert!(!Reading::from(f64::NAN).is_number());
    }

    #[test]
    fn test_order_puts_not_a_number_last() {
        let mut readings = vec![
            Reading::NotANumber,
            Reading::Number(2.0),
            Reading::Number(-1.0),
            Reading::Number(0.5),
        ];
        readings.sort();
        assert_eq!(
            readings,
            vec![
                Reading::Number(-1.0),
                Reading::Number(0.5),
                Reading::Number(2.0),
                Reading::NotANumber,
            ]
        );
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(Reading::Number(-0.0), Reading::Number(0.0));
        let set = HashSet::from([Reading::Number(-0.0), Reading::Number(0.0)]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_bound_checks_reject_not_a_number() {
        assert!(Reading::Number(0.0).is_at_least(0.0));
        assert!(!Reading::Number(-0.1).is_at_least(0.0));
        assert!(!Reading::NotANumber.is_at_least(f64::NEG_INFINITY));
        assert!(Reading::parse("1").is_exactly(1.0));
        assert!(!Reading::NotANumber.is_exactly(1.0));
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&Reading::Number(1.5)).unwrap(), "1.5");
        assert_eq!(
            serde_json::to_string(&Reading::NotANumber).unwrap(),
            "\"NaN\""
        );
    }
}
