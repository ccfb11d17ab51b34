//! Typed interpretation of property strings.
//!
//! Records expose every property as a string. [`Value`] is the typed reading of
//! such a string according to the property's [`PropertyKind`], borrowed from the
//! original text where possible.

use std::cmp::Ordering;

use crate::property::PropertyKind;

/// Typed view of a property string.
///
/// # Example
///
/// ```
/// use loadout_seeker::{Number, PropertyKind, Value};
///
/// assert_eq!(Value::parse(PropertyKind::Integer, "42"), Value::Number(Number::I64(42)));
/// assert_eq!(Value::parse(PropertyKind::Bool, "true"), Value::Number(Number::I64(1)));
/// assert_eq!(Value::parse(PropertyKind::Text, "Steel"), Value::Text("Steel"));
/// assert_eq!(Value::parse(PropertyKind::Float, "garbage"), Value::None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Text value (borrowed).
    Text(&'a str),
    /// Numeric value. Booleans read as 0 / 1.
    Number(Number),
    /// Empty, unsupported, or unparsable for the property's kind.
    None,
}

impl<'a> Value<'a> {
    /// Interprets `raw` according to `kind`.
    ///
    /// Empty strings and numeric text that does not parse both become
    /// [`Value::None`].
    pub fn parse(kind: PropertyKind, raw: &'a str) -> Value<'a> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::None;
        }
        match kind {
            PropertyKind::Text => Value::Text(raw),
            PropertyKind::Bool => match parse_bool(trimmed) {
                Some(b) => Value::Number(Number::I64(b as i64)),
                None => Value::None,
            },
            PropertyKind::Integer | PropertyKind::Float => match Number::parse(trimmed) {
                Some(n) => Value::Number(n),
                None => Value::None,
            },
        }
    }

    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the text value, if present.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Parses the boolean spellings records use.
pub fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") || s == "1" {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") || s == "0" {
        Some(false)
    } else {
        None
    }
}

/// Numeric value.
///
/// Integers keep full precision as `I64`; anything with a fraction or an
/// exponent is `F64`. Mixed comparisons go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Finite 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Parses a number, rejecting NaN and infinities.
    pub fn parse(s: &str) -> Option<Number> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Some(Number::I64(n));
        }
        match s.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(Number::F64(f)),
            _ => None,
        }
    }

    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.cmp(&b),
            // Both sides are finite, so total_cmp agrees with partial_cmp.
            _ => self.to_f64().total_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(*other))
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}
