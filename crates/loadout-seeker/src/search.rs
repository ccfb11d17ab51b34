//! The search query language.
//!
//! A [`SearchQuery`] is compiled from the raw text of a search box and tested
//! against one property of each record. Operators are recognized in this order:
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `"Steel"` | exact match of the quoted text |
//! | `>10`, `<10` | numeric greater-than / less-than |
//! | `==Steel` | exact match of the text after `==` |
//! | `!=Steel` | anything except the text after `!=` |
//! | `%^st.*d$` | case-insensitive regular expression |
//! | `steel` | substring containment |
//!
//! All text comparisons are case-insensitive. An empty query matches every
//! record. A query that cannot be evaluated (bad regex, non-numeric operand)
//! matches nothing instead of failing.

use regex::{Regex, RegexBuilder};

use crate::error::{Result, SeekerError};
use crate::property::{PropertyId, PropertyKind};
use crate::record::Record;
use crate::value::{parse_bool, Number};

/// A compiled search query.
#[derive(Debug, Clone, Default)]
pub enum SearchQuery {
    /// Empty input. Matches everything.
    #[default]
    All,
    /// Quoted input: exact match (lowercased).
    Exact(String),
    /// `>n`: numeric greater-than.
    Greater(Number),
    /// `<n`: numeric less-than.
    Less(Number),
    /// `==text`: exact match (lowercased).
    Equals(String),
    /// `!=text`: inequality (lowercased).
    NotEquals(String),
    /// `%pattern`: case-insensitive regex.
    Pattern(Regex),
    /// Plain text: substring containment (lowercased).
    Contains(String),
    /// Input that failed to compile. Matches nothing.
    Invalid,
}

impl SearchQuery {
    /// Compiles a query, reporting why it cannot be evaluated.
    ///
    /// An operator with nothing after it yet (`>`, `==`) compiles to
    /// [`SearchQuery::All`] so that a half-typed query does not blank the view.
    pub fn try_parse(input: &str) -> Result<SearchQuery> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(SearchQuery::All);
        }

        if input.len() >= 2 && input.starts_with('"') && input.ends_with('"') {
            let inner = &input[1..input.len() - 1];
            return Ok(SearchQuery::Exact(inner.to_lowercase()));
        }

        if let Some(rest) = input.strip_prefix('>') {
            return parse_numeric(rest).map(|n| n.map_or(SearchQuery::All, SearchQuery::Greater));
        }
        if let Some(rest) = input.strip_prefix('<') {
            return parse_numeric(rest).map(|n| n.map_or(SearchQuery::All, SearchQuery::Less));
        }

        if let Some((_, rest)) = input.split_once("==") {
            return Ok(text_or_all(rest, SearchQuery::Equals));
        }
        if let Some((_, rest)) = input.split_once("!=") {
            return Ok(text_or_all(rest, SearchQuery::NotEquals));
        }

        if let Some(pattern) = input.strip_prefix('%') {
            let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
            return Ok(SearchQuery::Pattern(regex));
        }

        Ok(SearchQuery::Contains(input.to_lowercase()))
    }

    /// Compiles a query. Errors become [`SearchQuery::Invalid`] and are logged.
    pub fn parse(input: &str) -> SearchQuery {
        SearchQuery::try_parse(input).unwrap_or_else(|err| {
            tracing::debug!(query = input, error = %err, "search query matches nothing");
            SearchQuery::Invalid
        })
    }

    /// Returns `true` if this query accepts every record.
    pub fn is_all(&self) -> bool {
        matches!(self, SearchQuery::All)
    }

    /// Tests a record's property against this query.
    pub fn matches<R: Record + ?Sized>(&self, record: &R, property: PropertyId) -> bool {
        if self.is_all() {
            return true;
        }
        let raw = record.get_property(property, None);
        self.matches_value(property.kind(), &raw)
    }

    /// Tests a raw property string against this query.
    ///
    /// An empty property value only matches the empty query.
    pub fn matches_value(&self, kind: PropertyKind, raw: &str) -> bool {
        if self.is_all() {
            return true;
        }
        let field = raw.trim();
        if field.is_empty() {
            return false;
        }

        match self {
            SearchQuery::All => true,
            SearchQuery::Exact(text) | SearchQuery::Equals(text) => field.to_lowercase() == *text,
            SearchQuery::NotEquals(text) => field.to_lowercase() != *text,
            SearchQuery::Greater(n) => read_number(kind, field).is_some_and(|v| v > *n),
            SearchQuery::Less(n) => read_number(kind, field).is_some_and(|v| v < *n),
            SearchQuery::Pattern(regex) => regex.is_match(field),
            SearchQuery::Contains(text) => field.to_lowercase().contains(text.as_str()),
            SearchQuery::Invalid => false,
        }
    }
}

/// Returns the text part of a query, without quotes or operators.
///
/// This is what autocomplete completes.
pub fn operand(input: &str) -> &str {
    let input = input.trim();
    if input.len() >= 2 && input.starts_with('"') && input.ends_with('"') {
        return &input[1..input.len() - 1];
    }
    if let Some(rest) = input.strip_prefix('"') {
        return rest;
    }
    if let Some(rest) = input.strip_prefix(['>', '<', '%']) {
        return rest.trim();
    }
    if let Some((_, rest)) = input.split_once("==") {
        return rest.trim();
    }
    if let Some((_, rest)) = input.split_once("!=") {
        return rest.trim();
    }
    input
}

/// Returns the operator prefix of a query, i.e. everything before [`operand`].
pub fn operator_prefix(input: &str) -> &str {
    let input = input.trim();
    if input.starts_with('"') {
        return "\"";
    }
    if input.starts_with(['>', '<', '%']) {
        return &input[..1];
    }
    if let Some(pos) = input.find("==").or_else(|| input.find("!=")) {
        return &input[..pos + 2];
    }
    ""
}

fn parse_numeric(rest: &str) -> Result<Option<Number>> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(None);
    }
    Number::parse(rest)
        .map(Some)
        .ok_or_else(|| SeekerError::NotANumber(rest.to_string()))
}

fn text_or_all(rest: &str, make: fn(String) -> SearchQuery) -> SearchQuery {
    let rest = rest.trim();
    if rest.is_empty() {
        SearchQuery::All
    } else {
        make(rest.to_lowercase())
    }
}

fn read_number(kind: PropertyKind, field: &str) -> Option<Number> {
    match kind {
        PropertyKind::Bool => parse_bool(field).map(|b| Number::I64(b as i64)),
        _ => Number::parse(field),
    }
}
