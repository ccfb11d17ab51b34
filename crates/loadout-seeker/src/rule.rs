//! Single-property predicates.
//!
//! A [`Rule`] is the predicate carried by a filter node: a property, an
//! operator, and a comparison value, all as configured text.

use std::cmp::Ordering;

use crate::op::Op;
use crate::property::{PropertyId, PropertyKind};
use crate::record::Record;
use crate::value::{parse_bool, Number};

/// A single filter predicate.
///
/// A rule without a property is the identity rule and passes every record.
///
/// # Example
///
/// ```
/// use loadout_seeker::{Op, PropertyBag, PropertyId, Rule};
///
/// let heavy = Rule::new(PropertyId::Weight, Op::GreaterThan, "10");
/// let anvil = PropertyBag::new("anvil").with(PropertyId::Weight, "45.5");
/// let feather = PropertyBag::new("feather").with(PropertyId::Weight, "0.1");
///
/// assert!(heavy.matches(&anvil));
/// assert!(!heavy.matches(&feather));
/// assert!(Rule::identity().matches(&feather));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The property to compare. `None` makes this the identity rule.
    pub property: Option<PropertyId>,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against, as configured.
    pub value: String,
    /// Optional argument forwarded to [`Record::get_property`].
    pub arg: Option<String>,
}

impl Default for Rule {
    fn default() -> Self {
        Rule::identity()
    }
}

impl Rule {
    /// Creates a new rule.
    pub fn new(property: PropertyId, op: Op, value: impl Into<String>) -> Self {
        Rule {
            property: Some(property),
            op,
            value: value.into(),
            arg: None,
        }
    }

    /// The rule that passes every record.
    pub fn identity() -> Self {
        Rule {
            property: None,
            op: Op::Equals,
            value: String::new(),
            arg: None,
        }
    }

    /// Sets the property argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    /// Returns `true` if this is the identity rule.
    pub fn is_identity(&self) -> bool {
        self.property.is_none()
    }

    /// Evaluates this rule against a record.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self.property {
            None => true,
            Some(property) => {
                let raw = record.get_property(property, self.arg.as_deref());
                self.matches_value(property.kind(), &raw)
            }
        }
    }

    /// Evaluates this rule against an already-fetched property string.
    ///
    /// An empty record value never satisfies a rule with a non-empty value.
    pub fn matches_value(&self, kind: PropertyKind, raw: &str) -> bool {
        let field = raw.trim();
        let wanted = self.value.trim();

        if wanted.is_empty() {
            return match self.op {
                Op::Equals => field.is_empty(),
                Op::NotEquals => !field.is_empty(),
                Op::Contains | Op::StartsWith | Op::EndsWith => true,
                _ => false,
            };
        }
        if field.is_empty() {
            return false;
        }

        if self.op.is_ordering_op() {
            return match compare_numeric(kind, field, wanted) {
                Some(ordering) => self.op.eval_ordering(ordering),
                None => false,
            };
        }

        if matches!(self.op, Op::Equals | Op::NotEquals) {
            if kind.is_numeric() {
                if let Some(ordering) = compare_numeric(kind, field, wanted) {
                    return self.op.eval_ordering(ordering);
                }
            }
            let ordering = if field.to_lowercase() == wanted.to_lowercase() {
                Ordering::Equal
            } else {
                Ordering::Less
            };
            return self.op.eval_ordering(ordering);
        }

        let field = field.to_lowercase();
        let wanted = wanted.to_lowercase();
        match self.op {
            Op::Contains => field.contains(&wanted),
            Op::NotContains => !field.contains(&wanted),
            Op::StartsWith => field.starts_with(&wanted),
            Op::EndsWith => field.ends_with(&wanted),
            _ => false,
        }
    }
}

/// Compares two strings as numbers of the given kind.
///
/// Returns `None` if either side is not a number. Text properties are still
/// compared numerically when both sides happen to parse.
fn compare_numeric(kind: PropertyKind, field: &str, wanted: &str) -> Option<Ordering> {
    let read = |s: &str| match kind {
        PropertyKind::Bool => parse_bool(s).map(|b| Number::I64(b as i64)),
        _ => Number::parse(s),
    };
    Some(read(field)?.compare(read(wanted)?))
}
