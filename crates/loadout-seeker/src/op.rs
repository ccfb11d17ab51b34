//! Comparison operators for filter rules.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::SeekerError;

/// Comparison operator of a [`Rule`](crate::Rule).
///
/// Operators fall into three groups:
/// - **Equality**: `Equals`, `NotEquals` - numeric for numeric properties, text otherwise
/// - **Text**: `Contains`, `NotContains`, `StartsWith`, `EndsWith`
/// - **Ordering**: `GreaterThan`, `LessThan`, `GreaterOrEqual`, `LessOrEqual` - numeric only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    StartsWith,
    EndsWith,
}

impl Op {
    /// Every operator, in declaration order.
    pub const ALL: &'static [Op] = &[
        Op::Equals,
        Op::NotEquals,
        Op::Contains,
        Op::NotContains,
        Op::GreaterThan,
        Op::LessThan,
        Op::GreaterOrEqual,
        Op::LessOrEqual,
        Op::StartsWith,
        Op::EndsWith,
    ];

    /// Returns `true` for operators that need both sides to be numbers.
    pub fn is_ordering_op(self) -> bool {
        matches!(
            self,
            Op::GreaterThan | Op::LessThan | Op::GreaterOrEqual | Op::LessOrEqual
        )
    }

    /// Returns `true` for operators that match on substrings.
    pub fn is_text_op(self) -> bool {
        matches!(
            self,
            Op::Contains | Op::NotContains | Op::StartsWith | Op::EndsWith
        )
    }

    /// Evaluates a comparison given an ordering result.
    ///
    /// Used for numeric comparisons and for equality on any kind.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Equals => ordering == Ordering::Equal,
            Op::NotEquals => ordering != Ordering::Equal,
            Op::GreaterThan => ordering == Ordering::Greater,
            Op::GreaterOrEqual => ordering != Ordering::Less,
            Op::LessThan => ordering == Ordering::Less,
            Op::LessOrEqual => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the configuration name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Equals => "Equals",
            Op::NotEquals => "NotEquals",
            Op::Contains => "Contains",
            Op::NotContains => "NotContains",
            Op::GreaterThan => "GreaterThan",
            Op::LessThan => "LessThan",
            Op::GreaterOrEqual => "GreaterOrEqual",
            Op::LessOrEqual => "LessOrEqual",
            Op::StartsWith => "StartsWith",
            Op::EndsWith => "EndsWith",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Op {
    type Err = SeekerError;

    /// Parses an operator name or its symbolic shorthand (`==`, `!=`, `>`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let symbolic = match s {
            "==" | "=" => Some(Op::Equals),
            "!=" => Some(Op::NotEquals),
            ">" => Some(Op::GreaterThan),
            "<" => Some(Op::LessThan),
            ">=" => Some(Op::GreaterOrEqual),
            "<=" => Some(Op::LessOrEqual),
            _ => None,
        };
        if let Some(op) = symbolic {
            return Ok(op);
        }
        Op::ALL
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SeekerError::UnknownOperator(s.to_string()))
    }
}
