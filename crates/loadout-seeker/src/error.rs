//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when parsing properties, operators, or queries.
///
/// Matching itself never fails: a query that cannot be evaluated simply
/// matches nothing. These errors surface only from the parsing entry points.
#[derive(Debug, Error)]
pub enum SeekerError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Property name is not part of the closed property set.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    /// Operator name is not recognized.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// Numeric comparison operand could not be parsed.
    #[error("'{0}' is not a number")]
    NotANumber(String),
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
