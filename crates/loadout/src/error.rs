//! Error types for the loadout crate.

use loadout_seeker::SeekerError;
use thiserror::Error;

use crate::table::Handle;

/// Errors surfaced to the host application.
///
/// None of these abort the engine: a failed configuration load leaves the
/// engine inert, and every other failure degrades to "match nothing" or
/// "ignore the action".
#[derive(Debug, Error)]
pub enum LoadoutError {
    /// Missing or malformed view configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// JSON could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A property, operator, or query in the configuration is invalid.
    #[error(transparent)]
    Query(#[from] SeekerError),

    /// No filter node has the given id.
    #[error("unknown filter node '{0}'")]
    UnknownNode(String),
}

impl LoadoutError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Result type for loadout operations.
pub type Result<T> = std::result::Result<T, LoadoutError>;

/// Why a drag payload or selection id could not be applied.
///
/// Drop handling logs these and carries on; they are never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// A stable id outside the table's current items.
    #[error("stale item id {id} (table holds {len} items)")]
    StaleId { id: usize, len: usize },

    /// The destination is not linked to the payload's origin.
    #[error("{destination} does not accept drops from {origin}")]
    NotLinked { origin: Handle, destination: Handle },

    /// The pair of containers has no transfer semantics.
    #[error("no transfer from {origin} to {destination}")]
    Unsupported { origin: Handle, destination: Handle },

    /// No table is registered for the handle.
    #[error("no {0} table in this browser")]
    MissingTable(Handle),
}
