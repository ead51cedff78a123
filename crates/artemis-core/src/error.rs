//! Error types for artemis-core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a mapping table.
///
/// These are configuration failures: the only errors the core lets abort a
/// run. Per-event defects are reported through
/// [`Diagnostics`](crate::diagnostics::Diagnostics) instead.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The mapping file could not be read.
    #[error("cannot read mapping file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping document is not valid JSON.
    #[error("mapping table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document root, or an event-type value, is not a JSON object.
    #[error("invalid mapping for event type {event_type:?}: {reason}")]
    InvalidEventType { event_type: String, reason: String },

    /// A per-field entry is malformed.
    #[error("invalid mapping entry {event_type}.{field}: {reason}")]
    InvalidEntry {
        event_type: String,
        field: String,
        reason: String,
    },

    /// A per-field entry names a handler that does not exist.
    #[error("unknown handler {handler:?} in mapping entry {event_type}.{field}")]
    UnknownHandler {
        event_type: String,
        field: String,
        handler: String,
    },
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, MappingError>;
