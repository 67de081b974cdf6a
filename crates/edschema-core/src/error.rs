//! # Error Types
//!
//! Errors raised when parsing the shared vocabulary from strings. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.

use thiserror::Error;

/// Top-level error type for the shared vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EdschemaError {
    /// A string did not name a member of the attribute type catalog.
    #[error("unknown attribute type: {0:?}")]
    UnknownAttributeType(String),

    /// A type tag string was empty or structurally malformed.
    #[error("malformed type tag {tag:?}: {reason}")]
    MalformedTypeTag {
        /// The offending tag text.
        tag: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An entity identifier was not in canonical 8-4-4-4-12 hex form.
    #[error("invalid entity guid {0:?} (expected 8-4-4-4-12 hex digits)")]
    InvalidEntityGuid(String),
}
