//! Schema-specific error types.
//!
//! Structured errors for document parsing, tree construction and registry
//! loading. Every variant carries the location (`at` path or file) so a
//! malformed schema can be fixed without guesswork.
//!
//! Path resolution misses are not errors in the lenient API; the strict
//! lookup reports them as [`ResolutionMiss`].

use edschema_core::JsonKind;
use thiserror::Error;

/// Errors that can occur while building or loading schema trees.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A node was neither a kind name, an array literal, nor an object.
    #[error("invalid schema node at {at}: expected string, array or object, found {found}")]
    InvalidNode { at: String, found: JsonKind },

    /// An array literal did not have exactly one element schema.
    #[error("invalid array literal at {at}: expected exactly one element schema, found {len}")]
    ArrayLiteral { at: String, len: usize },

    /// A bare kind name was empty.
    #[error("empty kind name at {at}")]
    EmptyKind { at: String },

    /// A `$`-marker carried a value of the wrong shape.
    #[error("invalid {marker} at {at}: {reason}")]
    InvalidMarker {
        at: String,
        marker: &'static str,
        reason: String,
    },

    /// A build patch addressed a path that does not resolve.
    #[error("{patch} patch target {path:?} does not resolve")]
    PatchTarget { patch: &'static str, path: String },

    /// A schema file could not be read or parsed.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoad { schema_name: String, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A path did not resolve against a schema tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema path {path:?} does not resolve")]
pub struct ResolutionMiss {
    /// The dotted path that failed.
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_node_display() {
        let err = SchemaError::InvalidNode {
            at: "components.light".to_string(),
            found: JsonKind::Number,
        };
        let msg = err.to_string();
        assert!(msg.contains("components.light"));
        assert!(msg.contains("number"));
    }

    #[test]
    fn array_literal_display() {
        let err = SchemaError::ArrayLiteral {
            at: "tags".to_string(),
            len: 2,
        };
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn invalid_marker_display() {
        let err = SchemaError::InvalidMarker {
            at: "position".to_string(),
            marker: "$length",
            reason: "expected an unsigned integer".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("$length"));
        assert!(msg.contains("position"));
    }

    #[test]
    fn patch_target_display() {
        let err = SchemaError::PatchTarget {
            patch: "title",
            path: "settings.missing".to_string(),
        };
        assert!(err.to_string().contains("settings.missing"));
    }

    #[test]
    fn resolution_miss_display() {
        let miss = ResolutionMiss {
            path: "a.b".to_string(),
        };
        assert!(miss.to_string().contains("a.b"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SchemaError::from(io_err);
        assert!(err.to_string().contains("gone"));
    }
}
