//! # Type Tags
//!
//! Canonical short names that downstream consumers use to decide how to
//! render or interpret a value: `number`, `vec3`, `array:asset`,
//! `object`, and editor-declared overrides kept verbatim.
//!
//! The `Display` form is the wire form. Parsing the wire form and
//! displaying it again yields the same text, so overrides such as
//! `"rgb"` or `"curveset"` survive a round trip unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EdschemaError;

/// Prefix of composite array tags (`array:<element>`).
pub const ARRAY_TAG_PREFIX: &str = "array:";

/// A derived schema type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Numeric scalar.
    Number,
    /// String scalar.
    String,
    /// Boolean scalar.
    Boolean,
    /// Maps, mixed values, and plain nested objects.
    Object,
    /// Two-component numeric vector.
    Vec2,
    /// Three-component numeric vector.
    Vec3,
    /// Four-component numeric vector.
    Vec4,
    /// Homogeneous array whose element has the boxed tag.
    Array(Box<TypeTag>),
    /// Any other tag: editor overrides (`asset`, `entity`, `rgb`) and
    /// scalar kind names outside the core vocabulary.
    Named(String),
}

impl TypeTag {
    /// Build the composite tag for an array of `element`.
    pub fn array_of(element: TypeTag) -> Self {
        Self::Array(Box::new(element))
    }

    /// Build the vector tag for a numeric array of fixed length 2, 3 or 4.
    pub fn vector(length: u32) -> Option<Self> {
        match length {
            2 => Some(Self::Vec2),
            3 => Some(Self::Vec3),
            4 => Some(Self::Vec4),
            _ => None,
        }
    }

    /// Interpret an editor override string.
    ///
    /// Well-formed tags are parsed into their canonical variant; anything
    /// else is kept verbatim as [`TypeTag::Named`]. Never fails.
    pub fn from_override(text: &str) -> Self {
        text.parse()
            .unwrap_or_else(|_| Self::Named(text.to_string()))
    }

    /// Whether this is one of the fixed-length vector tags.
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vec2 | Self::Vec3 | Self::Vec4)
    }

    /// The element tag, if this is an array tag.
    pub fn element(&self) -> Option<&TypeTag> {
        match self {
            Self::Array(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => f.write_str("number"),
            Self::String => f.write_str("string"),
            Self::Boolean => f.write_str("boolean"),
            Self::Object => f.write_str("object"),
            Self::Vec2 => f.write_str("vec2"),
            Self::Vec3 => f.write_str("vec3"),
            Self::Vec4 => f.write_str("vec4"),
            Self::Array(inner) => write!(f, "{ARRAY_TAG_PREFIX}{inner}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for TypeTag {
    type Err = EdschemaError;

    /// Parse the wire form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EdschemaError::MalformedTypeTag {
                tag: s.to_string(),
                reason: "empty tag".to_string(),
            });
        }
        if let Some(rest) = s.strip_prefix(ARRAY_TAG_PREFIX) {
            let inner = rest.parse().map_err(|_| EdschemaError::MalformedTypeTag {
                tag: s.to_string(),
                reason: "missing element type".to_string(),
            })?;
            return Ok(Self::array_of(inner));
        }
        Ok(match s {
            "number" => Self::Number,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "object" => Self::Object,
            "vec2" => Self::Vec2,
            "vec3" => Self::Vec3,
            "vec4" => Self::Vec4,
            other => Self::Named(other.to_string()),
        })
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
