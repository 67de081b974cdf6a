//! # Attribute Type Catalog: Single Source of Truth
//!
//! Defines the `AttributeType` enum with all 14 script attribute types.
//! Every rule table keyed by attribute type must be an exhaustive `match`
//! on this enum, so adding a type forces each consumer to handle it at
//! compile time.
//!
//! | # | Type | Default value shape |
//! |---|------|---------------------|
//! |  1 | number | numeric scalar |
//! |  2 | string | string, at most 512 chars |
//! |  3 | boolean | boolean |
//! |  4 | asset | sequence of numeric asset ids |
//! |  5 | rgb | 3 numbers |
//! |  6 | rgba | 4 numbers |
//! |  7 | vector | 3 numbers (alias of vec3) |
//! |  8 | vec2 | 2 numbers |
//! |  9 | vec3 | 3 numbers |
//! | 10 | vec4 | 4 numbers |
//! | 11 | enumeration | one of the declared enumeration values |
//! | 12 | entity | entity guid or null |
//! | 13 | curve | `{type, keys}` curve set |
//! | 14 | colorcurve | `{type, keys}` curve set over color channels |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EdschemaError;
use crate::tag::TypeTag;

/// All script attribute types accepted by the attribute validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// Numeric scalar.
    Number,
    /// String scalar.
    String,
    /// Boolean scalar.
    Boolean,
    /// List of asset ids.
    Asset,
    /// RGB color.
    Rgb,
    /// RGBA color.
    Rgba,
    /// Three-component vector, spelled `vector`.
    Vector,
    /// Two-component vector.
    Vec2,
    /// Three-component vector.
    Vec3,
    /// Four-component vector.
    Vec4,
    /// One value out of a declared list.
    Enumeration,
    /// Reference to a scene entity.
    Entity,
    /// Curve set with named channels.
    Curve,
    /// Curve set over color channels.
    Colorcurve,
}

/// Total number of attribute types. Used for compile-time assertions.
pub const ATTRIBUTE_TYPE_COUNT: usize = 14;

impl AttributeType {
    /// Returns all attribute types in catalog order.
    pub fn all() -> &'static [AttributeType] {
        &[
            Self::Number,
            Self::String,
            Self::Boolean,
            Self::Asset,
            Self::Rgb,
            Self::Rgba,
            Self::Vector,
            Self::Vec2,
            Self::Vec3,
            Self::Vec4,
            Self::Enumeration,
            Self::Entity,
            Self::Curve,
            Self::Colorcurve,
        ]
    }

    /// Returns the lowercase identifier used in attribute descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Asset => "asset",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
            Self::Vector => "vector",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Enumeration => "enumeration",
            Self::Entity => "entity",
            Self::Curve => "curve",
            Self::Colorcurve => "colorcurve",
        }
    }

    /// The schema type tag a value of this attribute type carries.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Number => TypeTag::Number,
            Self::String => TypeTag::String,
            Self::Boolean => TypeTag::Boolean,
            Self::Vec2 => TypeTag::Vec2,
            Self::Vector | Self::Vec3 => TypeTag::Vec3,
            Self::Vec4 => TypeTag::Vec4,
            Self::Asset => TypeTag::array_of(TypeTag::Named("asset".to_string())),
            Self::Rgb
            | Self::Rgba
            | Self::Enumeration
            | Self::Entity
            | Self::Curve
            | Self::Colorcurve => TypeTag::Named(self.as_str().to_string()),
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = EdschemaError;

    /// Parse an attribute type from its descriptor identifier.
    ///
    /// Case-sensitive; accepts exactly the identifiers produced by
    /// [`AttributeType::as_str()`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "boolean" => Ok(Self::Boolean),
            "asset" => Ok(Self::Asset),
            "rgb" => Ok(Self::Rgb),
            "rgba" => Ok(Self::Rgba),
            "vector" => Ok(Self::Vector),
            "vec2" => Ok(Self::Vec2),
            "vec3" => Ok(Self::Vec3),
            "vec4" => Ok(Self::Vec4),
            "enumeration" => Ok(Self::Enumeration),
            "entity" => Ok(Self::Entity),
            "curve" => Ok(Self::Curve),
            "colorcurve" => Ok(Self::Colorcurve),
            other => Err(EdschemaError::UnknownAttributeType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_count() {
        assert_eq!(AttributeType::all().len(), ATTRIBUTE_TYPE_COUNT);
    }

    #[test]
    fn test_all_unique() {
        let mut seen = std::collections::HashSet::new();
        for t in AttributeType::all() {
            assert!(seen.insert(t), "Duplicate attribute type: {t}");
        }
    }

    #[test]
    fn test_as_str_roundtrip() {
        for t in AttributeType::all() {
            let parsed: AttributeType = t
                .as_str()
                .parse()
                .unwrap_or_else(|e| panic!("Failed to parse {t}: {e}"));
            assert_eq!(*t, parsed);
        }
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("json".parse::<AttributeType>().is_err());
        assert!("Number".parse::<AttributeType>().is_err());
        assert!("".parse::<AttributeType>().is_err());
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for t in AttributeType::all() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(AttributeType::Vector.type_tag(), TypeTag::Vec3);
        assert_eq!(AttributeType::Asset.type_tag().to_string(), "array:asset");
        assert_eq!(AttributeType::Curve.type_tag().to_string(), "curve");
    }
}
