//! Attribute validation errors.
//!
//! Each structural rule has its own [`AttributeViolation`] variant.
//! A violation is wrapped in an [`AttributeError`] that records which
//! batch and which descriptor it came from. An [`AttributeErrors`]
//! collection carries every failure found in one pass over a batch.

use std::fmt;

use edschema_core::JsonKind;
use serde_json::Value;
use thiserror::Error;

/// One broken rule of an attribute descriptor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeViolation {
    /// The descriptor itself was not an object.
    #[error("descriptor must be an object, found {found}")]
    NotAnObject { found: JsonKind },

    #[error("missing attribute name")]
    MissingName,

    #[error("attribute name must be a string, found {found}")]
    NameNotString { found: JsonKind },

    #[error("attribute name is empty")]
    EmptyName,

    #[error("attribute name is {length} characters long, maximum is {max}")]
    NameTooLong { length: usize, max: usize },

    #[error("missing attribute type")]
    MissingType,

    #[error("attribute type must be a string, found {found}")]
    TypeNotString { found: JsonKind },

    #[error("unknown attribute type '{type_name}'")]
    UnknownType { type_name: String },

    /// `options` was present but not an object.
    #[error("options must be an object, found {found}")]
    OptionsNotObject { found: JsonKind },

    /// A text option (`displayName`, `description`) had the wrong kind.
    #[error("option '{option}' must be a string, found {found}")]
    OptionNotString {
        option: &'static str,
        found: JsonKind,
    },

    /// A text option (`displayName`, `description`) was too long.
    #[error("option '{option}' is {length} characters long, maximum is {max}")]
    OptionTooLong {
        option: &'static str,
        length: usize,
        max: usize,
    },

    /// `defaultValue` had the wrong JSON kind for the attribute type.
    #[error("defaultValue must be {expected}, found {found}")]
    DefaultKind {
        expected: &'static str,
        found: JsonKind,
    },

    #[error("defaultValue is {length} characters long, maximum is {max}")]
    DefaultTooLong { length: usize, max: usize },

    /// A fixed-length numeric default had the wrong number of elements.
    #[error("defaultValue must have {expected} elements, found {found}")]
    DefaultLength { expected: usize, found: usize },

    /// An element of a numeric sequence default was not a number.
    #[error("defaultValue[{index}] must be a number, found {found}")]
    DefaultElement { index: usize, found: JsonKind },

    #[error("defaultValue '{value}' is not a valid entity guid")]
    InvalidEntityGuid { value: String },

    #[error("enumeration requires options.enumerations")]
    MissingEnumerations,

    #[error("options.enumerations must be an array, found {found}")]
    EnumerationsNotArray { found: JsonKind },

    #[error("options.enumerations is empty")]
    EmptyEnumerations,

    /// An enumeration entry was not a `{name, value}` record.
    #[error("options.enumerations[{index}] must be an object, found {found}")]
    EnumerationNotRecord { index: usize, found: JsonKind },

    #[error("options.enumerations[{index}] requires a non-empty string name")]
    EnumerationName { index: usize },

    #[error("options.enumerations[{index}] value must be a string, number or boolean, found {found}")]
    EnumerationValue { index: usize, found: JsonKind },

    /// Enumeration values did not all share the kind of the first one.
    #[error("options.enumerations[{index}] value is {found}, but the first value is {expected}")]
    MixedEnumerationKinds {
        index: usize,
        expected: JsonKind,
        found: JsonKind,
    },

    #[error("defaultValue {value} is not one of the enumeration values")]
    DefaultNotEnumerated { value: Value },

    #[error("options.curves must be an array, found {found}")]
    CurvesNotArray { found: JsonKind },

    #[error("options.curves must name between 1 and {max} curves, found {count}")]
    CurveCount { count: usize, max: usize },

    #[error("options.curves[{index}] must be a string, found {found}")]
    CurveName { index: usize, found: JsonKind },

    /// A colorcurve `options.type` was not a channel spelling.
    #[error("options.type '{value}' is not one of r, rgb, rgba, g, b, a")]
    ColorChannels { value: String },

    #[error("options.type must be a string, found {found}")]
    ColorChannelsNotString { found: JsonKind },

    #[error("curve defaultValue must be an object, found {found}")]
    CurveNotObject { found: JsonKind },

    #[error("curve type must be 0, 1 or 2, found {value}")]
    CurveType { value: Value },

    #[error("curve keys must be an array, found {found}")]
    CurveKeysNotArray { found: JsonKind },

    /// Multi-channel keys were neither empty nor one array per channel.
    #[error("curve keys must be empty or hold one array per channel ({expected}), found {found}")]
    CurveChannelCount { expected: usize, found: usize },

    #[error("curve keys[{channel}] must be an array, found {found}")]
    CurveChannelNotArray { channel: usize, found: JsonKind },

    /// A key list did not hold `(time, value)` pairs.
    #[error("curve keys{} must have an even length, found {length}", channel_suffix(.channel))]
    CurveKeysOdd {
        channel: Option<usize>,
        length: usize,
    },

    #[error("curve keys{}[{index}] must be a number, found {found}", channel_suffix(.channel))]
    CurveKey {
        channel: Option<usize>,
        index: usize,
        found: JsonKind,
    },

    /// The name was already accepted earlier in the same batch.
    #[error("duplicate attribute name '{name}'")]
    DuplicateName { name: String },
}

fn channel_suffix(channel: &Option<usize>) -> String {
    channel.map(|c| format!("[{c}]")).unwrap_or_default()
}

/// A violation located within a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeError {
    /// Batch (source unit) the descriptor came from.
    pub source_id: String,
    /// Position of the descriptor in the batch.
    pub index: usize,
    /// The descriptor's name, when it had a usable one.
    pub attribute_name: Option<String>,
    pub violation: AttributeViolation,
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute_name {
            Some(name) => write!(
                f,
                "{}: attribute '{}' (#{}): {}",
                self.source_id, name, self.index, self.violation
            ),
            None => write!(
                f,
                "{}: attribute #{}: {}",
                self.source_id, self.index, self.violation
            ),
        }
    }
}

/// Every failure found while validating one batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeErrors {
    errors: Vec<AttributeError>,
}

impl AttributeErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: AttributeError) {
        self.errors.push(error);
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeError> {
        self.errors.iter()
    }

    /// Names of the failing descriptors that had a usable name.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|e| e.attribute_name.as_deref())
            .collect()
    }

    pub fn into_vec(self) -> Vec<AttributeError> {
        self.errors
    }
}

impl fmt::Display for AttributeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AttributeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.violation)
    }
}

impl std::error::Error for AttributeErrors {}

impl IntoIterator for AttributeErrors {
    type Item = AttributeError;
    type IntoIter = std::vec::IntoIter<AttributeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
