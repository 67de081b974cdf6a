//! # Per-Type Rules
//!
//! Structural contract of each attribute type. [`normalize`] checks the
//! `defaultValue` (and the options the type depends on) and returns the
//! normalized default, filling it in when the descriptor left it out.
//!
//! | type | default when absent | checks |
//! |---|---|---|
//! | `number` | `0` | numeric |
//! | `string` | `""` | string, at most 512 characters |
//! | `boolean` | `false` | boolean |
//! | `asset` | `[]` | every element numeric |
//! | `vec2`, `vec3`/`vector`, `vec4`, `rgb` | zeros | exact length, numeric |
//! | `rgba` | `[0, 0, 0, 1]` | exact length, numeric |
//! | `entity` | `null` | canonical entity guid |
//! | `enumeration` | first value | declared values share one kind |
//! | `curve`, `colorcurve` | see [`crate::curve`] | channel shapes |

use edschema_core::{json_kind, values_equal, AttributeType, EntityGuid, JsonKind};
use serde_json::{Map, Value};

use crate::curve;
use crate::error::AttributeViolation;

/// Maximum length of a `string` attribute's default, in characters.
pub const MAX_STRING_DEFAULT_LENGTH: usize = 512;

const ENUMERATIONS_OPTION: &str = "enumerations";

/// Validate and normalize the default of one attribute.
///
/// `default` is `None` when the descriptor carried no usable default
/// (missing or `null`). `options` is the descriptor's working copy; rules
/// may fill options they depend on.
pub(crate) fn normalize(
    attribute_type: AttributeType,
    default: Option<Value>,
    options: &mut Map<String, Value>,
) -> Result<Value, AttributeViolation> {
    match attribute_type {
        AttributeType::Number => match default {
            None => Ok(Value::from(0)),
            Some(value @ Value::Number(_)) => Ok(value),
            Some(other) => Err(kind_error("a number", &other)),
        },
        AttributeType::String => match default {
            None => Ok(Value::String(String::new())),
            Some(Value::String(text)) => {
                let length = text.chars().count();
                if length > MAX_STRING_DEFAULT_LENGTH {
                    return Err(AttributeViolation::DefaultTooLong {
                        length,
                        max: MAX_STRING_DEFAULT_LENGTH,
                    });
                }
                Ok(Value::String(text))
            }
            Some(other) => Err(kind_error("a string", &other)),
        },
        AttributeType::Boolean => match default {
            None => Ok(Value::Bool(false)),
            Some(value @ Value::Bool(_)) => Ok(value),
            Some(other) => Err(kind_error("a boolean", &other)),
        },
        AttributeType::Asset => match default {
            None => Ok(Value::Array(Vec::new())),
            Some(Value::Array(ids)) => {
                check_numeric_elements(&ids)?;
                Ok(Value::Array(ids))
            }
            Some(other) => Err(kind_error("an array of asset ids", &other)),
        },
        AttributeType::Vec2 => fixed_numeric(default, 2, false),
        AttributeType::Vec3 | AttributeType::Vector | AttributeType::Rgb => {
            fixed_numeric(default, 3, false)
        }
        AttributeType::Vec4 => fixed_numeric(default, 4, false),
        AttributeType::Rgba => fixed_numeric(default, 4, true),
        AttributeType::Entity => match default {
            None => Ok(Value::Null),
            Some(Value::String(text)) => {
                if EntityGuid::is_valid(&text) {
                    Ok(Value::String(text))
                } else {
                    Err(AttributeViolation::InvalidEntityGuid { value: text })
                }
            }
            Some(other) => Err(kind_error("an entity guid or null", &other)),
        },
        AttributeType::Enumeration => enumeration(default, options),
        AttributeType::Curve => {
            let channels = curve::curve_channels(options)?;
            curve::normalize_curve(default, channels)
        }
        AttributeType::Colorcurve => {
            let channels = curve::color_channels(options)?;
            curve::normalize_curve(default, channels)
        }
    }
}

fn kind_error(expected: &'static str, found: &Value) -> AttributeViolation {
    AttributeViolation::DefaultKind {
        expected,
        found: json_kind(found),
    }
}

fn check_numeric_elements(values: &[Value]) -> Result<(), AttributeViolation> {
    match values.iter().position(|v| !v.is_number()) {
        Some(index) => Err(AttributeViolation::DefaultElement {
            index,
            found: json_kind(&values[index]),
        }),
        None => Ok(()),
    }
}

/// Check a fixed-length numeric sequence. Colors with alpha default to
/// opaque.
fn fixed_numeric(
    default: Option<Value>,
    expected: usize,
    opaque_alpha: bool,
) -> Result<Value, AttributeViolation> {
    match default {
        None => {
            let mut zeros = vec![Value::from(0); expected];
            if opaque_alpha {
                if let Some(alpha) = zeros.last_mut() {
                    *alpha = Value::from(1);
                }
            }
            Ok(Value::Array(zeros))
        }
        Some(Value::Array(values)) => {
            if values.len() != expected {
                return Err(AttributeViolation::DefaultLength {
                    expected,
                    found: values.len(),
                });
            }
            check_numeric_elements(&values)?;
            Ok(Value::Array(values))
        }
        Some(other) => Err(kind_error("a numeric array", &other)),
    }
}

/// Check `options.enumerations` and pick or verify the default.
fn enumeration(
    default: Option<Value>,
    options: &Map<String, Value>,
) -> Result<Value, AttributeViolation> {
    let entries = match options.get(ENUMERATIONS_OPTION) {
        None | Some(Value::Null) => return Err(AttributeViolation::MissingEnumerations),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(AttributeViolation::EnumerationsNotArray {
                found: json_kind(other),
            })
        }
    };

    let mut values: Vec<&Value> = Vec::with_capacity(entries.len());
    let mut value_kind: Option<JsonKind> = None;
    for (index, entry) in entries.iter().enumerate() {
        let Value::Object(record) = entry else {
            return Err(AttributeViolation::EnumerationNotRecord {
                index,
                found: json_kind(entry),
            });
        };
        match record.get("name") {
            Some(Value::String(name)) if !name.is_empty() => {}
            _ => return Err(AttributeViolation::EnumerationName { index }),
        }
        let value = record.get("value").unwrap_or(&Value::Null);
        let kind = json_kind(value);
        if !kind.is_scalar() {
            return Err(AttributeViolation::EnumerationValue { index, found: kind });
        }
        match value_kind {
            None => value_kind = Some(kind),
            Some(expected) if expected != kind => {
                return Err(AttributeViolation::MixedEnumerationKinds {
                    index,
                    expected,
                    found: kind,
                })
            }
            Some(_) => {}
        }
        values.push(value);
    }

    let Some(first) = values.first() else {
        return Err(AttributeViolation::EmptyEnumerations);
    };
    match default {
        None => Ok((*first).clone()),
        Some(value) if values.iter().any(|v| values_equal(v, &value)) => Ok(value),
        Some(value) => Err(AttributeViolation::DefaultNotEnumerated { value }),
    }
}
