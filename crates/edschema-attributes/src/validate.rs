//! # Batch Validation
//!
//! Validates the script attribute descriptors scanned from one source
//! unit. Descriptors are untrusted `serde_json::Value`s.
//!
//! ## Per-Descriptor Checks
//!
//! In order:
//!
//! 1. `name` is a non-empty string of at most 128 characters.
//! 2. `type` is a string naming an [`AttributeType`].
//! 3. `options.displayName` and `options.description`, when present, are
//!    strings of at most 128 and 1024 characters.
//! 4. The type rule checks and normalizes `defaultValue` and the options
//!    it depends on (see [`crate::rules`]).
//! 5. The name was not accepted earlier in the batch.
//!
//! Each descriptor is checked on its own working copy. A failing
//! descriptor is recorded and skipped; the rest of the batch is still
//! checked so every problem is reported in one pass. The batch fails if
//! any descriptor failed.

use edschema_core::{json_kind, AttributeType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AttributeError, AttributeErrors, AttributeViolation};
use crate::rules;
use crate::table::{allowed_options, NormalizedAttribute, ValidatedAttributeTable};

/// Maximum length of an attribute name and its display name, in characters.
pub const MAX_NAME_LENGTH: usize = 128;

/// Maximum length of an attribute description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Attribute descriptors scanned from one source unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeBatch {
    /// Source unit the descriptors were declared in.
    pub name: String,
    pub values: Vec<Value>,
}

/// Validate a whole batch.
pub fn validate_batch(batch: &AttributeBatch) -> Result<ValidatedAttributeTable, AttributeErrors> {
    validate(&batch.name, &batch.values)
}

/// Validate the descriptors declared in `source_id`.
///
/// # Errors
///
/// Returns every [`AttributeError`] found if any descriptor failed; no
/// partial table is returned.
pub fn validate(
    source_id: &str,
    descriptors: &[Value],
) -> Result<ValidatedAttributeTable, AttributeErrors> {
    let mut table = ValidatedAttributeTable::new(source_id);
    let mut errors = AttributeErrors::new();

    for (index, descriptor) in descriptors.iter().enumerate() {
        let outcome = normalize_descriptor(descriptor).and_then(|attribute| {
            table.insert(attribute).map_err(|refused| AttributeViolation::DuplicateName {
                name: refused.name,
            })
        });
        if let Err(violation) = outcome {
            let attribute_name = usable_name(descriptor);
            tracing::debug!(
                source = source_id,
                index,
                attribute = attribute_name.as_deref().unwrap_or("<unnamed>"),
                %violation,
                "attribute rejected"
            );
            errors.push(AttributeError {
                source_id: source_id.to_string(),
                index,
                attribute_name,
                violation,
            });
        }
    }

    tracing::debug!(
        source = source_id,
        accepted = table.len(),
        rejected = errors.len(),
        "validated attribute batch"
    );

    if errors.is_empty() {
        Ok(table)
    } else {
        Err(errors)
    }
}

/// The descriptor's name if it is a non-empty string.
fn usable_name(descriptor: &Value) -> Option<String> {
    match descriptor.get("name") {
        Some(Value::String(name)) if !name.is_empty() => Some(name.clone()),
        _ => None,
    }
}

/// Run checks 1 to 4 on one descriptor.
fn normalize_descriptor(descriptor: &Value) -> Result<NormalizedAttribute, AttributeViolation> {
    let Value::Object(fields) = descriptor else {
        return Err(AttributeViolation::NotAnObject {
            found: json_kind(descriptor),
        });
    };

    let name = check_name(fields.get("name"))?;
    let attribute_type = check_type(fields.get("type"))?;

    let mut options = match fields.get("options") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(options)) => options.clone(),
        Some(other) => {
            return Err(AttributeViolation::OptionsNotObject {
                found: json_kind(other),
            })
        }
    };
    let display_name = text_option(&options, "displayName", MAX_NAME_LENGTH)?;
    let description = text_option(&options, "description", MAX_DESCRIPTION_LENGTH)?;

    let default = match fields.get("defaultValue") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.clone()),
    };
    let default_value = rules::normalize(attribute_type, default, &mut options)?;

    Ok(NormalizedAttribute {
        display_name: display_name.unwrap_or_else(|| name.clone()),
        name,
        description,
        value: default_value.clone(),
        default_value,
        attribute_type,
        options: allowed_options(&options),
    })
}

fn check_name(name: Option<&Value>) -> Result<String, AttributeViolation> {
    match name {
        None | Some(Value::Null) => Err(AttributeViolation::MissingName),
        Some(Value::String(name)) if name.is_empty() => Err(AttributeViolation::EmptyName),
        Some(Value::String(name)) => {
            let length = name.chars().count();
            if length > MAX_NAME_LENGTH {
                return Err(AttributeViolation::NameTooLong {
                    length,
                    max: MAX_NAME_LENGTH,
                });
            }
            Ok(name.clone())
        }
        Some(other) => Err(AttributeViolation::NameNotString {
            found: json_kind(other),
        }),
    }
}

fn check_type(declared: Option<&Value>) -> Result<AttributeType, AttributeViolation> {
    match declared {
        None | Some(Value::Null) => Err(AttributeViolation::MissingType),
        Some(Value::String(type_name)) => {
            type_name
                .parse()
                .map_err(|_| AttributeViolation::UnknownType {
                    type_name: type_name.clone(),
                })
        }
        Some(other) => Err(AttributeViolation::TypeNotString {
            found: json_kind(other),
        }),
    }
}

/// A text option with a length cap. Absent and `null` are the same.
fn text_option(
    options: &Map<String, Value>,
    option: &'static str,
    max: usize,
) -> Result<Option<String>, AttributeViolation> {
    match options.get(option) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => {
            let length = text.chars().count();
            if length > max {
                return Err(AttributeViolation::OptionTooLong {
                    option,
                    length,
                    max,
                });
            }
            Ok(Some(text.clone()))
        }
        Some(other) => Err(AttributeViolation::OptionNotString {
            option,
            found: json_kind(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn only_violation(descriptors: &[Value]) -> AttributeViolation {
        let errors = validate("test.js", descriptors).unwrap_err();
        assert_eq!(errors.len(), 1, "{errors}");
        errors.into_vec().remove(0).violation
    }

    #[test]
    fn number_without_default_becomes_zero() {
        let table = validate("player.js", &[json!({"name": "speed", "type": "number"})]).unwrap();
        let speed = table.get("speed").unwrap();
        assert_eq!(speed.default_value, json!(0));
        assert_eq!(speed.value, json!(0));
        assert_eq!(speed.display_name, "speed");
        assert_eq!(speed.attribute_type, AttributeType::Number);
    }

    #[test]
    fn name_checks() {
        assert_eq!(
            only_violation(&[json!({"type": "number"})]),
            AttributeViolation::MissingName
        );
        assert_eq!(
            only_violation(&[json!({"name": "", "type": "number"})]),
            AttributeViolation::EmptyName
        );
        assert!(matches!(
            only_violation(&[json!({"name": 3, "type": "number"})]),
            AttributeViolation::NameNotString { .. }
        ));
        let long = "n".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            only_violation(&[json!({"name": long, "type": "number"})]),
            AttributeViolation::NameTooLong { length: 129, .. }
        ));
        let at_limit = "n".repeat(MAX_NAME_LENGTH);
        assert!(validate("test.js", &[json!({"name": at_limit, "type": "number"})]).is_ok());
    }

    #[test]
    fn type_checks() {
        assert_eq!(
            only_violation(&[json!({"name": "a"})]),
            AttributeViolation::MissingType
        );
        assert_eq!(
            only_violation(&[json!({"name": "a", "type": "Number"})]),
            AttributeViolation::UnknownType {
                type_name: "Number".to_string()
            }
        );
        assert!(matches!(
            only_violation(&[json!({"name": "a", "type": ["number"]})]),
            AttributeViolation::TypeNotString { .. }
        ));
    }

    #[test]
    fn display_name_and_description() {
        let table = validate(
            "test.js",
            &[json!({
                "name": "speed",
                "type": "number",
                "options": {"displayName": "Speed", "description": "Units per second"}
            })],
        )
        .unwrap();
        let speed = table.get("speed").unwrap();
        assert_eq!(speed.display_name, "Speed");
        assert_eq!(speed.description.as_deref(), Some("Units per second"));
        assert!(speed.options.is_empty());

        assert!(matches!(
            only_violation(&[json!({"name": "a", "type": "number", "options": {"displayName": 1}})]),
            AttributeViolation::OptionNotString {
                option: "displayName",
                ..
            }
        ));
        let long = "d".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert!(matches!(
            only_violation(&[json!({"name": "a", "type": "number", "options": {"description": long}})]),
            AttributeViolation::OptionTooLong {
                option: "description",
                ..
            }
        ));
    }

    #[test]
    fn options_must_be_an_object() {
        assert!(matches!(
            only_violation(&[json!({"name": "a", "type": "number", "options": [1]})]),
            AttributeViolation::OptionsNotObject { .. }
        ));
    }

    #[test]
    fn non_object_descriptor() {
        let errors = validate("test.js", &[json!("speed")]).unwrap_err();
        let error = errors.iter().next().unwrap();
        assert_eq!(error.attribute_name, None);
        assert!(matches!(error.violation, AttributeViolation::NotAnObject { .. }));
    }

    #[test]
    fn caller_descriptors_are_not_modified() {
        let descriptors = vec![json!({"name": "c", "type": "curve"})];
        let before = descriptors.clone();
        let table = validate("test.js", &descriptors).unwrap();
        assert_eq!(descriptors, before);
        assert_eq!(table.get("c").unwrap().options["curves"], json!(["Value"]));
    }

    #[test]
    fn duplicates_are_checked_against_accepted_names_only() {
        let descriptors = [
            json!({"name": "health", "type": "number", "defaultValue": "bad"}),
            json!({"name": "health", "type": "number"}),
        ];
        let errors = validate("test.js", &descriptors).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().index, 0);
    }

    #[test]
    fn batch_wrapper() {
        let batch: AttributeBatch = serde_json::from_value(json!({
            "name": "scripts/door.js",
            "values": [{"name": "open", "type": "boolean"}]
        }))
        .unwrap();
        let table = validate_batch(&batch).unwrap();
        assert_eq!(table.name(), "scripts/door.js");
        assert_eq!(table.get("open").unwrap().default_value, json!(false));
    }
}
