//! # Validated Attribute Table
//!
//! The accepted, normalized output of one batch. Attributes are keyed by
//! name and `attributesOrder` keeps the order they were declared in.

use std::collections::BTreeMap;

use edschema_core::AttributeType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Option keys carried into the output. Everything else is dropped.
pub const ALLOWED_OPTIONS: &[&str] = &[
    "max",
    "min",
    "step",
    "type",
    "decimalPrecision",
    "enumerations",
    "curves",
    "color",
];

/// One accepted attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAttribute {
    pub name: String,
    /// `options.displayName`, or the name.
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub default_value: Value,
    /// Initial value; equal to the default.
    pub value: Value,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    /// Allow-listed options only.
    pub options: Map<String, Value>,
}

/// Copy the allow-listed keys of `options`.
pub fn allowed_options(options: &Map<String, Value>) -> Map<String, Value> {
    options
        .iter()
        .filter(|(key, _)| ALLOWED_OPTIONS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Attributes accepted from one source unit.
///
/// `attributes_order` and `attributes` always hold the same names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedAttributeTable {
    name: String,
    attributes: BTreeMap<String, NormalizedAttribute>,
    attributes_order: Vec<String>,
}

impl ValidatedAttributeTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            attributes_order: Vec::new(),
        }
    }

    /// Source unit the attributes were declared in.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an attribute. Returns it back if the name is already taken.
    pub fn insert(&mut self, attribute: NormalizedAttribute) -> Result<(), NormalizedAttribute> {
        if self.attributes.contains_key(&attribute.name) {
            return Err(attribute);
        }
        self.attributes_order.push(attribute.name.clone());
        self.attributes.insert(attribute.name.clone(), attribute);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&NormalizedAttribute> {
        self.attributes.get(name)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.attributes_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes_order.is_empty()
    }

    /// Attribute names in declaration order.
    pub fn order(&self) -> &[String] {
        &self.attributes_order
    }

    /// Attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &NormalizedAttribute> {
        self.attributes_order
            .iter()
            .filter_map(|name| self.attributes.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attribute(name: &str) -> NormalizedAttribute {
        NormalizedAttribute {
            name: name.to_string(),
            display_name: name.to_string(),
            description: None,
            default_value: json!(0),
            value: json!(0),
            attribute_type: AttributeType::Number,
            options: Map::new(),
        }
    }

    #[test]
    fn insert_keeps_declaration_order() {
        let mut table = ValidatedAttributeTable::new("player.js");
        table.insert(attribute("speed")).unwrap();
        table.insert(attribute("armor")).unwrap();
        assert_eq!(table.order(), ["speed", "armor"]);
        let names: Vec<&str> = table.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["speed", "armor"]);
    }

    #[test]
    fn duplicate_insert_is_refused() {
        let mut table = ValidatedAttributeTable::new("player.js");
        table.insert(attribute("health")).unwrap();
        let refused = table.insert(attribute("health")).unwrap_err();
        assert_eq!(refused.name, "health");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn allow_list_drops_unknown_options() {
        let options = json!({
            "min": 0, "max": 10, "step": 0.5, "decimalPrecision": 2,
            "displayName": "Speed", "placeholder": "fast", "onChange": "run()"
        });
        let Value::Object(options) = options else {
            unreachable!()
        };
        let kept = allowed_options(&options);
        let keys: Vec<&str> = kept.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["min", "max", "step", "decimalPrecision"]);
    }

    #[test]
    fn serializes_external_shape() {
        let mut table = ValidatedAttributeTable::new("player.js");
        let mut speed = attribute("speed");
        speed.display_name = "Speed".to_string();
        table.insert(speed).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["name"], "player.js");
        assert_eq!(json["attributesOrder"], json!(["speed"]));
        let speed = &json["attributes"]["speed"];
        assert_eq!(speed["displayName"], "Speed");
        assert_eq!(speed["defaultValue"], 0);
        assert_eq!(speed["type"], "number");
        assert!(speed.get("description").is_none());
    }
}
