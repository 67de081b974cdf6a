//! # Script Batch Tests
//!
//! Whole-batch validation of realistic script attribute declarations.

use edschema_attributes::{validate, validate_batch, AttributeBatch, AttributeViolation};
use edschema_core::AttributeType;
use proptest::prelude::*;
use serde_json::{json, Value};

fn player_descriptors() -> Vec<Value> {
    vec![
        json!({"name": "speed", "type": "number", "options": {"min": 0, "max": 20, "step": 0.5}}),
        json!({"name": "title", "type": "string", "defaultValue": "Player One"}),
        json!({"name": "godMode", "type": "boolean"}),
        json!({"name": "sprites", "type": "asset", "defaultValue": [12, 14], "options": {"assetType": "sprite"}}),
        json!({"name": "tint", "type": "rgba"}),
        json!({"name": "spawn", "type": "vec3", "defaultValue": [0, 1.5, 0]}),
        json!({"name": "target", "type": "entity", "defaultValue": "3f2504e0-4f89-11d3-9a0c-0305e82c3301"}),
        json!({"name": "difficulty", "type": "enumeration", "defaultValue": "hard", "options": {
            "enumerations": [{"name": "Easy", "value": "easy"}, {"name": "Hard", "value": "hard"}]
        }}),
        json!({"name": "falloff", "type": "curve", "options": {"curves": ["x", "y"]}}),
        json!({"name": "gradient", "type": "colorcurve", "options": {"type": "rgba"}}),
    ]
}

#[test]
fn accepts_a_full_player_script() {
    let table = validate("scripts/player.js", &player_descriptors()).unwrap();
    assert_eq!(table.len(), 10);
    assert_eq!(table.order()[0], "speed");
    assert_eq!(table.order()[9], "gradient");

    let speed = table.get("speed").unwrap();
    assert_eq!(speed.default_value, json!(0));
    assert_eq!(speed.options, json!({"min": 0, "max": 20, "step": 0.5}).as_object().unwrap().clone());

    assert!(table.get("sprites").unwrap().options.is_empty());
    assert_eq!(table.get("tint").unwrap().default_value, json!([0, 0, 0, 1]));
    assert_eq!(table.get("difficulty").unwrap().value, json!("hard"));
    assert_eq!(
        table.get("falloff").unwrap().default_value,
        json!({"type": 1, "keys": [[0, 0], [0, 0]]})
    );
    let gradient = table.get("gradient").unwrap();
    assert_eq!(gradient.attribute_type, AttributeType::Colorcurve);
    assert_eq!(gradient.options["type"], "rgba");
    assert_eq!(gradient.default_value["keys"].as_array().unwrap().len(), 4);
}

#[test]
fn mixed_enumeration_kinds_are_rejected() {
    let errors = validate(
        "mode.js",
        &[json!({"name": "mode", "type": "enumeration", "options": {
            "enumerations": [{"name": "A", "value": 1}, {"name": "B", "value": "x"}]
        }})],
    )
    .unwrap_err();
    assert_eq!(errors.attribute_names(), vec!["mode"]);
    assert!(matches!(
        errors.iter().next().unwrap().violation,
        AttributeViolation::MixedEnumerationKinds { .. }
    ));
}

#[test]
fn short_rgba_is_rejected() {
    let errors = validate(
        "color.js",
        &[json!({"name": "col", "type": "rgba", "defaultValue": [1, 0, 0]})],
    )
    .unwrap_err();
    assert_eq!(
        errors.iter().next().unwrap().violation,
        AttributeViolation::DefaultLength {
            expected: 4,
            found: 3
        }
    );
}

#[test]
fn duplicate_names_fail_the_batch() {
    let errors = validate(
        "health.js",
        &[
            json!({"name": "health", "type": "number", "defaultValue": 100}),
            json!({"name": "health", "type": "number", "defaultValue": 50}),
        ],
    )
    .unwrap_err();
    assert_eq!(errors.len(), 1);
    let error = errors.iter().next().unwrap();
    assert_eq!(error.index, 1);
    assert_eq!(
        error.violation,
        AttributeViolation::DuplicateName {
            name: "health".to_string()
        }
    );
}

#[test]
fn every_failure_is_reported_in_one_pass() {
    let mut descriptors = player_descriptors();
    descriptors.insert(1, json!({"name": "broken", "type": "vec2", "defaultValue": [1]}));
    descriptors.push(json!({"name": "mystery", "type": "quaternion"}));
    descriptors.push(json!({"type": "number"}));

    let errors = validate("scripts/player.js", &descriptors).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.attribute_names(), vec!["broken", "mystery"]);
    let report = errors.to_string();
    assert_eq!(report.lines().count(), 3);
    assert!(report.lines().all(|line| line.starts_with("scripts/player.js")));
}

#[test]
fn well_shaped_curves_pass_through_unchanged() {
    let curve = json!({"type": 2, "keys": [[0, 0, 1, 1], [0, 1], [], [0.5, 0.25]]});
    let color = json!({"type": 0, "keys": [0, 0, 1, 1]});
    let table = validate(
        "curves.js",
        &[
            json!({"name": "xyzw", "type": "curve", "defaultValue": curve, "options": {"curves": ["x", "y", "z", "w"]}}),
            json!({"name": "red", "type": "colorcurve", "defaultValue": color, "options": {"type": "r"}}),
        ],
    )
    .unwrap();
    assert_eq!(table.get("xyzw").unwrap().default_value, curve);
    assert_eq!(table.get("red").unwrap().default_value, color);
}

#[test]
fn two_channel_color_curves_are_rejected() {
    let errors = validate(
        "paint.js",
        &[json!({"name": "c", "type": "colorcurve", "options": {"type": "rg"}})],
    )
    .unwrap_err();
    assert_eq!(
        errors.iter().next().unwrap().violation,
        AttributeViolation::ColorChannels {
            value: "rg".to_string()
        }
    );
}

#[test]
fn float_curve_type_is_accepted() {
    let curve = json!({"type": 1.0, "keys": [0, 0, 1, 1]});
    let table = validate(
        "curves.js",
        &[json!({"name": "falloff", "type": "curve", "defaultValue": curve})],
    )
    .unwrap();
    assert_eq!(table.get("falloff").unwrap().default_value, curve);
}

#[test]
fn batch_shape_deserializes() {
    let batch: AttributeBatch = serde_json::from_str(
        r#"{"name": "scripts/door.js", "values": [{"name": "open", "type": "boolean", "defaultValue": true}]}"#,
    )
    .unwrap();
    let table = validate_batch(&batch).unwrap();
    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["attributesOrder"], json!(["open"]));
    assert_eq!(json["attributes"]["open"]["value"], true);
}

/// A batch with unique names, paired with a shuffled copy of itself.
fn batch_and_shuffle() -> impl Strategy<Value = (Vec<Value>, Vec<Value>)> {
    let kind = prop::sample::select(vec!["number", "string", "rgba", "vec2", "entity", "bogus"]);
    let default = prop_oneof![
        Just(Value::Null),
        Just(json!(1)),
        Just(json!("text")),
        Just(json!([0, 0])),
        Just(json!([0, 0, 0, 1])),
    ];
    prop::sample::subsequence(vec!["a", "b", "c", "d", "e", ""], 0..=6)
        .prop_flat_map(move |names| {
            let parts = prop::collection::vec((kind.clone(), default.clone()), names.len());
            (Just(names), parts)
        })
        .prop_map(|(names, parts)| {
            names
                .into_iter()
                .zip(parts)
                .map(|(name, (kind, default))| {
                    json!({"name": name, "type": kind, "defaultValue": default})
                })
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|ds| (Just(ds.clone()), Just(ds).prop_shuffle()))
}

fn failing_names(descriptors: &[Value]) -> Vec<Option<String>> {
    let mut names: Vec<Option<String>> = match validate("prop.js", descriptors) {
        Ok(_) => Vec::new(),
        Err(errors) => errors.iter().map(|e| e.attribute_name.clone()).collect(),
    };
    names.sort();
    names
}

proptest! {
    /// Reordering a batch never changes which names fail.
    #[test]
    fn failing_names_are_order_invariant((original, shuffled) in batch_and_shuffle()) {
        prop_assert_eq!(failing_names(&original), failing_names(&shuffled));
    }
}
