//! # Resolver and Materializer Properties
//!
//! Property tests over generated schema documents:
//!
//! - path lookup agrees with resolving then deriving;
//! - derivation always yields a non-empty tag;
//! - materialized defaults never alias each other or the schema.

use edschema_schema::{
    derive_node_type, derive_type, derive_type_for_path, materialize, resolve, NoProviders,
    SchemaNode, SchemaPath,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const FIELD_NAMES: &[&str] = &["alpha", "beta", "gamma", "delta"];

fn kind_name() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!("number")),
        Just(json!("string")),
        Just(json!("boolean")),
        Just(json!("mixed")),
        Just(json!("map")),
        Just(json!("Asset")),
        Just(json!("Entity")),
    ]
}

fn schema_document() -> impl Strategy<Value = Value> {
    kind_name().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| json!([e])),
            (inner.clone(), 0u32..6).prop_map(|(e, n)| json!({"$type": [e], "$length": n})),
            inner.clone().prop_map(|e| json!({"$type": "map", "$of": e})),
            (inner.clone(), "[a-z]{1,8}").prop_map(|(e, t)| json!({"$type": e, "$editorType": t})),
            prop::collection::vec((prop::sample::select(FIELD_NAMES), inner), 1..4).prop_map(
                |fields| {
                    let map: Map<String, Value> = fields
                        .into_iter()
                        .map(|(name, node)| (name.to_string(), node))
                        .collect();
                    Value::Object(map)
                }
            ),
        ]
    })
}

fn schema_path() -> impl Strategy<Value = SchemaPath> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(FIELD_NAMES).prop_map(str::to_string),
            (0u8..3).prop_map(|i| i.to_string()),
            Just("key".to_string()),
        ],
        0..5,
    )
    .prop_map(SchemaPath::from)
}

fn defaults_document() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
    ];
    let value = leaf.prop_recursive(3, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Value::Array)
    });
    prop::collection::btree_map("[a-z]{1,6}", value, 1..6).prop_map(|fields| {
        let map: Map<String, Value> = fields
            .into_iter()
            .map(|(name, default)| (name, json!({"$type": "mixed", "$default": default})))
            .collect();
        Value::Object(map)
    })
}

proptest! {
    /// Path lookup is resolve followed by derivation whenever the path resolves.
    #[test]
    fn path_lookup_matches_resolve_then_derive(doc in schema_document(), path in schema_path()) {
        let root = SchemaNode::from_document(&doc).unwrap();
        if let Some(node) = resolve(&root, &path) {
            prop_assert_eq!(
                derive_type_for_path(&root, &path),
                derive_type(node, node.fixed_length())
            );
        }
    }

    /// Derivation is total and never produces an empty tag.
    #[test]
    fn derivation_is_total(doc in schema_document(), length in proptest::option::of(0u32..8)) {
        let node = SchemaNode::from_document(&doc).unwrap();
        prop_assert!(!derive_type(&node, length).to_string().is_empty());
        prop_assert!(!derive_node_type(&node).to_string().is_empty());
    }

    /// Resolution is deterministic.
    #[test]
    fn resolution_is_deterministic(doc in schema_document(), path in schema_path()) {
        let root = SchemaNode::from_document(&doc).unwrap();
        prop_assert_eq!(resolve(&root, &path), resolve(&root, &path));
    }

    /// Two materializations are equal but independent of each other and of the schema.
    #[test]
    fn materialization_does_not_alias(doc in defaults_document()) {
        let node = SchemaNode::from_document(&doc).unwrap();
        let mut first = materialize(&node, &NoProviders);
        let second = materialize(&node, &NoProviders);
        prop_assert_eq!(&first, &second);

        for value in first.values_mut() {
            *value = json!("mutated");
        }
        let third = materialize(&node, &NoProviders);
        prop_assert_eq!(&second, &third);
        prop_assert_eq!(node, SchemaNode::from_document(&doc).unwrap());
    }
}
