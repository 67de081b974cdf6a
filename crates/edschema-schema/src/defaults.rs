//! # Default Materialization
//!
//! Produces concrete default values for the fields of an object schema.
//!
//! Immediate defaults are deep-copied on every call, so two
//! materializations never share a value with each other or with the
//! schema. Deferred defaults name a provider that the caller's
//! [`DefaultsContext`] resolves against runtime state (project
//! dimensions, the validity of a previously selected resource, ...).
//!
//! Providers run after every immediate default has been copied, once
//! each, in field declaration order. A provider sees only its context,
//! never the other fields being materialized.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::node::{DefaultValue, NodeShape, ProviderHandle, SchemaNode, MARKER_PREFIX};

/// Runtime context that resolves deferred defaults.
///
/// Implementations read external state and must not touch the schema.
pub trait DefaultsContext {
    /// Compute the value for `handle`, or `None` if the provider is unknown.
    fn provide(&self, handle: &ProviderHandle) -> Option<Value>;
}

impl<F> DefaultsContext for F
where
    F: Fn(&ProviderHandle) -> Option<Value>,
{
    fn provide(&self, handle: &ProviderHandle) -> Option<Value> {
        self(handle)
    }
}

/// A context with no providers. Every deferred default is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProviders;

impl DefaultsContext for NoProviders {
    fn provide(&self, _handle: &ProviderHandle) -> Option<Value> {
        None
    }
}

/// A context backed by fixed values, keyed by provider name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticProviders {
    values: BTreeMap<String, Value>,
}

impl StaticProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for StaticProviders {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}

impl DefaultsContext for StaticProviders {
    fn provide(&self, handle: &ProviderHandle) -> Option<Value> {
        self.values.get(handle.name()).cloned()
    }
}

enum Slot<'a> {
    Ready(Value),
    Pending(&'a ProviderHandle),
}

/// Materialize the defaults declared on the fields of `node`.
///
/// Fields without a default are absent from the result. A non-object
/// node has no fields and yields an empty map. A deferred default whose
/// provider the context does not know is logged and left out.
pub fn materialize(node: &SchemaNode, ctx: &dyn DefaultsContext) -> Map<String, Value> {
    merge_defaults(node, Map::new(), ctx)
}

/// Build the data for a record: existing values win, defaults fill the rest.
///
/// For each schema field, a key already present in `existing` is taken
/// verbatim (no copy, no provider call); otherwise the field's default is
/// materialized as in [`materialize`]. Keys of `existing` that the schema
/// does not declare are dropped.
pub fn default_data_for_record(
    node: &SchemaNode,
    existing: Map<String, Value>,
    ctx: &dyn DefaultsContext,
) -> Map<String, Value> {
    merge_defaults(node, existing, ctx)
}

fn merge_defaults(
    node: &SchemaNode,
    mut existing: Map<String, Value>,
    ctx: &dyn DefaultsContext,
) -> Map<String, Value> {
    if !matches!(node.shape(), NodeShape::Object(_)) {
        tracing::debug!("defaults requested for a non-object schema node");
    }

    let mut slots: Vec<(&str, Slot<'_>)> = Vec::new();
    for field in node.fields() {
        if field.name.starts_with(MARKER_PREFIX) {
            continue;
        }
        if let Some(value) = existing.remove(&field.name) {
            slots.push((&field.name, Slot::Ready(value)));
            continue;
        }
        match field.node.default_value() {
            Some(DefaultValue::Immediate(value)) => {
                slots.push((&field.name, Slot::Ready(value.clone())));
            }
            Some(DefaultValue::Deferred(handle)) => {
                slots.push((&field.name, Slot::Pending(handle)));
            }
            None => {}
        }
    }

    if !existing.is_empty() {
        tracing::debug!(
            dropped = existing.len(),
            "record keys not declared by the schema were dropped"
        );
    }

    let mut out = Map::new();
    for (name, slot) in slots {
        match slot {
            Slot::Ready(value) => {
                out.insert(name.to_string(), value);
            }
            Slot::Pending(handle) => match ctx.provide(handle) {
                Some(value) => {
                    out.insert(name.to_string(), value);
                }
                None => {
                    tracing::warn!(field = name, provider = %handle, "deferred default has no provider");
                }
            },
        }
    }
    out
}
