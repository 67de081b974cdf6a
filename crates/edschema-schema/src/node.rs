//! # Schema Nodes
//!
//! The in-memory form of a schema document. A node is one of four shapes
//! (scalar, array, map, object) plus optional metadata: an editor type
//! override, a default value and a title.
//!
//! ## Document Form
//!
//! | document | node |
//! |----------|------|
//! | `"number"` | `Scalar(Number)` |
//! | `["number"]` | `Array(Scalar(Number))` |
//! | `{"$type": ["number"], "$length": 3}` | `Array(Scalar(Number), 3)` |
//! | `{"$type": "map", "$of": {...}}` | `Map(...)` |
//! | `{"name": "string", ...}` | `Object([name: Scalar(String), ...])` |
//!
//! Siblings `$editorType`, `$default` and `$title` decorate whichever node
//! the object describes. A default of the form `{"$provider": "name"}` is
//! deferred until materialization.

use edschema_core::{json_kind, TypeTag};
use serde_json::{Map, Value};

use crate::error::{SchemaError, SchemaResult};

/// Prefix shared by every schema metadata key.
pub const MARKER_PREFIX: &str = "$";

const TYPE_MARKER: &str = "$type";
const OF_MARKER: &str = "$of";
const LENGTH_MARKER: &str = "$length";
const EDITOR_TYPE_MARKER: &str = "$editorType";
const DEFAULT_MARKER: &str = "$default";
const TITLE_MARKER: &str = "$title";
const PROVIDER_MARKER: &str = "$provider";

const KNOWN_MARKERS: &[&str] = &[
    TYPE_MARKER,
    OF_MARKER,
    LENGTH_MARKER,
    EDITOR_TYPE_MARKER,
    DEFAULT_MARKER,
    TITLE_MARKER,
];

/// Kind of a scalar node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Number,
    String,
    Boolean,
    /// Untyped value, rendered as an object.
    Mixed,
    /// A map declared without a value schema.
    Map,
    Object,
    /// Any other kind name, kept as written.
    Other(String),
}

impl ScalarKind {
    /// Parse a kind name. Known names match case-insensitively.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "number" => Self::Number,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "mixed" => Self::Mixed,
            "map" => Self::Map,
            "object" => Self::Object,
            _ => Self::Other(name.to_string()),
        }
    }

    /// The kind name as it appears in a schema document.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Mixed => "mixed",
            Self::Map => "map",
            Self::Object => "object",
            Self::Other(name) => name,
        }
    }

    /// Whether values of this kind are rendered as generic objects.
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Mixed | Self::Map)
    }

    /// The tag of this kind: its name, lowercased.
    pub(crate) fn type_tag(&self) -> TypeTag {
        match self {
            Self::Number => TypeTag::Number,
            Self::String => TypeTag::String,
            Self::Boolean => TypeTag::Boolean,
            Self::Mixed | Self::Map | Self::Object => TypeTag::Object,
            Self::Other(name) if name.is_empty() => TypeTag::Object,
            Self::Other(name) => TypeTag::from_override(&name.to_lowercase()),
        }
    }
}

/// Opaque name of a deferred default provider.
///
/// Resolved at materialization time by a
/// [`DefaultsContext`](crate::defaults::DefaultsContext).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderHandle(String);

impl ProviderHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Default value declared on a node.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A concrete value, deep-copied on every materialization.
    Immediate(Value),
    /// A value computed from runtime context when materialized.
    Deferred(ProviderHandle),
}

impl DefaultValue {
    pub fn deferred(name: impl Into<String>) -> Self {
        Self::Deferred(ProviderHandle::new(name))
    }

    fn from_document(value: &Value, at: &str) -> SchemaResult<Self> {
        if let Value::Object(map) = value {
            if let Some(provider) = map.get(PROVIDER_MARKER) {
                return match provider {
                    Value::String(name) if !name.is_empty() && map.len() == 1 => {
                        Ok(Self::deferred(name.clone()))
                    }
                    _ => Err(SchemaError::InvalidMarker {
                        at: at.to_string(),
                        marker: PROVIDER_MARKER,
                        reason: "expected a lone non-empty provider name".to_string(),
                    }),
                };
            }
        }
        Ok(Self::Immediate(value.clone()))
    }

    fn to_document(&self) -> Value {
        match self {
            Self::Immediate(value) => value.clone(),
            Self::Deferred(handle) => {
                let mut map = Map::new();
                map.insert(PROVIDER_MARKER.to_string(), Value::String(handle.0.clone()));
                Value::Object(map)
            }
        }
    }
}

/// A named field of an object node.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub node: SchemaNode,
}

/// Structural shape of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeShape {
    Scalar(ScalarKind),
    Array {
        element: Box<SchemaNode>,
        fixed_length: Option<u32>,
    },
    /// Every key resolves to the same value schema.
    Map(Box<SchemaNode>),
    /// Fields in declaration order.
    Object(Vec<SchemaField>),
}

/// One node of a schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    shape: NodeShape,
    editor_type: Option<String>,
    default: Option<DefaultValue>,
    title: Option<String>,
}

impl SchemaNode {
    fn with_shape(shape: NodeShape) -> Self {
        Self {
            shape,
            editor_type: None,
            default: None,
            title: None,
        }
    }

    pub fn scalar(kind: ScalarKind) -> Self {
        Self::with_shape(NodeShape::Scalar(kind))
    }

    pub fn array(element: SchemaNode) -> Self {
        Self::with_shape(NodeShape::Array {
            element: Box::new(element),
            fixed_length: None,
        })
    }

    pub fn fixed_array(element: SchemaNode, length: u32) -> Self {
        Self::with_shape(NodeShape::Array {
            element: Box::new(element),
            fixed_length: Some(length),
        })
    }

    pub fn map(value: SchemaNode) -> Self {
        Self::with_shape(NodeShape::Map(Box::new(value)))
    }

    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaNode)>,
        S: Into<String>,
    {
        Self::with_shape(NodeShape::Object(
            fields
                .into_iter()
                .map(|(name, node)| SchemaField {
                    name: name.into(),
                    node,
                })
                .collect(),
        ))
    }

    pub fn with_editor_type(mut self, editor_type: impl Into<String>) -> Self {
        self.editor_type = Some(editor_type.into());
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn shape(&self) -> &NodeShape {
        &self.shape
    }

    pub fn editor_type(&self) -> Option<&str> {
        self.editor_type.as_deref()
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Declared fixed length, for array nodes.
    pub fn fixed_length(&self) -> Option<u32> {
        match &self.shape {
            NodeShape::Array { fixed_length, .. } => *fixed_length,
            _ => None,
        }
    }

    /// Fields of an object node, in declaration order. Empty otherwise.
    pub fn fields(&self) -> &[SchemaField] {
        match &self.shape {
            NodeShape::Object(fields) => fields,
            _ => &[],
        }
    }

    /// Exact, case-sensitive field lookup.
    pub fn field(&self, name: &str) -> Option<&SchemaNode> {
        self.fields()
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.node)
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut SchemaNode> {
        match &mut self.shape {
            NodeShape::Object(fields) => fields
                .iter_mut()
                .find(|f| f.name == name)
                .map(|f| &mut f.node),
            _ => None,
        }
    }

    pub(crate) fn shape_mut(&mut self) -> &mut NodeShape {
        &mut self.shape
    }

    pub(crate) fn set_editor_type(&mut self, editor_type: String) {
        self.editor_type = Some(editor_type);
    }

    pub(crate) fn set_default(&mut self, default: DefaultValue) {
        self.default = Some(default);
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }

    /// Parse a schema document.
    pub fn from_document(doc: &Value) -> SchemaResult<Self> {
        parse_node(doc, "$root")
    }

    /// Render this node back into document form.
    pub fn to_document(&self) -> Value {
        let has_meta = self.editor_type.is_some() || self.default.is_some() || self.title.is_some();
        let mut out = match &self.shape {
            NodeShape::Scalar(kind) if !has_meta => return Value::String(kind.as_str().to_string()),
            NodeShape::Array {
                element,
                fixed_length: None,
            } if !has_meta => return Value::Array(vec![element.to_document()]),
            NodeShape::Scalar(kind) => {
                let mut map = Map::new();
                map.insert(TYPE_MARKER.to_string(), Value::String(kind.as_str().to_string()));
                map
            }
            NodeShape::Array {
                element,
                fixed_length,
            } => {
                let mut map = Map::new();
                map.insert(
                    TYPE_MARKER.to_string(),
                    Value::Array(vec![element.to_document()]),
                );
                if let Some(length) = fixed_length {
                    map.insert(LENGTH_MARKER.to_string(), Value::from(*length));
                }
                map
            }
            NodeShape::Map(value) => {
                let mut map = Map::new();
                map.insert(TYPE_MARKER.to_string(), Value::String("map".to_string()));
                map.insert(OF_MARKER.to_string(), value.to_document());
                map
            }
            NodeShape::Object(fields) => fields
                .iter()
                .map(|f| (f.name.clone(), f.node.to_document()))
                .collect(),
        };
        if let Some(editor_type) = &self.editor_type {
            out.insert(
                EDITOR_TYPE_MARKER.to_string(),
                Value::String(editor_type.clone()),
            );
        }
        if let Some(default) = &self.default {
            out.insert(DEFAULT_MARKER.to_string(), default.to_document());
        }
        if let Some(title) = &self.title {
            out.insert(TITLE_MARKER.to_string(), Value::String(title.clone()));
        }
        Value::Object(out)
    }
}

fn child_path(at: &str, segment: &str) -> String {
    format!("{at}.{segment}")
}

fn parse_node(doc: &Value, at: &str) -> SchemaResult<SchemaNode> {
    match doc {
        Value::String(name) if name.is_empty() => Err(SchemaError::EmptyKind { at: at.to_string() }),
        Value::String(name) => Ok(SchemaNode::scalar(ScalarKind::parse(name))),
        Value::Array(items) => match items.as_slice() {
            [element] => Ok(SchemaNode::array(parse_node(element, &child_path(at, "[]"))?)),
            _ => Err(SchemaError::ArrayLiteral {
                at: at.to_string(),
                len: items.len(),
            }),
        },
        Value::Object(map) => parse_object(map, at),
        other => Err(SchemaError::InvalidNode {
            at: at.to_string(),
            found: json_kind(other),
        }),
    }
}

fn parse_object(map: &Map<String, Value>, at: &str) -> SchemaResult<SchemaNode> {
    let mut node = match (map.get(TYPE_MARKER), map.get(OF_MARKER)) {
        (Some(Value::String(kind)), Some(of)) if kind == "map" => {
            SchemaNode::map(parse_node(of, &child_path(at, OF_MARKER))?)
        }
        (Some(declared), _) => parse_node(declared, &child_path(at, TYPE_MARKER))?,
        (None, _) => {
            let mut fields = Vec::new();
            for (name, value) in map {
                if name.starts_with(MARKER_PREFIX) {
                    continue;
                }
                fields.push(SchemaField {
                    name: name.clone(),
                    node: parse_node(value, &child_path(at, name))?,
                });
            }
            SchemaNode::with_shape(NodeShape::Object(fields))
        }
    };

    if let Some(length) = map.get(LENGTH_MARKER) {
        let length = length
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| SchemaError::InvalidMarker {
                at: at.to_string(),
                marker: LENGTH_MARKER,
                reason: format!("expected an unsigned integer, found {length}"),
            })?;
        match node.shape_mut() {
            NodeShape::Array { fixed_length, .. } => *fixed_length = Some(length),
            _ => tracing::warn!(at, "$length on a non-array schema node is ignored"),
        }
    }

    if let Some(editor_type) = map.get(EDITOR_TYPE_MARKER) {
        match editor_type {
            Value::String(s) if !s.is_empty() => node.set_editor_type(s.clone()),
            other => {
                return Err(SchemaError::InvalidMarker {
                    at: at.to_string(),
                    marker: EDITOR_TYPE_MARKER,
                    reason: format!("expected a non-empty string, found {}", json_kind(other)),
                })
            }
        }
    }

    if let Some(default) = map.get(DEFAULT_MARKER) {
        node.set_default(DefaultValue::from_document(default, at)?);
    }

    if let Some(title) = map.get(TITLE_MARKER) {
        match title {
            Value::String(s) => node.set_title(s.clone()),
            other => {
                return Err(SchemaError::InvalidMarker {
                    at: at.to_string(),
                    marker: TITLE_MARKER,
                    reason: format!("expected a string, found {}", json_kind(other)),
                })
            }
        }
    }

    for key in ignored_keys(map) {
        if key.starts_with(MARKER_PREFIX) {
            tracing::warn!(at, marker = %key, "unknown schema marker ignored");
        } else {
            tracing::warn!(at, key, "field beside $type ignored");
        }
    }

    Ok(node)
}

/// Keys of a node document that contribute nothing to the parsed node:
/// unknown markers, and plain keys when `$type` describes the node.
fn ignored_keys(map: &Map<String, Value>) -> Vec<&str> {
    let typed = map.contains_key(TYPE_MARKER);
    map.keys()
        .map(String::as_str)
        .filter(|key| {
            if key.starts_with(MARKER_PREFIX) {
                !KNOWN_MARKERS.contains(key)
            } else {
                typed
            }
        })
        .collect()
}
