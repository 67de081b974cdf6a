//! # Type Derivation
//!
//! Maps a schema node to its canonical [`TypeTag`]. Rules, in priority
//! order:
//!
//! 1. An explicit `$editorType` override is returned verbatim.
//! 2. A numeric array with fixed length 2, 3 or 4 is `vec2`/`vec3`/`vec4`.
//! 3. Any other array is `array:<element tag>`.
//! 4. Maps and mixed scalars are `object`.
//! 5. Scalars are their kind name, lowercased.
//! 6. Plain objects are `object`.
//!
//! Derivation is total. Tags drive rendering decisions that always need
//! an answer, so unusual shapes degrade to `object` instead of failing.

use edschema_core::TypeTag;

use crate::error::ResolutionMiss;
use crate::node::{NodeShape, ScalarKind, SchemaNode};
use crate::path::SchemaPath;
use crate::resolve::resolve;

/// Derive the tag of `node`, with `fixed_length` as the array length
/// context. Without one, the node's own `$length` applies.
pub fn derive_type(node: &SchemaNode, fixed_length: Option<u32>) -> TypeTag {
    if let Some(editor_type) = node.editor_type().filter(|t| !t.is_empty()) {
        return TypeTag::from_override(editor_type);
    }
    match node.shape() {
        NodeShape::Array { element, .. } => {
            let numeric = matches!(element.shape(), NodeShape::Scalar(ScalarKind::Number));
            let length = fixed_length.or(node.fixed_length());
            match length.and_then(TypeTag::vector) {
                Some(vector) if numeric => vector,
                _ => TypeTag::array_of(derive_type(element, None)),
            }
        }
        NodeShape::Map(_) => TypeTag::Object,
        NodeShape::Scalar(kind) => kind.type_tag(),
        NodeShape::Object(_) => TypeTag::Object,
    }
}

/// Derive the tag of `node` using its own declared `$length`.
pub fn derive_node_type(node: &SchemaNode) -> TypeTag {
    derive_type(node, node.fixed_length())
}

/// Resolve `path` and derive the tag of the node found there.
///
/// A miss is logged and answered with `string`, so callers always get a
/// usable tag. Use [`derive_type_for_path_strict`] to see the miss.
pub fn derive_type_for_path(root: &SchemaNode, path: &SchemaPath) -> TypeTag {
    match resolve(root, path) {
        Some(node) => derive_node_type(node),
        None => {
            tracing::warn!(%path, "schema path does not resolve; assuming string");
            TypeTag::String
        }
    }
}

/// Resolve `path` and derive its tag, reporting a miss to the caller.
pub fn derive_type_for_path_strict(
    root: &SchemaNode,
    path: &SchemaPath,
) -> Result<TypeTag, ResolutionMiss> {
    resolve(root, path)
        .map(derive_node_type)
        .ok_or_else(|| ResolutionMiss {
            path: path.to_string(),
        })
}
