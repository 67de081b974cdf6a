//! # Path Resolution
//!
//! Walks a schema tree one segment at a time:
//!
//! 1. A map consumes the segment as an arbitrary key and yields its value
//!    schema. Map indirection is tried before any field lookup.
//! 2. An object descends into the field the segment names (exact,
//!    case-sensitive).
//! 3. An array descends into its element schema when the segment is a
//!    non-negative integer. All indices share one element schema.
//!
//! Anything else is a miss for the whole path; partial results are never
//! returned. Resolution is pure, so callers may cache results by path.

use crate::node::{NodeShape, SchemaNode};
use crate::path::{is_index, SchemaPath};

/// Resolve `path` against `root`.
pub fn resolve<'a>(root: &'a SchemaNode, path: &SchemaPath) -> Option<&'a SchemaNode> {
    path.segments()
        .iter()
        .try_fold(root, |node, segment| step(node, segment))
}

fn step<'a>(node: &'a SchemaNode, segment: &str) -> Option<&'a SchemaNode> {
    match node.shape() {
        NodeShape::Map(value) => Some(&**value),
        NodeShape::Object(_) => node.field(segment),
        NodeShape::Array { element, .. } if is_index(segment) => Some(&**element),
        NodeShape::Array { .. } | NodeShape::Scalar(_) => None,
    }
}

/// Mutable resolution, used while a tree is still being built.
pub(crate) fn resolve_mut<'a>(
    root: &'a mut SchemaNode,
    path: &SchemaPath,
) -> Option<&'a mut SchemaNode> {
    let mut node = root;
    for segment in path.segments() {
        node = step_mut(node, segment)?;
    }
    Some(node)
}

fn step_mut<'a>(node: &'a mut SchemaNode, segment: &str) -> Option<&'a mut SchemaNode> {
    if matches!(node.shape(), NodeShape::Object(_)) {
        return node.field_mut(segment);
    }
    match node.shape_mut() {
        NodeShape::Map(value) => Some(&mut **value),
        NodeShape::Array { element, .. } if is_index(segment) => Some(&mut **element),
        _ => None,
    }
}
