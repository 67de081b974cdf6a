//! # Schema Trees
//!
//! A [`SchemaTree`] is a frozen, shareable schema. Trees are built in two
//! phases:
//!
//! 1. parse or construct the base [`SchemaNode`];
//! 2. apply a finite list of named [`SchemaPatch`]es (environment-specific
//!    titles, runtime-computed defaults, editor overrides) through a
//!    [`SchemaTreeBuilder`].
//!
//! `build()` hands back the frozen tree. From then on the tree only offers
//! read access, so any number of threads may resolve, derive and
//! materialize against it concurrently.

use std::sync::Arc;

use edschema_core::TypeTag;
use serde_json::{Map, Value};

use crate::defaults::{self, DefaultsContext};
use crate::derive;
use crate::error::{ResolutionMiss, SchemaError, SchemaResult};
use crate::node::{DefaultValue, SchemaNode};
use crate::path::SchemaPath;
use crate::resolve;

/// A named, context-dependent adjustment applied while building a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaPatch {
    /// Set the display title of the node at `path`.
    Title { path: SchemaPath, title: String },
    /// Replace the default of the node at `path`.
    Default {
        path: SchemaPath,
        default: DefaultValue,
    },
    /// Set the editor type override of the node at `path`.
    EditorType {
        path: SchemaPath,
        editor_type: String,
    },
}

impl SchemaPatch {
    fn name(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::Default { .. } => "default",
            Self::EditorType { .. } => "editor type",
        }
    }

    fn path(&self) -> &SchemaPath {
        match self {
            Self::Title { path, .. } | Self::Default { path, .. } | Self::EditorType { path, .. } => {
                path
            }
        }
    }
}

/// Collects patches for a base schema and freezes the result.
#[derive(Debug, Clone)]
pub struct SchemaTreeBuilder {
    root: SchemaNode,
    patches: Vec<SchemaPatch>,
}

impl SchemaTreeBuilder {
    pub fn new(root: SchemaNode) -> Self {
        Self {
            root,
            patches: Vec::new(),
        }
    }

    /// Queue a patch. Patches apply in the order they were added.
    pub fn patch(mut self, patch: SchemaPatch) -> Self {
        self.patches.push(patch);
        self
    }

    pub fn title(self, path: impl Into<SchemaPath>, title: impl Into<String>) -> Self {
        self.patch(SchemaPatch::Title {
            path: path.into(),
            title: title.into(),
        })
    }

    pub fn default_value(self, path: impl Into<SchemaPath>, default: DefaultValue) -> Self {
        self.patch(SchemaPatch::Default {
            path: path.into(),
            default,
        })
    }

    pub fn editor_type(self, path: impl Into<SchemaPath>, editor_type: impl Into<String>) -> Self {
        self.patch(SchemaPatch::EditorType {
            path: path.into(),
            editor_type: editor_type.into(),
        })
    }

    /// Apply every queued patch and freeze the tree.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::PatchTarget` for the first patch whose path
    /// does not resolve.
    pub fn build(self) -> SchemaResult<SchemaTree> {
        let mut root = self.root;
        for patch in self.patches {
            let name = patch.name();
            let target =
                resolve::resolve_mut(&mut root, patch.path()).ok_or_else(|| SchemaError::PatchTarget {
                    patch: name,
                    path: patch.path().to_string(),
                })?;
            match patch {
                SchemaPatch::Title { title, .. } => target.set_title(title),
                SchemaPatch::Default { default, .. } => target.set_default(default),
                SchemaPatch::EditorType { editor_type, .. } => target.set_editor_type(editor_type),
            }
        }
        Ok(SchemaTree {
            root: Arc::new(root),
        })
    }
}

/// A frozen schema tree. Cloning shares the underlying nodes.
#[derive(Debug, Clone)]
pub struct SchemaTree {
    root: Arc<SchemaNode>,
}

impl SchemaTree {
    /// Freeze `root` without patches.
    pub fn new(root: SchemaNode) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Parse and freeze a schema document.
    pub fn from_document(doc: &Value) -> SchemaResult<Self> {
        SchemaNode::from_document(doc).map(Self::new)
    }

    /// Start a builder from a base schema.
    pub fn builder(root: SchemaNode) -> SchemaTreeBuilder {
        SchemaTreeBuilder::new(root)
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Resolve a path to a node.
    pub fn resolve(&self, path: impl Into<SchemaPath>) -> Option<&SchemaNode> {
        resolve::resolve(&self.root, &path.into())
    }

    /// Derive the tag at a path, answering `string` on a miss.
    pub fn type_at(&self, path: impl Into<SchemaPath>) -> TypeTag {
        derive::derive_type_for_path(&self.root, &path.into())
    }

    /// Derive the tag at a path, reporting a miss.
    pub fn type_at_strict(&self, path: impl Into<SchemaPath>) -> Result<TypeTag, ResolutionMiss> {
        derive::derive_type_for_path_strict(&self.root, &path.into())
    }

    /// Materialize the defaults of the root object.
    pub fn materialize(&self, ctx: &dyn DefaultsContext) -> Map<String, Value> {
        defaults::materialize(&self.root, ctx)
    }

    /// Materialize the defaults of the object at `path`, if it resolves.
    pub fn materialize_at(
        &self,
        path: impl Into<SchemaPath>,
        ctx: &dyn DefaultsContext,
    ) -> Option<Map<String, Value>> {
        self.resolve(path).map(|node| defaults::materialize(node, ctx))
    }

    /// Merge existing record data with the root object's defaults.
    pub fn default_data_for_record(
        &self,
        existing: Map<String, Value>,
        ctx: &dyn DefaultsContext,
    ) -> Map<String, Value> {
        defaults::default_data_for_record(&self.root, existing, ctx)
    }
}
