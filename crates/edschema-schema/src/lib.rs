//! # edschema-schema: Schema Resolution & Defaults
//!
//! Resolves the declarative configuration schema that describes scene
//! entities, components, assets, materials and project settings.
//!
//! ## Components
//!
//! - [`node`]: the [`SchemaNode`] tagged union and the document parser.
//! - [`resolve`]: walks a dotted path through objects, maps and arrays.
//! - [`derive`]: turns a node into its canonical [`TypeTag`](edschema_core::TypeTag).
//! - [`defaults`]: materializes default values, evaluating deferred
//!   defaults through an injected [`DefaultsContext`].
//! - [`tree`]: two-phase construction of frozen, shareable [`SchemaTree`]s.
//! - [`registry`]: loads a directory of schema documents by name.
//!
//! ## Crate Policy
//!
//! - Depends only on `edschema-core` internally.
//! - Trees are immutable once built; no operation here mutates a frozen
//!   tree.
//! - Resolution misses are answered, not raised: lenient lookups log and
//!   fall back, strict lookups return [`ResolutionMiss`].

pub mod defaults;
pub mod derive;
pub mod error;
pub mod node;
pub mod path;
pub mod registry;
pub mod resolve;
pub mod tree;

pub use defaults::{
    default_data_for_record, materialize, DefaultsContext, NoProviders, StaticProviders,
};
pub use derive::{derive_node_type, derive_type, derive_type_for_path, derive_type_for_path_strict};
pub use error::{ResolutionMiss, SchemaError, SchemaResult};
pub use node::{DefaultValue, NodeShape, ProviderHandle, ScalarKind, SchemaField, SchemaNode};
pub use path::SchemaPath;
pub use registry::{load_document, yaml_to_json_value, SchemaRegistry};
pub use resolve::resolve;
pub use tree::{SchemaPatch, SchemaTree, SchemaTreeBuilder};
