//! # edschema-attributes: Script Attribute Validation
//!
//! Checks the attribute declarations scanned from script source units
//! and turns them into a [`ValidatedAttributeTable`] the editor can show.
//!
//! ## Components
//!
//! - [`validate`]: the per-descriptor pipeline and batch entry points.
//! - [`rules`]: structural rules per [`AttributeType`](edschema_core::AttributeType).
//! - [`curve`]: channel shape rules for `curve` and `colorcurve`.
//! - [`table`]: the normalized output and its option allow-list.
//! - [`error`]: violations and the per-batch error collection.
//!
//! ## Crate Policy
//!
//! - Depends only on `edschema-core` internally.
//! - Never mutates caller input; normalization works on copies.
//! - Collects every failure of a batch before reporting.

pub mod curve;
pub mod error;
pub mod rules;
pub mod table;
pub mod validate;

pub use error::{AttributeError, AttributeErrors, AttributeViolation};
pub use table::{NormalizedAttribute, ValidatedAttributeTable, ALLOWED_OPTIONS};
pub use validate::{validate, validate_batch, AttributeBatch};
