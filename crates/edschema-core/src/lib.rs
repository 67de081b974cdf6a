//! # edschema-core: Shared Vocabulary
//!
//! Leaf crate of the edschema workspace. It defines the type vocabulary
//! that the schema resolver and the attribute validator agree on, so
//! that a tag produced by one is understood by the other.
//!
//! ## Key Design Principles
//!
//! 1. **One tag type for derived schema types.** [`TypeTag`] covers the
//!    canonical short names (`number`, `vec3`, `array:asset`, `object`)
//!    and keeps editor overrides verbatim. Its `Display` form is the wire
//!    form.
//!
//! 2. **Closed attribute catalog.** [`AttributeType`] has exactly the 14
//!    script attribute types. Every rule table is an exhaustive `match`,
//!    so adding a type is a compile error everywhere it must be handled.
//!
//! 3. **Validated identifiers.** [`EntityGuid`] only parses the canonical
//!    hyphenated 8-4-4-4-12 form.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `edschema-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod attribute;
pub mod error;
pub mod identity;
pub mod tag;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use attribute::{AttributeType, ATTRIBUTE_TYPE_COUNT};
pub use error::EdschemaError;
pub use identity::EntityGuid;
pub use tag::TypeTag;
pub use value::{json_kind, numbers_equal, values_equal, JsonKind};
