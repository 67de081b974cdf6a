//! # Entity Identifiers
//!
//! Newtype wrapper for scene entity references. Script attributes of type
//! `entity` carry one of these (or null) as their value.
//!
//! Only the canonical hyphenated form is accepted: 8-4-4-4-12 hex digits,
//! either case. The braced, URN and un-hyphenated spellings that a general
//! UUID parser tolerates are rejected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EdschemaError;

/// Length of the canonical hyphenated form.
const HYPHENATED_LEN: usize = 36;

/// Unique identifier for a scene entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityGuid(pub Uuid);

impl EntityGuid {
    /// Parse a guid from its canonical hyphenated text.
    pub fn parse(text: &str) -> Result<Self, EdschemaError> {
        if text.len() != HYPHENATED_LEN {
            return Err(EdschemaError::InvalidEntityGuid(text.to_string()));
        }
        Uuid::try_parse(text)
            .map(Self)
            .map_err(|_| EdschemaError::InvalidEntityGuid(text.to_string()))
    }

    /// Whether `text` is a canonical entity guid.
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for EntityGuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
