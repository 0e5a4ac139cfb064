//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are opaque strings on the wire (`"wh-1"`, `"good_<uuid>"`) so a
//! persisted document written by another client reads back unchanged.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a warehouse (fixed set, e.g. `wh-1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseId(String);

/// Identifier of a stored good (inventory line).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoodId(String);

/// Identifier of a goods category set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySetId(String);

macro_rules! impl_string_id {
    ($t:ty) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };

    ($t:ty, prefix = $prefix:literal) => {
        impl_string_id!($t);

        impl $t {
            /// Generate a fresh identifier (`<prefix>_<uuid>`).
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::now_v7()))
            }
        }
    };
}

impl_string_id!(WarehouseId);
impl_string_id!(GoodId, prefix = "good");
impl_string_id!(CategorySetId, prefix = "catset");
