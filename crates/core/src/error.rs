//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::WarehouseId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Structured context of a rejected add that would overflow a warehouse.
///
/// Callers pattern-match on this to render a precise message without
/// recomputing the warehouse load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityExceeded {
    pub warehouse_id: WarehouseId,
    pub max_capacity_kg: u64,
    pub current_weight_kg: f64,
    pub attempted_add_kg: f64,
}

impl CapacityExceeded {
    /// Weight the warehouse would have held had the add gone through.
    pub fn next_weight_kg(&self) -> f64 {
        self.current_weight_kg + self.attempted_add_kg
    }
}

impl core::fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "warehouse {} capacity exceeded: {}kg > {}kg",
            self.warehouse_id,
            self.next_weight_kg(),
            self.max_capacity_kg
        )
    }
}

/// Domain-level error.
///
/// Every variant is a deterministic, caller-visible failure. None of them is
/// retried internally and none of them leaves a partial write behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed input to an operation (empty name, bad date, unknown category...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Reference to a warehouse or category set that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The add would push a warehouse past its maximum capacity.
    #[error("{0}")]
    CapacityExceeded(CapacityExceeded),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn capacity_exceeded(details: CapacityExceeded) -> Self {
        Self::CapacityExceeded(details)
    }

    /// Short machine-readable code, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::NotFound { .. } => "not_found",
            DomainError::CapacityExceeded(_) => "capacity_exceeded",
        }
    }
}

impl From<CapacityExceeded> for DomainError {
    fn from(value: CapacityExceeded) -> Self {
        Self::CapacityExceeded(value)
    }
}
