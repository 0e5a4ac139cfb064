//! `depot-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{Entity, find_by_id};
pub use error::{CapacityExceeded, DomainError, DomainResult};
pub use id::{CategorySetId, GoodId, WarehouseId};
pub use value_object::ValueObject;
