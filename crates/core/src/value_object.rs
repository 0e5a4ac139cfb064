//! Value object trait: equality by value, not identity.
//!
//! Value objects have no identity. They are defined entirely by their
//! attribute values and are validated once, at construction.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. An expiry date or a normalized category label is a value
/// object; a warehouse or a stored good is an entity.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ExpiryDate(String);
///
/// impl ValueObject for ExpiryDate {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
