//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Find an entity by identifier in an ordered collection.
pub fn find_by_id<'a, E: Entity>(items: &'a [E], id: &E::Id) -> Option<&'a E> {
    items.iter().find(|item| item.id() == id)
}
