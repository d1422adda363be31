//! Entity trait: records that keep their identity while their fields change.
//!
//! Catalog products and customers are entities: the invoice engine looks them up
//! by id, then copies their current field values into a snapshot.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the identifier.
    fn id(&self) -> &Self::Id;
}
