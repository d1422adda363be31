//! Value object trait: equality by value, not identity.
//!
//! Line items, money and the customer/issuer/product snapshots embedded in an
//! invoice are value objects: they are copied, never shared, and two of them
//! with the same fields are the same thing.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. The invoice engine relies on this when it snapshots catalog
/// and customer records: a snapshot taken at composition time stays equal to
/// itself no matter what later happens to the source record.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Money {
///     amount: Decimal,
///     currency: Currency,
/// }
///
/// impl ValueObject for Money {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
