//! Product catalog module.
//!
//! The catalog is owned by an external collaborator; this crate only models the
//! records it hands over and validates them (no IO, no HTTP, no storage).

pub mod catalog;
pub mod product;

pub use catalog::Catalog;
pub use product::{CatalogProduct, NewCatalogProduct};
