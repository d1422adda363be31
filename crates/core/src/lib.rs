//! `invoicer-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! errors, identifiers, money and the marker traits shared by the domain crates.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;
pub mod version;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, ProductId};
pub use money::{round_money, Currency, Money, MONEY_SCALE};
pub use value_object::ValueObject;
pub use version::ExpectedVersion;
