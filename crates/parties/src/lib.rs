//! Parties module: the customers an invoice is addressed to and the issuing
//! business profile printed on it.
//!
//! Both are owned by external collaborators; the invoice engine copies them by
//! value, so nothing here is mutable after validation.

pub mod customer;
pub mod issuer;

pub use customer::{Customer, CustomerDirectory, NewCustomer};
pub use issuer::{IssuerProfile, DEFAULT_ISSUER_NAME};
