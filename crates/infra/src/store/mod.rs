//! Append-only invoice storage boundary.
//!
//! Finalized invoices are handed to an [`InvoiceStore`] as their JSON payload.
//! Stores never modify or delete what they hold.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryInvoiceStore;
pub use r#trait::{InvoiceStore, StoreError, StoredInvoice};
