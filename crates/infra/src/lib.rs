//! Infrastructure layer: invoice storage and configuration.

pub mod config;
pub mod store;

pub use config::{ConfigError, InvoicingConfig};
pub use store::{InMemoryInvoiceStore, InvoiceStore, StoreError, StoredInvoice};
