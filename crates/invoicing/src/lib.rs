//! Invoicing domain module.
//!
//! Turns a cart of priced line items into a finalized, immutable invoice
//! document. Implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage); the clock and random source only enter through
//! [`number::TimestampNumberGenerator`] and the `created_at` a caller supplies.

pub mod assembler;
pub mod cart;
pub mod composition;
pub mod document;
pub mod error;
pub mod line_item;
pub mod number;
pub mod pricing;

pub use assembler::{AssembleInvoice, AssemblyPolicy, InvoiceAssembler};
pub use cart::Cart;
pub use composition::Composition;
pub use document::{
    InvoiceDocument, InvoicePayload, PayloadProduct, PaymentMethod, PaymentStatus, PricedLine,
};
pub use error::{InvoicingError, InvoicingResult};
pub use line_item::{LineItem, ProductSnapshot, Quantity};
pub use number::{InvoiceNumber, InvoiceNumberGenerator, TimestampNumberGenerator};
