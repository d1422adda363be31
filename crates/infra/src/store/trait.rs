use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use invoicer_invoicing::{InvoiceDocument, InvoiceNumber, InvoicePayload};

/// An invoice as persisted by a store.
///
/// The payload is the document's storage shape, kept as raw JSON so stores do
/// not depend on the document type evolving in lockstep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredInvoice {
    pub invoice_no: InvoiceNumber,

    /// Position in submission order, starting at 1.
    pub sequence_number: u64,

    pub submitted_at: DateTime<Utc>,

    pub payload: JsonValue,
}

impl StoredInvoice {
    /// Decode the payload back into its typed form.
    pub fn decode(&self) -> Result<InvoicePayload, StoreError> {
        serde_json::from_value(self.payload.clone()).map_err(|e| {
            StoreError::Serialization(format!("payload of {} is malformed: {e}", self.invoice_no))
        })
    }
}

/// Invoice store operation error.
///
/// Infrastructure failures only; validation happens before a document exists.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invoice {0} already stored")]
    Duplicate(InvoiceNumber),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only store of finalized invoices.
///
/// Implementations must:
/// - reject a second submission with an already stored invoice number
/// - assign monotonically increasing `sequence_number`s with no gaps
/// - return invoices from `list` in submission order
pub trait InvoiceStore: Send + Sync {
    fn submit(&self, doc: &InvoiceDocument) -> Result<StoredInvoice, StoreError>;

    fn get(&self, number: &InvoiceNumber) -> Result<Option<StoredInvoice>, StoreError>;

    fn list(&self) -> Result<Vec<StoredInvoice>, StoreError>;
}

impl<S> InvoiceStore for Arc<S>
where
    S: InvoiceStore + ?Sized,
{
    fn submit(&self, doc: &InvoiceDocument) -> Result<StoredInvoice, StoreError> {
        (**self).submit(doc)
    }

    fn get(&self, number: &InvoiceNumber) -> Result<Option<StoredInvoice>, StoreError> {
        (**self).get(number)
    }

    fn list(&self) -> Result<Vec<StoredInvoice>, StoreError> {
        (**self).list()
    }
}
