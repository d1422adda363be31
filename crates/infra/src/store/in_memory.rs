use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use invoicer_invoicing::{InvoiceDocument, InvoiceNumber};

use super::r#trait::{InvoiceStore, StoreError, StoredInvoice};

#[derive(Debug, Default)]
struct Inner {
    log: Vec<StoredInvoice>,
    by_number: HashMap<InvoiceNumber, usize>,
}

/// In-memory append-only invoice store.
///
/// Intended for tests/dev and the CLI. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    inner: RwLock<Inner>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InvoiceStore for InMemoryInvoiceStore {
    fn submit(&self, doc: &InvoiceDocument) -> Result<StoredInvoice, StoreError> {
        let payload = serde_json::to_value(doc.to_payload())
            .map_err(|e| StoreError::Serialization(format!("payload serialization failed: {e}")))?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        if inner.by_number.contains_key(doc.number()) {
            tracing::warn!(invoice = %doc.number(), "duplicate invoice submission rejected");
            return Err(StoreError::Duplicate(doc.number().clone()));
        }

        let stored = StoredInvoice {
            invoice_no: doc.number().clone(),
            sequence_number: inner.log.len() as u64 + 1,
            submitted_at: Utc::now(),
            payload,
        };
        let position = inner.log.len();
        inner.by_number.insert(stored.invoice_no.clone(), position);
        inner.log.push(stored.clone());

        tracing::info!(
            invoice = %stored.invoice_no,
            sequence = stored.sequence_number,
            "invoice stored"
        );
        Ok(stored)
    }

    fn get(&self, number: &InvoiceNumber) -> Result<Option<StoredInvoice>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(inner
            .by_number
            .get(number)
            .and_then(|&i| inner.log.get(i))
            .cloned())
    }

    fn list(&self) -> Result<Vec<StoredInvoice>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(inner.log.clone())
    }
}
