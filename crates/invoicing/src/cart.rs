//! The in-progress collection of line items.

use serde::Serialize;

use invoicer_core::{Currency, ExpectedVersion};
use invoicer_products::CatalogProduct;

use crate::error::{InvoicingError, InvoicingResult};
use crate::line_item::LineItem;
use crate::pricing;

/// Ordered, mutable list of line items being composed into an invoice.
///
/// Invariants:
/// - every item shares the currency of the first item
/// - the full-precision total is representable
/// - failed operations leave items and version untouched
/// - the version grows by one per successful mutation
///
/// The same product may appear several times; entries are addressed by
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<LineItem>,
    version: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `product` and append it with `quantity`.
    pub fn add(&mut self, product: &CatalogProduct, quantity: i64) -> InvoicingResult<&LineItem> {
        let item = LineItem::from_selection(product, quantity)?;
        self.push(item)
    }

    /// Append an already-built line item.
    pub fn push(&mut self, item: LineItem) -> InvoicingResult<&LineItem> {
        if let Some(expected) = self.currency() {
            if expected != item.currency() {
                tracing::warn!(
                    expected = %expected,
                    found = %item.currency(),
                    product_id = %item.product().product_id,
                    "rejected line item with foreign currency"
                );
                return Err(InvoicingError::CurrencyMismatch {
                    expected: expected.clone(),
                    found: item.currency().clone(),
                });
            }
        }

        if let Err(err) = pricing::unrounded_total(self.items.iter().chain([&item])) {
            tracing::warn!(
                product_id = %item.product().product_id,
                quantity = %item.quantity(),
                error = %err,
                "rejected line item that overflows the cart total"
            );
            return Err(err);
        }

        self.items.push(item);
        self.version += 1;
        let idx = self.items.len() - 1;
        Ok(&self.items[idx])
    }

    /// Remove the entry at `index`, returning it.
    pub fn remove_at(&mut self, index: usize) -> InvoicingResult<LineItem> {
        if index >= self.items.len() {
            return Err(InvoicingError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.version += 1;
        Ok(removed)
    }

    /// Drop every entry. A no-op on an empty cart does not bump the version.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.version += 1;
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency fixed by the first item; `None` while empty.
    pub fn currency(&self) -> Option<&Currency> {
        self.items.first().map(LineItem::currency)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn ensure_version(&self, expected: ExpectedVersion) -> InvoicingResult<()> {
        expected
            .check(self.version)
            .map_err(|e| InvoicingError::VersionConflict(e.to_string()))
    }
}
