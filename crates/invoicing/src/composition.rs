//! Invoice composition session.
//!
//! Holds everything a user picks while building one invoice: number, dates,
//! customer, cart and payment details. Lookups go through the catalog and
//! customer directory so the session only ever holds snapshots.

use chrono::{DateTime, NaiveDate, Utc};

use invoicer_core::{CustomerId, ExpectedVersion, Money, ProductId};
use invoicer_parties::{Customer, CustomerDirectory, IssuerProfile};
use invoicer_products::Catalog;

use crate::assembler::{AssembleInvoice, InvoiceAssembler};
use crate::cart::Cart;
use crate::document::{InvoiceDocument, PaymentMethod, PaymentStatus};
use crate::error::{InvoicingError, InvoicingResult};
use crate::line_item::LineItem;
use crate::number::InvoiceNumber;
use crate::pricing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    number: InvoiceNumber,
    issued_date: NaiveDate,
    due_date: NaiveDate,
    customer: Option<Customer>,
    cart: Cart,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
    generated_by: String,
}

impl Composition {
    /// Start composing invoice `number`; both dates default to `today`.
    pub fn begin(number: InvoiceNumber, today: NaiveDate) -> Self {
        tracing::debug!(invoice = %number, "composition started");
        Self {
            number,
            issued_date: today,
            due_date: today,
            customer: None,
            cart: Cart::new(),
            payment_method: PaymentMethod::default(),
            payment_status: PaymentStatus::default(),
            generated_by: String::new(),
        }
    }

    pub fn number(&self) -> &InvoiceNumber {
        &self.number
    }

    pub fn issued_date(&self) -> NaiveDate {
        self.issued_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn payment_method(&self) -> &PaymentMethod {
        &self.payment_method
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn generated_by(&self) -> &str {
        &self.generated_by
    }

    /// Pick the customer to bill; replaces any earlier choice.
    pub fn select_customer(
        &mut self,
        directory: &CustomerDirectory,
        id: &CustomerId,
    ) -> InvoicingResult<&Customer> {
        let found = directory
            .find(id)
            .ok_or_else(|| InvoicingError::UnknownCustomer(id.clone()))?;
        Ok(&*self.customer.insert(found.clone()))
    }

    /// Look `id` up in the catalog and append it to the cart.
    pub fn add_product(
        &mut self,
        catalog: &Catalog,
        id: &ProductId,
        quantity: i64,
    ) -> InvoicingResult<&LineItem> {
        let product = catalog
            .find(id)
            .ok_or_else(|| InvoicingError::UnknownProduct(id.clone()))?;
        self.cart.add(product, quantity)
    }

    pub fn remove_at(&mut self, index: usize) -> InvoicingResult<LineItem> {
        self.cart.remove_at(index)
    }

    /// Remove the entry at `index` as it was displayed at cart version `seen`.
    ///
    /// Positions shift after every edit, so a removal issued against an older
    /// rendering of the cart fails with `VersionConflict` instead of dropping
    /// the wrong line.
    pub fn remove_at_version(
        &mut self,
        index: usize,
        seen: ExpectedVersion,
    ) -> InvoicingResult<LineItem> {
        self.cart.ensure_version(seen)?;
        self.cart.remove_at(index)
    }

    pub fn set_dates(&mut self, issued: NaiveDate, due: NaiveDate) {
        self.issued_date = issued;
        self.due_date = due;
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
    }

    pub fn set_generated_by(&mut self, author: impl Into<String>) {
        self.generated_by = author.into();
    }

    /// Running total shown while composing; `None` until an item is added.
    pub fn preview_total(&self) -> InvoicingResult<Option<Money>> {
        pricing::priced_total(&self.cart)
    }

    /// Start over for the next invoice once the previous one was submitted.
    ///
    /// Payment method and author carry over; everything else returns to the
    /// values [`Composition::begin`] sets. The cart keeps counting versions.
    pub fn reset(&mut self, number: InvoiceNumber, today: NaiveDate) {
        tracing::debug!(previous = %self.number, next = %number, "composition reset");
        self.number = number;
        self.issued_date = today;
        self.due_date = today;
        self.customer = None;
        self.cart.clear();
        self.payment_status = PaymentStatus::default();
    }

    /// Produce the immutable document. The session itself is left as-is, so a
    /// rejected finalize can be fixed and retried.
    pub fn finalize(
        &self,
        issuer: &IssuerProfile,
        assembler: &InvoiceAssembler,
        created_at: DateTime<Utc>,
    ) -> InvoicingResult<InvoiceDocument> {
        assembler.assemble(AssembleInvoice {
            number: self.number.clone(),
            issued_date: self.issued_date,
            due_date: self.due_date,
            issuer,
            customer: self.customer.as_ref(),
            cart: &self.cart,
            payment_method: self.payment_method.clone(),
            payment_status: self.payment_status,
            generated_by: self.generated_by.clone(),
            created_at,
        })
    }
}
