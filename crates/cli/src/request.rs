//! Compose request read by the `compose` command.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Number;

use invoicer_core::{CustomerId, ProductId};
use invoicer_invoicing::{InvoiceNumber, InvoicingResult, PaymentMethod, PaymentStatus, Quantity};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComposeRequest {
    pub customer_id: CustomerId,
    pub items: Vec<RequestItem>,
    /// Generated when absent.
    #[serde(default)]
    pub invoice_number: Option<InvoiceNumber>,
    #[serde(default)]
    pub issued_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub generated_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestItem {
    pub product_id: ProductId,
    /// Any JSON number; [`RequestItem::quantity`] decides whether it counts.
    pub quantity: Number,
}

impl RequestItem {
    /// The requested quantity. `2.5`, `0` and negatives are `InvalidQuantity`.
    pub fn quantity(&self) -> InvoicingResult<Quantity> {
        self.quantity.to_string().parse()
    }
}
