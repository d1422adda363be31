//! The finalized, immutable invoice and its storage payload.

use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use invoicer_core::{round_money, Currency, CustomerId, DomainError, Entity, Money, ProductId};
use invoicer_parties::{Customer, IssuerProfile};

use crate::error::{InvoicingError, InvoicingResult};
use crate::line_item::{LineItem, ProductSnapshot};
use crate::number::InvoiceNumber;

/// How the customer is expected to pay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentMethod {
    #[default]
    UpiTransfer,
    CreditCard,
    DebitCard,
    /// Any other non-empty label.
    Other(String),
}

impl PaymentMethod {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::UpiTransfer => "UPI Transfer",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Other(label) => label,
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "" => return Err(DomainError::validation("payment method cannot be empty")),
            "UPI Transfer" => PaymentMethod::UpiTransfer,
            "Credit Card" => PaymentMethod::CreditCard,
            "Debit Card" => PaymentMethod::DebitCard,
            other => PaymentMethod::Other(other.to_string()),
        })
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the invoice has been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Due,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Due => "Due",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Due" => Ok(PaymentStatus::Due),
            "Paid" => Ok(PaymentStatus::Paid),
            other => Err(DomainError::validation(format!(
                "payment status must be Due or Paid, got '{other}'"
            ))),
        }
    }
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line of a finalized invoice: the snapshot plus its computed prices.
///
/// Prices are kept at full precision; round with [`round_money`] to present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub final_unit_price: Decimal,
    pub line_total: Decimal,
}

impl TryFrom<&LineItem> for PricedLine {
    type Error = InvoicingError;

    fn try_from(item: &LineItem) -> InvoicingResult<Self> {
        Ok(Self {
            product: item.product().clone(),
            quantity: item.quantity().get(),
            final_unit_price: item.final_unit_price(),
            line_total: item.line_total()?,
        })
    }
}

/// Finalized invoice. Built only by [`crate::InvoiceAssembler`]; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceDocument {
    pub(crate) number: InvoiceNumber,
    pub(crate) issued_date: NaiveDate,
    pub(crate) due_date: NaiveDate,
    pub(crate) customer: Customer,
    pub(crate) issuer: IssuerProfile,
    pub(crate) lines: Vec<PricedLine>,
    pub(crate) payment_method: PaymentMethod,
    pub(crate) payment_status: PaymentStatus,
    pub(crate) generated_by: String,
    pub(crate) total_amount: Decimal,
    pub(crate) currency: Currency,
    pub(crate) created_at: DateTime<Utc>,
}

impl InvoiceDocument {
    pub fn number(&self) -> &InvoiceNumber {
        &self.number
    }

    pub fn issued_date(&self) -> NaiveDate {
        self.issued_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn issuer(&self) -> &IssuerProfile {
        &self.issuer
    }

    pub fn lines(&self) -> &[PricedLine] {
        &self.lines
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

    /// Rounded to two places.
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn total(&self) -> Money {
        Money::new(self.total_amount, self.currency.clone())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Shape accepted by the storage collaborator.
    pub fn to_payload(&self) -> InvoicePayload {
        InvoicePayload {
            invoice_id: self.number.clone(),
            invoice_no: self.number.clone(),
            issued_date: self.issued_date,
            due_date: self.due_date,
            customer_id: self.customer.id().clone(),
            customer: self.customer.clone(),
            issuer: self.issuer.clone(),
            issuer_name: self.issuer.display_name().to_string(),
            logo_url: self.issuer.logo_url().map(str::to_string),
            products: self.lines.iter().map(PayloadProduct::from).collect(),
            payment_method: self.payment_method.clone(),
            payment_status: self.payment_status,
            invoice_generated_by: self.generated_by.clone(),
            total_amount: self.total_amount,
            currency: self.currency.clone(),
            created_at: self.created_at,
        }
    }
}

/// One entry of the payload's `products` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadProduct {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub discount: Decimal,
    pub currency: Currency,
    pub final_price: Decimal,
    pub total_price: Decimal,
}

impl From<&PricedLine> for PayloadProduct {
    fn from(line: &PricedLine) -> Self {
        Self {
            product_id: line.product.product_id.clone(),
            name: line.product.name.clone(),
            price: line.product.unit_price,
            quantity: line.quantity,
            discount: line.product.discount,
            currency: line.product.currency.clone(),
            final_price: round_money(line.final_unit_price),
            total_price: round_money(line.line_total),
        }
    }
}

/// Storage/submission payload of an [`InvoiceDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePayload {
    pub invoice_id: InvoiceNumber,
    pub invoice_no: InvoiceNumber,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub customer_id: CustomerId,
    pub customer: Customer,
    pub issuer: IssuerProfile,
    /// Header name: the configured name or the default placeholder.
    pub issuer_name: String,
    pub logo_url: Option<String>,
    pub products: Vec<PayloadProduct>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub invoice_generated_by: String,
    pub total_amount: Decimal,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}
