//! Row model for the invoice list.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use invoicer_core::{round_money, Currency};
use invoicer_invoicing::{InvoiceDocument, InvoiceNumber, PaymentStatus};

/// Human label shown next to each invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusLabel {
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Payment Due")]
    PaymentDue,
}

impl StatusLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Completed => "Completed",
            StatusLabel::PaymentDue => "Payment Due",
        }
    }
}

impl From<PaymentStatus> for StatusLabel {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Paid => StatusLabel::Completed,
            PaymentStatus::Due => StatusLabel::PaymentDue,
        }
    }
}

impl core::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the invoice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSummary {
    pub invoice_no: InvoiceNumber,
    pub customer_name: String,
    /// `"N/A"` when the customer has no email on file.
    pub email: String,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub total_amount: Decimal,
    pub currency: Currency,
    pub status: StatusLabel,
}

impl InvoiceSummary {
    pub fn from_document(doc: &InvoiceDocument) -> Self {
        let customer = doc.customer();
        let email = match customer.email() {
            "" => "N/A".to_string(),
            email => email.to_string(),
        };
        Self {
            invoice_no: doc.number().clone(),
            customer_name: customer.display_name(),
            email,
            issued_date: doc.issued_date(),
            due_date: doc.due_date(),
            created_at: doc.created_at(),
            total_amount: round_money(doc.total_amount()),
            currency: doc.currency().clone(),
            status: doc.payment_status().into(),
        }
    }

    /// Summaries ordered newest issued first, ties broken by invoice number.
    pub fn list<'a>(docs: impl IntoIterator<Item = &'a InvoiceDocument>) -> Vec<Self> {
        let mut rows: Vec<Self> = docs.into_iter().map(Self::from_document).collect();
        rows.sort_by(|a, b| {
            b.issued_date
                .cmp(&a.issued_date)
                .then_with(|| a.invoice_no.as_str().cmp(b.invoice_no.as_str()))
        });
        rows
    }
}
