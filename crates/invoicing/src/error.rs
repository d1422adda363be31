//! Invoicing error taxonomy.

use chrono::NaiveDate;
use thiserror::Error;

use invoicer_core::{Currency, CustomerId, DomainError, ProductId};

pub type InvoicingResult<T> = Result<T, InvoicingError>;

/// Local validation failures raised while composing or finalizing an invoice.
///
/// Every variant is deterministic: retrying the same call fails the same way.
/// The operation that returned it performed no mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvoicingError {
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("currency mismatch: cart is in {expected}, item is in {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    #[error("line index {index} out of range (cart has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot finalize an invoice without line items")]
    EmptyInvoice,

    #[error("cannot finalize an invoice without a customer")]
    MissingCustomer,

    #[error("due date {due} is before issued date {issued}")]
    DueBeforeIssued { issued: NaiveDate, due: NaiveDate },

    #[error("unknown product '{0}'")]
    UnknownProduct(ProductId),

    #[error("unknown customer '{0}'")]
    UnknownCustomer(CustomerId),

    #[error("cart was modified concurrently: {0}")]
    VersionConflict(String),

    #[error("invalid invoice number: {0}")]
    InvalidNumber(String),

    #[error("amount overflow: {0}")]
    AmountOverflow(String),
}

impl From<InvoicingError> for DomainError {
    fn from(err: InvoicingError) -> Self {
        let msg = err.to_string();
        match err {
            InvoicingError::InvalidQuantity(_) | InvoicingError::DueBeforeIssued { .. } => {
                DomainError::Validation(msg)
            }
            InvoicingError::CurrencyMismatch { .. }
            | InvoicingError::IndexOutOfRange { .. }
            | InvoicingError::EmptyInvoice
            | InvoicingError::MissingCustomer
            | InvoicingError::AmountOverflow(_) => DomainError::InvariantViolation(msg),
            InvoicingError::UnknownProduct(_) | InvoicingError::UnknownCustomer(_) => {
                DomainError::NotFound(msg)
            }
            InvoicingError::VersionConflict(_) => DomainError::Conflict(msg),
            InvoicingError::InvalidNumber(_) => DomainError::InvalidId(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_onto_domain_categories() {
        assert!(matches!(
            DomainError::from(InvoicingError::EmptyInvoice),
            DomainError::InvariantViolation(_)
        ));
        assert!(matches!(
            DomainError::from(InvoicingError::InvalidQuantity("0".into())),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            DomainError::from(InvoicingError::AmountOverflow("line total".into())),
            DomainError::InvariantViolation(msg) if msg.contains("overflow")
        ));
        let err = DomainError::from(InvoicingError::UnknownProduct(ProductId::new("p9").unwrap()));
        assert_eq!(err, DomainError::NotFound("unknown product 'p9'".into()));
    }
}
