//! Finalization of a cart into an [`InvoiceDocument`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use invoicer_core::{Currency, Entity};
use invoicer_parties::{Customer, IssuerProfile};

use crate::cart::Cart;
use crate::document::{InvoiceDocument, PaymentMethod, PaymentStatus, PricedLine};
use crate::error::{InvoicingError, InvoicingResult};
use crate::number::InvoiceNumber;
use crate::pricing;

/// Optional checks applied on top of the mandatory preconditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyPolicy {
    /// Reject invoices whose due date precedes the issued date.
    pub enforce_date_order: bool,
}

/// Command: assemble an invoice document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleInvoice<'a> {
    pub number: InvoiceNumber,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub issuer: &'a IssuerProfile,
    pub customer: Option<&'a Customer>,
    pub cart: &'a Cart,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub generated_by: String,
    pub created_at: DateTime<Utc>,
}

/// Turns a cart plus metadata into an immutable document.
///
/// Pure: no IO, no clock reads. Preconditions are checked before anything is
/// copied, so a rejected command produces nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceAssembler {
    policy: AssemblyPolicy,
}

impl InvoiceAssembler {
    pub fn new(policy: AssemblyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AssemblyPolicy {
        self.policy
    }

    pub fn assemble(&self, cmd: AssembleInvoice<'_>) -> InvoicingResult<InvoiceDocument> {
        let (customer, currency, lines, total_amount) = match self.check(&cmd) {
            Ok(checked) => checked,
            Err(err) => {
                tracing::warn!(invoice = %cmd.number, error = %err, "invoice rejected");
                return Err(err);
            }
        };

        tracing::debug!(
            invoice = %cmd.number,
            customer_id = %customer.id(),
            lines = lines.len(),
            total = %total_amount,
            currency = %currency,
            "invoice assembled"
        );

        Ok(InvoiceDocument {
            number: cmd.number,
            issued_date: cmd.issued_date,
            due_date: cmd.due_date,
            customer: customer.clone(),
            issuer: cmd.issuer.clone(),
            lines,
            payment_method: cmd.payment_method,
            payment_status: cmd.payment_status,
            generated_by: cmd.generated_by.trim().to_string(),
            total_amount,
            currency: currency.clone(),
            created_at: cmd.created_at,
        })
    }

    /// Preconditions, then prices. Nothing is copied until both succeed.
    fn check<'c>(
        &self,
        cmd: &AssembleInvoice<'c>,
    ) -> InvoicingResult<(&'c Customer, &'c Currency, Vec<PricedLine>, Decimal)> {
        let cart: &'c Cart = cmd.cart;
        let currency = cart.currency().ok_or(InvoicingError::EmptyInvoice)?;
        let customer = cmd.customer.ok_or(InvoicingError::MissingCustomer)?;
        if self.policy.enforce_date_order && cmd.due_date < cmd.issued_date {
            return Err(InvoicingError::DueBeforeIssued {
                issued: cmd.issued_date,
                due: cmd.due_date,
            });
        }
        let lines = cart
            .items()
            .iter()
            .map(PricedLine::try_from)
            .collect::<InvoicingResult<Vec<_>>>()?;
        let total_amount = pricing::total(cart)?;
        Ok((customer, currency, lines, total_amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use invoicer_parties::NewCustomer;
    use invoicer_products::{CatalogProduct, NewCatalogProduct};
    use rust_decimal_macros::dec;

    fn product(id: &str, price: Decimal, discount: Decimal) -> CatalogProduct {
        CatalogProduct::try_from(NewCatalogProduct {
            id: id.to_string(),
            name: format!("Product {id}"),
            price,
            discount,
            currency: "USD".to_string(),
            category: None,
            image_url: None,
        })
        .unwrap()
    }

    fn customer_x() -> Customer {
        Customer::try_from(NewCustomer {
            id: "cust-x".to_string(),
            first_name: "Xavier".to_string(),
            last_name: "Doe".to_string(),
            email: "x@example.com".to_string(),
            ..NewCustomer::default()
        })
        .unwrap()
    }

    fn issuer() -> IssuerProfile {
        IssuerProfile {
            name: "Acme Ltd".to_string(),
            logo_url: Some("https://cdn.example.com/acme.png".to_string()),
            ..IssuerProfile::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap()
    }

    fn command<'a>(
        cart: &'a Cart,
        customer: Option<&'a Customer>,
        issuer: &'a IssuerProfile,
    ) -> AssembleInvoice<'a> {
        AssembleInvoice {
            number: "123456".parse().unwrap(),
            issued_date: date(2026, 5, 1),
            due_date: date(2026, 5, 31),
            issuer,
            customer,
            cart,
            payment_method: PaymentMethod::UpiTransfer,
            payment_status: PaymentStatus::Due,
            generated_by: " Jane ".to_string(),
            created_at: test_time(),
        }
    }

    #[test]
    fn assembles_document_with_total_and_currency() {
        let mut cart = Cart::new();
        cart.add(&product("p1", dec!(100), dec!(10)), 3).unwrap();
        let customer = customer_x();
        let issuer = issuer();

        let doc = InvoiceAssembler::default()
            .assemble(command(&cart, Some(&customer), &issuer))
            .unwrap();

        assert_eq!(doc.number().as_str(), "123456");
        assert_eq!(doc.total_amount(), dec!(270.00));
        assert_eq!(doc.currency().code(), "USD");
        assert_eq!(doc.payment_status(), PaymentStatus::Due);
        assert_eq!(doc.customer(), &customer);
        assert_eq!(doc.generated_by(), "Jane");
        assert_eq!(doc.created_at(), test_time());
        assert_eq!(doc.lines().len(), 1);
        assert_eq!(doc.lines()[0].final_unit_price, dec!(90));
        assert_eq!(doc.lines()[0].line_total, dec!(270));
    }

    #[test]
    fn line_order_is_preserved() {
        let mut cart = Cart::new();
        for id in ["c", "a", "b", "a"] {
            cart.add(&product(id, dec!(1), dec!(0)), 1).unwrap();
        }
        let customer = customer_x();
        let issuer = issuer();
        let doc = InvoiceAssembler::default()
            .assemble(command(&cart, Some(&customer), &issuer))
            .unwrap();

        let ids: Vec<&str> = doc
            .lines()
            .iter()
            .map(|l| l.product.product_id.as_str())
            .collect();
        assert_eq!(ids, ["c", "a", "b", "a"]);
    }

    #[test]
    fn empty_cart_is_rejected_before_customer_check() {
        let cart = Cart::new();
        let issuer = issuer();
        let err = InvoiceAssembler::default()
            .assemble(command(&cart, None, &issuer))
            .unwrap_err();
        assert_eq!(err, InvoicingError::EmptyInvoice);
    }

    #[test]
    fn missing_customer_is_rejected() {
        let mut cart = Cart::new();
        cart.add(&product("p1", dec!(5), dec!(0)), 1).unwrap();
        let issuer = issuer();
        let err = InvoiceAssembler::default()
            .assemble(command(&cart, None, &issuer))
            .unwrap_err();
        assert_eq!(err, InvoicingError::MissingCustomer);
    }

    #[test]
    fn date_order_is_only_checked_when_enforced() {
        let mut cart = Cart::new();
        cart.add(&product("p1", dec!(5), dec!(0)), 1).unwrap();
        let customer = customer_x();
        let issuer = issuer();

        let mut cmd = command(&cart, Some(&customer), &issuer);
        cmd.due_date = date(2026, 4, 1);

        assert!(InvoiceAssembler::default().assemble(cmd.clone()).is_ok());

        let strict = InvoiceAssembler::new(AssemblyPolicy {
            enforce_date_order: true,
        });
        match strict.assemble(cmd) {
            Err(InvoicingError::DueBeforeIssued { issued, due }) => {
                assert_eq!(issued, date(2026, 5, 1));
                assert_eq!(due, date(2026, 4, 1));
            }
            other => panic!("expected DueBeforeIssued, got {other:?}"),
        }
    }

    #[test]
    fn document_is_detached_from_cart_edits() {
        let mut cart = Cart::new();
        cart.add(&product("p1", dec!(10), dec!(0)), 2).unwrap();
        let customer = customer_x();
        let issuer = issuer();
        let doc = InvoiceAssembler::default()
            .assemble(command(&cart, Some(&customer), &issuer))
            .unwrap();

        cart.add(&product("p2", dec!(99), dec!(0)), 1).unwrap();
        cart.remove_at(0).unwrap();

        assert_eq!(doc.lines().len(), 1);
        assert_eq!(doc.lines()[0].product.product_id.as_str(), "p1");
        assert_eq!(doc.total_amount(), dec!(20.00));
    }

    #[test]
    fn payload_uses_storage_field_names() {
        let mut cart = Cart::new();
        cart.add(&product("p1", dec!(100), dec!(10)), 3).unwrap();
        cart.add(&product("p2", dec!(49.99), dec!(0)), 1).unwrap();
        let customer = customer_x();
        let issuer = issuer();
        let doc = InvoiceAssembler::default()
            .assemble(command(&cart, Some(&customer), &issuer))
            .unwrap();

        let json = serde_json::to_value(doc.to_payload()).unwrap();
        assert_eq!(json["invoice_id"], "123456");
        assert_eq!(json["invoice_no"], "123456");
        assert_eq!(json["issued_date"], "2026-05-01");
        assert_eq!(json["due_date"], "2026-05-31");
        assert_eq!(json["customer_id"], "cust-x");
        assert_eq!(json["customer"]["first_name"], "Xavier");
        assert_eq!(json["issuer_name"], "Acme Ltd");
        assert_eq!(json["logo_url"], "https://cdn.example.com/acme.png");
        assert_eq!(json["payment_method"], "UPI Transfer");
        assert_eq!(json["payment_status"], "Due");
        assert_eq!(json["invoice_generated_by"], "Jane");
        assert_eq!(json["total_amount"], 319.99);
        assert_eq!(json["currency"], "USD");

        let first = &json["products"][0];
        assert_eq!(first["product_id"], "p1");
        assert_eq!(first["price"], 100.0);
        assert_eq!(first["quantity"], 3);
        assert_eq!(first["discount"], 10.0);
        assert_eq!(first["final_price"], 90.0);
        assert_eq!(first["total_price"], 270.0);
        assert_eq!(json["products"][1]["total_price"], 49.99);
    }
}
