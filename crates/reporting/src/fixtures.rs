use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use invoicer_invoicing::{
    AssembleInvoice, Cart, InvoiceAssembler, InvoiceDocument, PaymentMethod, PaymentStatus,
};
use invoicer_parties::{Customer, IssuerProfile, NewCustomer};
use invoicer_products::{CatalogProduct, NewCatalogProduct};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn customer(first: &str, last: &str, email: &str) -> Customer {
    Customer::try_from(NewCustomer {
        id: format!("c-{first}"),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        ..NewCustomer::default()
    })
    .unwrap()
}

/// One-line invoice for `amount` in `currency`, issued on `issued`.
pub fn invoice(
    number: &str,
    amount: Decimal,
    currency: &str,
    issued: NaiveDate,
    status: PaymentStatus,
    customer: &Customer,
) -> InvoiceDocument {
    let product = CatalogProduct::try_from(NewCatalogProduct {
        id: format!("p-{number}"),
        name: "Service".to_string(),
        price: amount,
        discount: Decimal::ZERO,
        currency: currency.to_string(),
        category: None,
        image_url: None,
    })
    .unwrap();
    let mut cart = Cart::new();
    cart.add(&product, 1).unwrap();

    InvoiceAssembler::default()
        .assemble(AssembleInvoice {
            number: number.parse().unwrap(),
            issued_date: issued,
            due_date: issued + chrono::Days::new(14),
            issuer: &IssuerProfile::default(),
            customer: Some(customer),
            cart: &cart,
            payment_method: PaymentMethod::UpiTransfer,
            payment_status: status,
            generated_by: String::new(),
            created_at: Utc
                .from_utc_datetime(&issued.and_hms_opt(10, 0, 0).unwrap()),
        })
        .unwrap()
}
