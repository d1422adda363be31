//! The `compose` command: request in, finalized invoice out.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use invoicer_infra::{InvoiceStore, InvoicingConfig, StoredInvoice};
use invoicer_invoicing::{Composition, InvoiceAssembler, InvoiceDocument, TimestampNumberGenerator};
use invoicer_parties::{CustomerDirectory, IssuerProfile};
use invoicer_products::Catalog;

use crate::request::ComposeRequest;

/// Reference data an invoice is composed against.
#[derive(Debug, Clone)]
pub struct ComposeInputs {
    pub catalog: Catalog,
    pub customers: CustomerDirectory,
    pub issuer: IssuerProfile,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Drive a composition session from `request` and finalize it.
///
/// `now` supplies the invoice number (when the request has none), the default
/// dates and the creation timestamp.
pub fn compose(
    inputs: &ComposeInputs,
    request: &ComposeRequest,
    config: &InvoicingConfig,
    now: DateTime<Utc>,
) -> Result<InvoiceDocument> {
    let number = match &request.invoice_number {
        Some(n) => n.clone(),
        None => TimestampNumberGenerator::new().generate_at(now),
    };
    let today = now.date_naive();
    let mut session = Composition::begin(number, today);

    session.set_payment_method(
        request
            .payment_method
            .clone()
            .unwrap_or_else(|| config.default_payment_method.clone()),
    );
    if let Some(status) = request.payment_status {
        session.set_payment_status(status);
    }
    if let Some(author) = request.generated_by.as_ref().or(config.generated_by.as_ref()) {
        session.set_generated_by(author.as_str());
    }

    let issued = request.issued_date.unwrap_or(today);
    session.set_dates(issued, request.due_date.unwrap_or(issued));

    session
        .select_customer(&inputs.customers, &request.customer_id)
        .context("selecting customer")?;
    for (i, item) in request.items.iter().enumerate() {
        item.quantity()
            .and_then(|q| {
                session.add_product(&inputs.catalog, &item.product_id, i64::from(q.get()))
            })
            .with_context(|| format!("adding item {i} ({})", item.product_id))?;
    }

    let assembler = InvoiceAssembler::new(config.policy());
    let doc = session
        .finalize(&inputs.issuer, &assembler, now)
        .with_context(|| format!("finalizing invoice {}", session.number()))?;

    tracing::info!(
        invoice = %doc.number(),
        total = %doc.total(),
        lines = doc.lines().len(),
        "invoice composed"
    );
    Ok(doc)
}

/// Compose and hand the result to `store`.
pub fn compose_and_submit(
    inputs: &ComposeInputs,
    request: &ComposeRequest,
    config: &InvoicingConfig,
    store: &dyn InvoiceStore,
    now: DateTime<Utc>,
) -> Result<StoredInvoice> {
    let doc = compose(inputs, request, config, now)?;
    store
        .submit(&doc)
        .with_context(|| format!("submitting invoice {}", doc.number()))
}
