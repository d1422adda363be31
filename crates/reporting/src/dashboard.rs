//! Headline figures and the revenue chart of the dashboard.
//!
//! Counts cover every invoice. Amounts are summed for one currency; invoices
//! in other currencies are left out, as in [`crate::daily_sales`]. "Today" and
//! the revenue month follow the UTC date of `created_at`, not the issued date.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use invoicer_core::{round_money, Currency, DomainResult, Money};
use invoicer_invoicing::{InvoiceDocument, PaymentStatus};

use crate::sales::add_amount;

/// The four tiles at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    /// Invoices not marked paid.
    pub pending_invoices: usize,
    pub paid_invoices: usize,
    /// Invoices created on the current UTC day.
    pub sent_today: usize,
    /// Sum of `total_amount` over every invoice in the currency, paid or not.
    pub payments_collected: Money,
}

impl DashboardMetrics {
    pub fn compute<'a>(
        docs: impl IntoIterator<Item = &'a InvoiceDocument>,
        currency: &Currency,
        today: NaiveDate,
    ) -> DomainResult<Self> {
        let mut pending_invoices = 0;
        let mut paid_invoices = 0;
        let mut sent_today = 0;
        let mut collected = Money::zero(currency.clone());
        let mut skipped = 0usize;

        for doc in docs {
            match doc.payment_status() {
                PaymentStatus::Paid => paid_invoices += 1,
                PaymentStatus::Due => pending_invoices += 1,
            }
            if doc.created_at().date_naive() == today {
                sent_today += 1;
            }
            if doc.currency() == currency {
                collected = collected.checked_add(&doc.total())?;
            } else {
                skipped += 1;
            }
        }

        if skipped > 0 {
            tracing::debug!(%currency, skipped, "invoices in other currencies left out of revenue");
        }

        Ok(Self {
            pending_invoices,
            paid_invoices,
            sent_today,
            payments_collected: collected.rounded(),
        })
    }
}

/// Revenue in `currency` per month of `year`, January first.
///
/// Every invoice counts regardless of payment status; months without
/// invoices stay at zero.
pub fn monthly_revenue<'a>(
    docs: impl IntoIterator<Item = &'a InvoiceDocument>,
    currency: &Currency,
    year: i32,
) -> DomainResult<[Decimal; 12]> {
    let mut months = [Decimal::ZERO; 12];
    for doc in docs {
        let created = doc.created_at();
        if created.year() != year || doc.currency() != currency {
            continue;
        }
        let slot = &mut months[created.month0() as usize];
        *slot = add_amount(*slot, doc.total_amount())?;
    }
    Ok(months.map(round_money))
}
