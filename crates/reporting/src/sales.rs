//! Dashboard aggregates keyed by issued date.
//!
//! Windows are inclusive of `today` and span `days` calendar days, so
//! `days = 7` covers today plus the six days before it. Every day in the
//! window is present in the result, with zero values when nothing was issued.
//! Invoices issued outside the window are not dropped; they add rows of their
//! own, so callers can trim to the window when they need a fixed-size chart.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use invoicer_core::{round_money, Currency, DomainError, DomainResult};
use invoicer_invoicing::{InvoiceDocument, PaymentStatus};

/// Sales issued on a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub total: Decimal,
    pub paid: Decimal,
    pub pending: Decimal,
}

impl DailySales {
    fn record(&mut self, amount: Decimal, status: PaymentStatus) -> DomainResult<()> {
        let bucket = match status {
            PaymentStatus::Paid => &mut self.paid,
            PaymentStatus::Due => &mut self.pending,
        };
        *bucket = add_amount(*bucket, amount)?;
        self.total = add_amount(self.total, amount)?;
        Ok(())
    }

    fn rounded(self) -> Self {
        Self {
            total: round_money(self.total),
            paid: round_money(self.paid),
            pending: round_money(self.pending),
        }
    }
}

pub(crate) fn add_amount(acc: Decimal, amount: Decimal) -> DomainResult<Decimal> {
    acc.checked_add(amount)
        .ok_or_else(|| DomainError::invariant(format!("sales overflow adding {amount} to {acc}")))
}

/// First day of the window, or `None` for an empty window.
fn window_start(today: NaiveDate, days: u32) -> Option<NaiveDate> {
    let back = days.checked_sub(1)?;
    today.checked_sub_days(Days::new(u64::from(back)))
}

fn seeded<T: Default>(today: NaiveDate, days: u32) -> BTreeMap<NaiveDate, T> {
    let Some(start) = window_start(today, days) else {
        return BTreeMap::new();
    };
    start
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|d| (d, T::default()))
        .collect()
}

/// Per-day sales in `currency` over the window ending on `today`.
///
/// Invoices in other currencies are skipped rather than converted. A day whose
/// sum is not representable fails the whole report.
pub fn daily_sales<'a>(
    docs: impl IntoIterator<Item = &'a InvoiceDocument>,
    currency: &Currency,
    today: NaiveDate,
    days: u32,
) -> DomainResult<BTreeMap<NaiveDate, DailySales>> {
    let mut by_day: BTreeMap<NaiveDate, DailySales> = seeded(today, days);
    let mut skipped = 0usize;

    for doc in docs {
        if doc.currency() != currency {
            skipped += 1;
            continue;
        }
        by_day
            .entry(doc.issued_date())
            .or_default()
            .record(doc.total_amount(), doc.payment_status())?;
    }

    if skipped > 0 {
        tracing::debug!(%currency, skipped, "invoices in other currencies left out of sales");
    }

    Ok(by_day.into_iter().map(|(d, s)| (d, s.rounded())).collect())
}

/// Number of invoices issued per day over the window ending on `today`.
pub fn daily_invoice_counts<'a>(
    docs: impl IntoIterator<Item = &'a InvoiceDocument>,
    today: NaiveDate,
    days: u32,
) -> BTreeMap<NaiveDate, usize> {
    let mut by_day: BTreeMap<NaiveDate, usize> = seeded(today, days);
    for doc in docs {
        *by_day.entry(doc.issued_date()).or_default() += 1;
    }
    by_day
}
