//! Cart totals.
//!
//! Line totals are summed at full precision and rounded once, at the end, so
//! many small fractional lines do not accumulate rounding error. Every step
//! is checked; an unrepresentable amount surfaces as `AmountOverflow`.

use rust_decimal::Decimal;

use invoicer_core::{round_money, Money};

use crate::cart::Cart;
use crate::error::{InvoicingError, InvoicingResult};
use crate::line_item::LineItem;

/// Rounded total of a cart; `0` for an empty cart.
pub fn total(cart: &Cart) -> InvoicingResult<Decimal> {
    // A cart never holds mixed currencies, so only overflow is checked here.
    unrounded_total(cart.items()).map(round_money)
}

/// Rounded total paired with the cart's currency; `None` while the cart is empty.
pub fn priced_total(cart: &Cart) -> InvoicingResult<Option<Money>> {
    let Some(currency) = cart.currency() else {
        return Ok(None);
    };
    Ok(Some(Money::new(total(cart)?, currency.clone())))
}

/// Rounded total of an arbitrary slice of items.
///
/// Fails with `CurrencyMismatch` when the items do not share one currency.
pub fn total_of(items: &[LineItem]) -> InvoicingResult<Decimal> {
    if let Some(first) = items.first() {
        let expected = first.currency();
        if let Some(other) = items.iter().find(|i| i.currency() != expected) {
            return Err(InvoicingError::CurrencyMismatch {
                expected: expected.clone(),
                found: other.currency().clone(),
            });
        }
    }
    unrounded_total(items).map(round_money)
}

/// Full-precision sum of line totals.
pub(crate) fn unrounded_total<'a>(
    items: impl IntoIterator<Item = &'a LineItem>,
) -> InvoicingResult<Decimal> {
    items.into_iter().try_fold(Decimal::ZERO, |acc, item| {
        let line = item.line_total()?;
        acc.checked_add(line).ok_or_else(|| {
            InvoicingError::AmountOverflow(format!(
                "{acc} + {line} for product '{}'",
                item.product().product_id
            ))
        })
    })
}
