//! Money and currency value objects.
//!
//! Amounts are `rust_decimal::Decimal` so unit prices, discounts and quantities
//! multiply without binary floating point drift. Rounding happens only where a
//! value is presented or totalled, through [`round_money`].

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Number of fractional digits kept for presented and totalled amounts.
pub const MONEY_SCALE: u32 = 2;

/// Round to [`MONEY_SCALE`] places, half-up (midpoint away from zero).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Currency code as supplied by the catalog (ISO 4217-like, e.g. `"USD"`).
///
/// The catalog is free-form, so the only rules are: non-empty and no
/// whitespace. Codes compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Result<Self, DomainError> {
        let code = code.into();
        let code = code.trim();
        if code.is_empty() {
            return Err(DomainError::validation("currency code cannot be empty"));
        }
        if code.chars().any(char::is_whitespace) {
            return Err(DomainError::validation(format!(
                "currency code '{code}' must not contain whitespace"
            )));
        }
        Ok(Self(code.to_string()))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

impl ValueObject for Currency {}

/// An amount paired with its currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Same money, rounded for presentation.
    pub fn rounded(&self) -> Self {
        Self::new(round_money(self.amount), self.currency.clone())
    }

    /// Add two amounts of the same currency.
    pub fn checked_add(&self, other: &Money) -> Result<Money, DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::invariant(format!(
                "cannot add {} to {}",
                other.currency, self.currency
            )));
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| DomainError::invariant("money amount overflow"))?;
        Ok(Self::new(amount, self.currency.clone()))
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    /// Renders as `"<code> <amount>"` with two decimals, e.g. `USD 270.00`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let rounded = round_money(self.amount);
        write!(f, "{} {:.2}", self.currency, rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd() -> Currency {
        Currency::new("USD").unwrap()
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
        assert_eq!(round_money(dec!(2.675)), dec!(2.68));
        assert_eq!(round_money(dec!(0)), dec!(0));
    }

    #[test]
    fn currency_rejects_blank_and_whitespace() {
        assert!(Currency::new("").is_err());
        assert!(Currency::new("   ").is_err());
        assert!(Currency::new("U S").is_err());
        assert_eq!(Currency::new(" INR ").unwrap().code(), "INR");
    }

    #[test]
    fn display_uses_two_decimals() {
        let m = Money::new(dec!(270), usd());
        assert_eq!(m.to_string(), "USD 270.00");

        let m = Money::new(dec!(49.985), usd());
        assert_eq!(m.to_string(), "USD 49.99");
    }

    #[test]
    fn adding_different_currencies_fails() {
        let a = Money::new(dec!(10), usd());
        let b = Money::new(dec!(5), Currency::new("EUR").unwrap());
        match a.checked_add(&b) {
            Err(DomainError::InvariantViolation(msg)) => assert!(msg.contains("EUR")),
            other => panic!("expected InvariantViolation, got {other:?}"),
        }

        let c = a.checked_add(&Money::new(dec!(5.5), usd())).unwrap();
        assert_eq!(c.amount(), dec!(15.5));
    }
}
