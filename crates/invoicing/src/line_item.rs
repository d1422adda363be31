//! Line items: a product snapshot combined with a requested quantity.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use invoicer_core::{round_money, Currency, Entity, ProductId, ValueObject};
use invoicer_products::CatalogProduct;

use crate::error::{InvoicingError, InvoicingResult};

/// Requested quantity of a line item (an integer, at least 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: i64) -> InvoicingResult<Self> {
        if value < 1 {
            return Err(InvoicingError::InvalidQuantity(format!(
                "{value} is below the minimum of 1"
            )));
        }
        let value = u32::try_from(value)
            .map_err(|_| InvoicingError::InvalidQuantity(format!("{value} is too large")))?;
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = InvoicingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl FromStr for Quantity {
    type Err = InvoicingError;

    /// Parses form input; `"2.5"` or `"abc"` are not quantities.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value: i64 = s
            .parse()
            .map_err(|_| InvoicingError::InvalidQuantity(format!("'{s}' is not a whole number")))?;
        Self::new(value)
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Point-in-time copy of the catalog fields an invoice needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    /// Percentage, `0..=100`.
    pub discount: Decimal,
    pub currency: Currency,
}

impl ValueObject for ProductSnapshot {}

impl From<&CatalogProduct> for ProductSnapshot {
    fn from(p: &CatalogProduct) -> Self {
        Self {
            product_id: p.id().clone(),
            name: p.name().to_string(),
            unit_price: p.price(),
            discount: p.discount(),
            currency: p.currency().clone(),
        }
    }
}

/// One product/quantity entry of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    product: ProductSnapshot,
    quantity: Quantity,
}

impl LineItem {
    /// Snapshot `product` and pair it with `quantity`.
    ///
    /// Fails with `AmountOverflow` when the line total is not representable.
    pub fn from_selection(product: &CatalogProduct, quantity: i64) -> InvoicingResult<Self> {
        let quantity = Quantity::new(quantity)?;
        let item = Self::new(ProductSnapshot::from(product), quantity);
        item.line_total()?;
        Ok(item)
    }

    pub fn new(product: ProductSnapshot, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    pub fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn currency(&self) -> &Currency {
        &self.product.currency
    }

    /// `max(0, price * (1 - discount/100))`, full precision.
    ///
    /// The discount is read clamped to `0..=100`, so the result never exceeds
    /// the unit price and cannot overflow.
    pub fn final_unit_price(&self) -> Decimal {
        let discount = self
            .product
            .discount
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
            / Decimal::ONE_HUNDRED;
        let price = self.product.unit_price * (Decimal::ONE - discount);
        price.max(Decimal::ZERO)
    }

    /// `final_unit_price * quantity`, full precision.
    pub fn line_total(&self) -> InvoicingResult<Decimal> {
        self.final_unit_price()
            .checked_mul(Decimal::from(self.quantity.get()))
            .ok_or_else(|| {
                InvoicingError::AmountOverflow(format!(
                    "{} x {} for product '{}'",
                    self.final_unit_price(),
                    self.quantity,
                    self.product.product_id
                ))
            })
    }

    /// Presentation value of [`Self::final_unit_price`].
    pub fn final_unit_price_rounded(&self) -> Decimal {
        round_money(self.final_unit_price())
    }

    /// Presentation value of [`Self::line_total`].
    pub fn line_total_rounded(&self) -> InvoicingResult<Decimal> {
        self.line_total().map(round_money)
    }
}

impl ValueObject for LineItem {}

#[cfg(test)]
mod tests {
    use super::*;
    use invoicer_products::NewCatalogProduct;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn product(price: Decimal, discount: Decimal) -> CatalogProduct {
        CatalogProduct::try_from(NewCatalogProduct {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            price,
            discount,
            currency: "USD".to_string(),
            category: None,
            image_url: None,
        })
        .unwrap()
    }

    #[test]
    fn discounted_price_and_total() {
        let item = LineItem::from_selection(&product(dec!(100), dec!(10)), 3).unwrap();
        assert_eq!(item.final_unit_price_rounded(), dec!(90.00));
        assert_eq!(item.line_total_rounded(), Ok(dec!(270.00)));
    }

    #[test]
    fn full_discount_is_free() {
        let item = LineItem::from_selection(&product(dec!(19.99), dec!(100)), 4).unwrap();
        assert_eq!(item.final_unit_price(), Decimal::ZERO);
        assert_eq!(item.line_total(), Ok(Decimal::ZERO));
    }

    #[test]
    fn totals_keep_full_precision_until_rounded() {
        // 33.3333... * 3 must give 100.00, not 99.99.
        let item = LineItem::from_selection(&product(dec!(100), dec!(66.6666666667)), 3).unwrap();
        assert_eq!(item.final_unit_price_rounded(), dec!(33.33));
        assert_eq!(item.line_total_rounded(), Ok(dec!(100.00)));
    }

    #[test]
    fn unrepresentable_line_total_is_rejected() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(20), 0);
        match LineItem::from_selection(&product(huge, dec!(0)), 1_000_000_000) {
            Err(InvoicingError::AmountOverflow(msg)) => assert!(msg.contains("p-1")),
            other => panic!("expected AmountOverflow, got {other:?}"),
        }

        // Built directly, the item exists but its total still reports the overflow.
        let item = LineItem::new(
            ProductSnapshot::from(&product(huge, dec!(0))),
            Quantity::new(1_000_000_000).unwrap(),
        );
        assert!(matches!(item.line_total(), Err(InvoicingError::AmountOverflow(_))));
        assert!(matches!(item.line_total_rounded(), Err(InvoicingError::AmountOverflow(_))));

        // A hand-built snapshot cannot raise the price through a negative discount.
        let mut snapshot = ProductSnapshot::from(&product(Decimal::MAX, dec!(0)));
        snapshot.discount = dec!(-50);
        let item = LineItem::new(snapshot, Quantity::new(1).unwrap());
        assert_eq!(item.final_unit_price(), Decimal::MAX);

        // The largest price still fits with a quantity of one.
        let max = LineItem::from_selection(&product(Decimal::MAX, dec!(0)), 1).unwrap();
        assert_eq!(max.line_total(), Ok(Decimal::MAX));
    }

    #[test]
    fn quantity_below_one_is_rejected() {
        for q in [0, -1, i64::MIN] {
            match LineItem::from_selection(&product(dec!(1), dec!(0)), q) {
                Err(InvoicingError::InvalidQuantity(_)) => {}
                other => panic!("expected InvalidQuantity for {q}, got {other:?}"),
            }
        }
    }

    #[test]
    fn quantity_must_be_a_whole_number() {
        assert_eq!("2".parse::<Quantity>().unwrap().get(), 2);
        assert!(matches!(
            "2.5".parse::<Quantity>(),
            Err(InvoicingError::InvalidQuantity(_))
        ));
        assert!("".parse::<Quantity>().is_err());
        assert!(Quantity::new(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn snapshot_is_detached_from_catalog_record() {
        let mut raw = NewCatalogProduct {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            price: dec!(10),
            discount: dec!(0),
            currency: "USD".to_string(),
            category: None,
            image_url: None,
        };
        let original = CatalogProduct::try_from(raw.clone()).unwrap();
        let item = LineItem::from_selection(&original, 1).unwrap();

        raw.price = dec!(99);
        let _edited = CatalogProduct::try_from(raw).unwrap();

        assert_eq!(item.product().unit_price, dec!(10));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: for any price, discount in [0, 100] and quantity >= 1 the
        /// derived prices follow the discount formula and are never negative.
        #[test]
        fn derived_prices_follow_formula(
            price_cents in 0i64..10_000_000,
            discount_bp in 0i64..=10_000,
            quantity in 1i64..1_000,
        ) {
            let price = Decimal::new(price_cents, 2);
            let discount = Decimal::new(discount_bp, 2);
            let item = LineItem::from_selection(&product(price, discount), quantity).unwrap();

            let expected_unit = price * (Decimal::ONE - discount / Decimal::ONE_HUNDRED);
            prop_assert_eq!(item.final_unit_price(), expected_unit);
            let total = item.line_total().unwrap();
            prop_assert_eq!(total, expected_unit * Decimal::from(quantity));
            prop_assert!(item.final_unit_price() >= Decimal::ZERO);
            prop_assert!(total >= Decimal::ZERO);
        }
    }
}
