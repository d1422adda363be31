use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use invoicer_core::{Currency, DomainError, Entity, ProductId};

/// Raw catalog record as received from the catalog collaborator.
///
/// Use [`CatalogProduct::try_from`] to validate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCatalogProduct {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// Unit list price.
    pub price: Decimal,
    /// Discount percentage in `0..=100`; missing means no discount.
    #[serde(default)]
    pub discount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "product_image")]
    pub image_url: Option<String>,
}

/// A validated catalog product (read-only to the invoice engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewCatalogProduct")]
pub struct CatalogProduct {
    id: ProductId,
    name: String,
    price: Decimal,
    discount: Decimal,
    currency: Currency,
    category: Option<String>,
    image_url: Option<String>,
}

impl CatalogProduct {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Discount percentage, `0..=100`.
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

impl Entity for CatalogProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TryFrom<NewCatalogProduct> for CatalogProduct {
    type Error = DomainError;

    fn try_from(raw: NewCatalogProduct) -> Result<Self, Self::Error> {
        let id = ProductId::new(raw.id)?;

        let name = raw.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if raw.price < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "product '{id}': price must be non-negative"
            )));
        }
        if raw.discount < Decimal::ZERO || raw.discount > Decimal::ONE_HUNDRED {
            return Err(DomainError::validation(format!(
                "product '{id}': discount must be between 0 and 100"
            )));
        }
        let currency = Currency::new(raw.currency)?;

        Ok(Self {
            id,
            name: name.to_string(),
            price: raw.price,
            discount: raw.discount,
            currency,
            category: raw.category.filter(|c| !c.trim().is_empty()),
            image_url: raw.image_url.filter(|u| !u.trim().is_empty()),
        })
    }
}
