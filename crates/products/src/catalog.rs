//! Read-only view over the products supplied by the catalog collaborator.

use serde::{Deserialize, Serialize};

use invoicer_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::CatalogProduct;

/// Products available for invoicing, in the order the collaborator listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CatalogProduct>", into = "Vec<CatalogProduct>")]
pub struct Catalog {
    products: Vec<CatalogProduct>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn new(products: Vec<CatalogProduct>) -> DomainResult<Self> {
        for (idx, p) in products.iter().enumerate() {
            if products[..idx].iter().any(|q| q.id() == p.id()) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id '{}' (index {idx})",
                    p.id()
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn find(&self, id: &ProductId) -> Option<&CatalogProduct> {
        let found = self.products.iter().find(|p| p.id() == id);
        if found.is_none() {
            tracing::debug!(product_id = %id, "product not in catalog");
        }
        found
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl TryFrom<Vec<CatalogProduct>> for Catalog {
    type Error = DomainError;

    fn try_from(products: Vec<CatalogProduct>) -> Result<Self, Self::Error> {
        Self::new(products)
    }
}

impl From<Catalog> for Vec<CatalogProduct> {
    fn from(c: Catalog) -> Self {
        c.products
    }
}
