use serde::{Deserialize, Serialize};

use invoicer_core::{CustomerId, DomainError, DomainResult, Entity, ValueObject};

/// Raw customer record as received from the customer collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCustomer {
    #[serde(alias = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// A validated customer record.
///
/// Serialized with the same field names it was read with, so an invoice can
/// embed the snapshot as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewCustomer")]
pub struct Customer {
    id: CustomerId,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    street_address: String,
    city: String,
    state: String,
    country: String,
}

impl Customer {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last", trimmed when one part is missing.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn street_address(&self) -> &str {
        &self.street_address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// Embedded in invoices as a by-value snapshot.
impl ValueObject for Customer {}

impl TryFrom<NewCustomer> for Customer {
    type Error = DomainError;

    fn try_from(raw: NewCustomer) -> Result<Self, Self::Error> {
        let id = CustomerId::new(raw.id)?;
        let first_name = raw.first_name.trim().to_string();
        let last_name = raw.last_name.trim().to_string();
        if first_name.is_empty() && last_name.is_empty() {
            return Err(DomainError::validation(format!(
                "customer '{id}': first or last name is required"
            )));
        }

        Ok(Self {
            id,
            first_name,
            last_name,
            email: raw.email.trim().to_string(),
            phone: raw.phone.trim().to_string(),
            street_address: raw.street_address.trim().to_string(),
            city: raw.city.trim().to_string(),
            state: raw.state.trim().to_string(),
            country: raw.country.trim().to_string(),
        })
    }
}

/// Customers the invoicing business can bill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Customer>", into = "Vec<Customer>")]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    /// Build a directory, rejecting duplicate customer ids.
    pub fn new(customers: Vec<Customer>) -> DomainResult<Self> {
        for (idx, c) in customers.iter().enumerate() {
            if customers[..idx].iter().any(|o| o.id() == c.id()) {
                return Err(DomainError::conflict(format!(
                    "duplicate customer id '{}' (index {idx})",
                    c.id()
                )));
            }
        }
        Ok(Self { customers })
    }

    pub fn find(&self, id: &CustomerId) -> Option<&Customer> {
        let found = self.customers.iter().find(|c| c.id() == id);
        if found.is_none() {
            tracing::debug!(customer_id = %id, "customer not in directory");
        }
        found
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl TryFrom<Vec<Customer>> for CustomerDirectory {
    type Error = DomainError;

    fn try_from(customers: Vec<Customer>) -> Result<Self, Self::Error> {
        Self::new(customers)
    }
}

impl From<CustomerDirectory> for Vec<Customer> {
    fn from(d: CustomerDirectory) -> Self {
        d.customers
    }
}
