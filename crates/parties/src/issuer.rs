use serde::{Deserialize, Serialize};

use invoicer_core::ValueObject;

/// Printed when the business has not configured a display name yet.
pub const DEFAULT_ISSUER_NAME: &str = "Invoice Company";

/// The invoicing business as configured in its invoice settings.
///
/// Every field is optional on the wire; blanks are kept as empty strings so
/// the snapshot embedded in an invoice mirrors what was configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerProfile {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub phone1: String,
    pub phone2: String,
    pub email: String,
    pub logo_url: Option<String>,
}

impl IssuerProfile {
    /// Configured name, or [`DEFAULT_ISSUER_NAME`].
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { DEFAULT_ISSUER_NAME } else { name }
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

impl ValueObject for IssuerProfile {}
