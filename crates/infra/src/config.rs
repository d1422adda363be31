//! Configuration loading and representation.
//!
//! Settings come from `INVOICER_*` environment variables and are read once at
//! startup. Parsing goes through [`InvoicingConfig::from_source`] so callers can
//! supply any key/value lookup.

use thiserror::Error;

use invoicer_invoicing::{AssemblyPolicy, PaymentMethod};
use invoicer_observability::LogFormat;

pub const ENFORCE_DATE_ORDER: &str = "INVOICER_ENFORCE_DATE_ORDER";
pub const DEFAULT_PAYMENT_METHOD: &str = "INVOICER_DEFAULT_PAYMENT_METHOD";
pub const GENERATED_BY: &str = "INVOICER_GENERATED_BY";
pub const LOG_FORMAT: &str = "INVOICER_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}: invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoicingConfig {
    /// Reject invoices whose due date precedes the issued date.
    pub enforce_date_order: bool,
    /// Payment method preselected when composition begins.
    pub default_payment_method: PaymentMethod,
    /// Author recorded on invoices when none is given.
    pub generated_by: Option<String>,
    pub log_format: LogFormat,
}

impl InvoicingConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; missing or blank keys take their
    /// defaults.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(raw) = get(ENFORCE_DATE_ORDER) {
            config.enforce_date_order = parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid(ENFORCE_DATE_ORDER, &raw, "expected a boolean"))?;
        }
        if let Some(raw) = get(DEFAULT_PAYMENT_METHOD) {
            config.default_payment_method = raw
                .parse()
                .map_err(|e| ConfigError::invalid(DEFAULT_PAYMENT_METHOD, &raw, format!("{e}")))?;
        }
        config.generated_by = get(GENERATED_BY);
        if let Some(raw) = get(LOG_FORMAT) {
            config.log_format = raw
                .parse()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT, &raw, format!("{e}")))?;
        }
        Ok(config)
    }

    /// Record the effective settings. Configuration is read before the
    /// subscriber exists, so callers emit this once logging is installed.
    pub fn log_loaded(&self) {
        tracing::debug!(
            enforce_date_order = self.enforce_date_order,
            default_payment_method = %self.default_payment_method,
            generated_by = self.generated_by.as_deref().unwrap_or(""),
            log_format = ?self.log_format,
            "configuration loaded"
        );
    }

    pub fn policy(&self) -> AssemblyPolicy {
        AssemblyPolicy {
            enforce_date_order: self.enforce_date_order,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = InvoicingConfig::from_source(source(&[])).unwrap();
        assert_eq!(config, InvoicingConfig::default());
        assert!(!config.policy().enforce_date_order);
        assert_eq!(config.default_payment_method, PaymentMethod::UpiTransfer);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.generated_by, None);
    }

    #[test]
    fn reads_every_key() {
        let config = InvoicingConfig::from_source(source(&[
            (ENFORCE_DATE_ORDER, "TRUE"),
            (DEFAULT_PAYMENT_METHOD, "Credit Card"),
            (GENERATED_BY, "  Billing Bot "),
            (LOG_FORMAT, "pretty"),
        ]))
        .unwrap();

        assert!(config.policy().enforce_date_order);
        assert_eq!(config.default_payment_method, PaymentMethod::CreditCard);
        assert_eq!(config.generated_by.as_deref(), Some("Billing Bot"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = InvoicingConfig::from_source(source(&[
            (DEFAULT_PAYMENT_METHOD, "   "),
            (GENERATED_BY, ""),
        ]))
        .unwrap();
        assert_eq!(config.default_payment_method, PaymentMethod::UpiTransfer);
        assert_eq!(config.generated_by, None);
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err = InvoicingConfig::from_source(source(&[(ENFORCE_DATE_ORDER, "maybe")])).unwrap_err();
        match err {
            ConfigError::Invalid { key, value, .. } => {
                assert_eq!(key, ENFORCE_DATE_ORDER);
                assert_eq!(value, "maybe");
            }
        }

        let err = InvoicingConfig::from_source(source(&[(LOG_FORMAT, "xml")])).unwrap_err();
        assert!(err.to_string().contains(LOG_FORMAT));
    }
}
