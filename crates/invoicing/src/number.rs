//! Invoice numbers.
//!
//! A number is handed out once, when composition of an invoice begins, and is
//! shown to the user immediately. It is a short numeric string rather than a
//! UUID because it is printed on the document and read out over the phone.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::InvoicingError;

/// Digits taken from the end of the millisecond timestamp.
const TIMESTAMP_DIGITS: u32 = 4;

/// Human-presentable invoice number (ASCII digits only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lay out a number from a millisecond timestamp and a two-digit suffix.
    ///
    /// The last four timestamp digits come first so numbers issued a few
    /// milliseconds apart still differ before the random part is consulted.
    pub fn compose(unix_millis: i64, suffix: u8) -> Self {
        let modulus = 10_i64.pow(TIMESTAMP_DIGITS);
        let stamp = unix_millis.rem_euclid(modulus);
        Self(format!(
            "{stamp:0width$}{:02}",
            suffix % 100,
            width = TIMESTAMP_DIGITS as usize
        ))
    }
}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InvoiceNumber {
    type Err = InvoicingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvoicingError::InvalidNumber("must not be empty".into()));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvoicingError::InvalidNumber(format!(
                "'{s}' must contain digits only"
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for InvoiceNumber {
    type Error = InvoicingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InvoiceNumber> for String {
    fn from(value: InvoiceNumber) -> Self {
        value.0
    }
}

/// Source of invoice numbers.
pub trait InvoiceNumberGenerator {
    fn generate(&self) -> InvoiceNumber;
}

/// Timestamp-plus-random generator used by the application.
///
/// Produces six digits; uniqueness is only probable, so the storage
/// collaborator must still reject duplicates.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampNumberGenerator;

impl TimestampNumberGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate_at(&self, now: DateTime<Utc>) -> InvoiceNumber {
        let suffix: u8 = rand::thread_rng().gen_range(10..=99);
        InvoiceNumber::compose(now.timestamp_millis(), suffix)
    }
}

impl InvoiceNumberGenerator for TimestampNumberGenerator {
    fn generate(&self) -> InvoiceNumber {
        self.generate_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn compose_takes_last_timestamp_digits_then_suffix() {
        let n = InvoiceNumber::compose(1_718_000_123_456, 42);
        assert_eq!(n.as_str(), "345642");
    }

    #[test]
    fn compose_pads_short_values() {
        assert_eq!(InvoiceNumber::compose(7, 5).as_str(), "000705");
    }

    #[test]
    fn generated_numbers_are_six_digits() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        let generator = TimestampNumberGenerator::new();
        for _ in 0..50 {
            let n = generator.generate_at(now);
            assert_eq!(n.as_str().len(), 6);
            assert!(n.as_str().starts_with("6000"));
            let suffix: u8 = n.as_str()[4..].parse().unwrap();
            assert!((10..=99).contains(&suffix));
        }
        assert_eq!(generator.generate().as_str().len(), 6);
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert_eq!("123456".parse::<InvoiceNumber>().unwrap().as_str(), "123456");
        assert!(matches!(
            "12a456".parse::<InvoiceNumber>(),
            Err(InvoicingError::InvalidNumber(_))
        ));
        assert!("  ".parse::<InvoiceNumber>().is_err());
    }
}
