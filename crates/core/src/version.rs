//! Stale-edit detection for the cart being composed.

use crate::error::{DomainError, DomainResult};

/// Which cart version a positional edit was made against.
///
/// A cart counts its successful mutations. Line items are addressed by
/// position, so "remove row 2" only means what the user saw if no add or
/// remove landed in between; `Exact(n)` pins the edit to version `n`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Apply the edit to whatever the cart currently holds.
    Any,
    /// Apply the edit only if the cart is still at this version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "cart changed since it was read (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
