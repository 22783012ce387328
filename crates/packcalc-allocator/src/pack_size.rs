//! Pack size newtype.
//!
//! A pack size is a positive item count. Zero is unrepresentable, which keeps
//! the allocator's reconstruction walk strictly decreasing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use thiserror::Error;

/// A fixed, positive number of items shipped as one indivisible pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PackSize(NonZeroU64);

/// Rejected pack size value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("pack size must be a positive integer, got {value}")]
pub struct InvalidPackSize {
    pub value: i128,
}

impl PackSize {
    /// Create a pack size, returning `None` for zero.
    #[must_use]
    pub const fn new(items: u64) -> Option<Self> {
        match NonZeroU64::new(items) {
            Some(items) => Some(Self(items)),
            None => None,
        }
    }

    /// Number of items in one pack.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for PackSize {
    type Error = InvalidPackSize;

    fn try_from(items: u64) -> Result<Self, Self::Error> {
        Self::new(items).ok_or(InvalidPackSize {
            value: i128::from(items),
        })
    }
}

impl TryFrom<i64> for PackSize {
    type Error = InvalidPackSize;

    fn try_from(items: i64) -> Result<Self, Self::Error> {
        u64::try_from(items)
            .ok()
            .and_then(Self::new)
            .ok_or(InvalidPackSize {
                value: i128::from(items),
            })
    }
}

impl From<PackSize> for u64 {
    fn from(size: PackSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert!(PackSize::new(0).is_none());
        assert_eq!(
            PackSize::try_from(0_u64),
            Err(InvalidPackSize { value: 0 })
        );
    }

    #[test]
    fn negative_is_rejected() {
        let err = PackSize::try_from(-250_i64).unwrap_err();
        assert_eq!(err.value, -250);
        assert_eq!(
            err.to_string(),
            "pack size must be a positive integer, got -250"
        );
    }

    #[test]
    fn positive_round_trips_through_json() {
        let size = PackSize::try_from(250_i64).unwrap();
        assert_eq!(size.get(), 250);
        assert_eq!(serde_json::to_string(&size).unwrap(), "250");

        let parsed: PackSize = serde_json::from_str("500").unwrap();
        assert_eq!(parsed.get(), 500);
        assert!(serde_json::from_str::<PackSize>("0").is_err());
    }

    #[test]
    fn ordering_follows_item_count() {
        let small = PackSize::new(250).unwrap();
        let large = PackSize::new(5000).unwrap();
        assert!(small < large);
        assert_eq!(large.to_string(), "5000");
    }
}
