//! Order quantity validation for the request surfaces.
//!
//! The allocator accepts any integer; these checks run before it is invoked.

use crate::error::QuantityError;

/// Upper bound on quantities accepted over the network.
pub const DEFAULT_MAX_QUANTITY: i64 = 10_000_000;

/// Parse a raw order quantity.
///
/// `None` or blank input is [`QuantityError::Missing`]. The value must be an
/// integer in `1..=max`; with `max = None` only the lower bound applies.
pub fn parse_quantity(raw: Option<&str>, max: Option<i64>) -> Result<i64, QuantityError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(QuantityError::Missing);
    }

    let value: i64 = raw.parse().map_err(|_| QuantityError::NotAnInteger {
        raw: raw.to_string(),
    })?;

    let too_large = max.is_some_and(|max| value > max);
    if value <= 0 || too_large {
        return Err(QuantityError::OutOfRange { value, max });
    }

    Ok(value)
}

/// Render an integer with space-separated thousands, e.g. `10 000 000`.
#[must_use]
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}
