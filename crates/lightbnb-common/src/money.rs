//! Money helpers.
//!
//! Nightly prices are stored in cents. Callers talk in dollars.

/// Convert a dollar amount to whole cents, rounding to the nearest cent.
#[must_use]
pub fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// Convert cents back to dollars for display.
#[must_use]
pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}
