//! Pricing calculation.
//!
//! A single configured unit price, no tiering: `total = unit × seat count`.
//! Pure functions only - no side effects, no external calls.

use crate::types::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Total for a number of seats at one unit price
///
/// Zero seats is a valid order-in-progress and yields a zero total, not an
/// error.
#[must_use]
pub fn order_total(unit_price: Money, seat_count: usize) -> Money {
    unit_price.saturating_mul(seat_count as u64)
}

/// The pricing block captured into an order draft
///
/// Serialized into the draft slot and the purchase request body; the wire
/// names follow the purchase endpoint (`unitPrice`, `seats`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPricing {
    /// Price per seat
    pub unit_price: Money,
    /// Display currency
    pub currency: Currency,
    /// `unit_price × seat_count`
    pub total: Money,
    /// Number of seats priced
    #[serde(rename = "seats")]
    pub seat_count: u32,
}

impl DraftPricing {
    /// Price `seat_count` seats at `unit_price`
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // seat counts are tiny
    pub fn new(unit_price: Money, currency: Currency, seat_count: usize) -> Self {
        Self {
            unit_price,
            currency,
            total: order_total(unit_price, seat_count),
            seat_count: seat_count as u32,
        }
    }

    /// The total with fixed two-decimal currency formatting, e.g. `"$19.98"`
    #[must_use]
    pub fn formatted_total(&self) -> String {
        self.currency.format(self.total)
    }
}
