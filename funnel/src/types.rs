//! Domain types for the booking funnel.
//!
//! This module contains the value objects shared by the selection, draft and
//! checkout modules: catalog identifiers, show dates and times, seat codes,
//! money, and the purchase-side contact types.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! numeric_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw catalog identifier
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw identifier
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Unique identifier for a country in the catalog
    CountryId
);
numeric_id!(
    /// Unique identifier for a city in the catalog
    CityId
);
numeric_id!(
    /// Unique identifier for a cinema in the catalog
    CinemaId
);
numeric_id!(
    /// Unique identifier for a movie in the catalog
    MovieId
);

/// Name of a hall within a cinema
///
/// Halls are identified by name in the showtimes payload; there is no
/// separate numeric id for them.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HallName(String);

impl HallName {
    /// Wrap a hall name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the hall name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HallName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Dates and times
// ============================================================================

/// A calendar show date in `YYYY-MM-DD` form
///
/// Dates are compared as calendar dates, never as timestamps. The zero-padded
/// textual form sorts chronologically, so the derived `Ord` is the showtime
/// ordering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShowDate(String);

impl ShowDate {
    /// Wrap a `YYYY-MM-DD` date string
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self(date.into())
    }

    /// Get the date as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a calendar date, if well formed
    #[must_use]
    pub fn to_naive_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }

    /// Calendar comparison against "today"
    ///
    /// Malformed dates never pass the filter.
    #[must_use]
    pub fn is_on_or_after(&self, today: chrono::NaiveDate) -> bool {
        self.to_naive_date().is_some_and(|date| date >= today)
    }
}

impl fmt::Display for ShowDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A show time in zero-padded `HH:MM:SS` form
///
/// Lexicographic order is chronological order for this representation, so
/// time lists are sorted with the derived `Ord`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShowTime(String);

impl ShowTime {
    /// Wrap an `HH:MM:SS` time string
    #[must_use]
    pub fn new(time: impl Into<String>) -> Self {
        Self(time.into())
    }

    /// Get the time as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShowTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split an ISO-8601 timestamp (`2025-06-01T19:30:00[Z]`) into date and time
///
/// The catalog delivers showtimes as full timestamps; the funnel works with
/// calendar dates and wall-clock times. Returns `None` for payload entries
/// too short or missing the `T` separator; callers skip those.
#[must_use]
pub fn split_timestamp(timestamp: &str) -> Option<(ShowDate, ShowTime)> {
    if timestamp.len() < 19 || timestamp.as_bytes()[10] != b'T' {
        return None;
    }
    let date = timestamp.get(..10)?;
    let time = timestamp.get(11..19)?;
    Some((ShowDate::new(date), ShowTime::new(time)))
}

// ============================================================================
// Seats
// ============================================================================

/// A seat code as produced by the seat map, e.g. `"A12"`
///
/// The seat map is an external collaborator; the funnel treats its output as
/// opaque codes until purchase time, when the row letter and seat number are
/// split out for the wire format.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatCode(String);

impl SeatCode {
    /// Wrap a seat code
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the seat code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(row letters, seat number)`
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSeatCode`] when the code has no
    /// leading letters or no trailing number.
    pub fn parts(&self) -> Result<(String, u32), ValidationError> {
        let split = self.0.find(|c: char| c.is_ascii_digit());
        let (letters, digits) = match split {
            Some(at) if at > 0 => self.0.split_at(at),
            _ => return Err(ValidationError::InvalidSeatCode(self.0.clone())),
        };
        if !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidSeatCode(self.0.clone()));
        }
        let number = digits
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidSeatCode(self.0.clone()))?;
        Ok((letters.to_string(), number))
    }
}

impl fmt::Display for SeatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// A monetary amount in minor units (cents)
///
/// Stored as integer cents so totals are exact; the wire format and display
/// use fixed two-decimal formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(u64);

impl Money {
    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by a count, saturating at the numeric ceiling
    #[must_use]
    pub const fn saturating_mul(self, count: u64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// Fixed two-decimal string, e.g. `"19.98"`
    #[must_use]
    pub fn to_decimal_string(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// The wire format carries decimal amounts (9.99), not cents.
impl Serialize for Money {
    #[allow(clippy::cast_precision_loss)] // ticket prices are far below 2^52 cents
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(serde::de::Error::custom("amount must be a non-negative number"));
        }
        Ok(Self((amount * 100.0).round() as u64))
    }
}

/// Supported display currencies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    /// United States dollar
    #[default]
    Usd,
    /// Euro
    Eur,
    /// British pound
    Gbp,
}

impl Currency {
    /// ISO 4217 code, the wire representation
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Display symbol used in formatted totals
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }

    /// Parse an ISO 4217 code; unknown codes fall back to USD
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "EUR" => Self::Eur,
            "GBP" => Self::Gbp,
            _ => Self::Usd,
        }
    }

    /// Format an amount in this currency, e.g. `"$19.98"`
    #[must_use]
    pub fn format(&self, amount: Money) -> String {
        format!("{}{}", self.symbol(), amount.to_decimal_string())
    }
}

impl Serialize for Currency {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code(&code))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Purchase-side contact types
// ============================================================================

/// Contact details of the person buying the tickets
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchaser {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact phone number
    pub phone: String,
    /// Contact email address
    pub email: String,
}

/// Payment-instrument fields passed through to the purchase endpoint
///
/// Request-scoped only; never persisted, never part of the idempotency key,
/// and redacted from `Debug` output so it cannot leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    /// Name on the card
    pub holder: String,
    /// Card number
    pub number: String,
    /// Expiry month (1-12)
    pub expiry_month: u8,
    /// Expiry year (four digits)
    pub expiry_year: u16,
    /// Card verification value
    pub cvv: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("holder", &self.holder)
            .field("number", &"[redacted]")
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"[redacted]")
            .finish()
    }
}

/// The scannable confirmation resolved after a successful purchase
///
/// `qr_payload` is always non-empty once a confirmation exists; the optional
/// fields carry through whatever the server provided.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketConfirmation {
    /// The scannable token shown to the user
    pub qr_payload: String,
    /// Server-issued ticket code, when present
    pub ticket_code: Option<String>,
    /// Server-issued payment identifier, when present
    pub payment_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn split_timestamp_extracts_date_and_time() {
        let (date, time) = split_timestamp("2025-06-01T19:30:00").unwrap();
        assert_eq!(date.as_str(), "2025-06-01");
        assert_eq!(time.as_str(), "19:30:00");

        let (date, time) = split_timestamp("2025-06-01T09:05:00Z").unwrap();
        assert_eq!(date.as_str(), "2025-06-01");
        assert_eq!(time.as_str(), "09:05:00");
    }

    #[test]
    fn split_timestamp_rejects_malformed_input() {
        assert!(split_timestamp("2025-06-01").is_none());
        assert!(split_timestamp("2025-06-01 19:30:00").is_none());
        assert!(split_timestamp("").is_none());
    }

    #[test]
    fn show_date_calendar_filter() {
        let today = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(ShowDate::new("2025-01-01").is_on_or_after(today));
        assert!(ShowDate::new("2099-12-31").is_on_or_after(today));
        assert!(!ShowDate::new("2024-01-01").is_on_or_after(today));
        assert!(!ShowDate::new("not-a-date").is_on_or_after(today));
    }

    #[test]
    fn seat_code_splits_into_row_and_number() {
        assert_eq!(SeatCode::new("A12").parts().unwrap(), ("A".to_string(), 12));
        assert_eq!(SeatCode::new("AB3").parts().unwrap(), ("AB".to_string(), 3));
    }

    #[test]
    fn seat_code_rejects_malformed_codes() {
        assert!(SeatCode::new("12").parts().is_err());
        assert!(SeatCode::new("A").parts().is_err());
        assert!(SeatCode::new("A-1").parts().is_err());
        assert!(SeatCode::new("").parts().is_err());
    }

    #[test]
    fn money_formats_with_two_decimals() {
        assert_eq!(Money::from_cents(1998).to_decimal_string(), "19.98");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::from_cents(0).to_decimal_string(), "0.00");
        assert_eq!(Currency::Usd.format(Money::from_cents(1998)), "$19.98");
    }

    #[test]
    fn money_round_trips_as_decimal_json() {
        let json = serde_json::to_string(&Money::from_cents(999)).unwrap();
        assert_eq!(json, "9.99");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_cents(999));
    }

    #[test]
    fn card_details_debug_is_redacted() {
        let card = CardDetails {
            holder: "Ada Lovelace".to_string(),
            number: "4242424242424242".to_string(),
            expiry_month: 12,
            expiry_year: 2030,
            cvv: "123".to_string(),
        };
        let debug = format!("{card:?}");
        assert!(!debug.contains("4242"));
        assert!(!debug.contains("123"));
    }
}
