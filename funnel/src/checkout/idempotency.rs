//! Deterministic idempotency-key derivation.
//!
//! The key is a pure function of the draft's identifying fields only -
//! never of purchaser or card data, never of wall-clock time, never random.
//! Re-deriving it from the same draft on a retry yields the identical
//! string, which is what makes replaying an unmodified draft safe: the
//! backend treats a repeated key as "already processed" instead of
//! creating a duplicate purchase.

use crate::draft::OrderDraft;
use crate::types::SeatCode;

/// Request header carrying the derived key
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Derive the idempotency key for a draft
///
/// Format: `BUY-{cinemaId}-{movieId}-{hall}-{date}-{time}-{seats}` where
/// `seats` is the sorted seat codes joined with `_`. Seats are sorted so
/// the key is independent of the order the seat map reported them in.
#[must_use]
pub fn idempotency_key(draft: &OrderDraft) -> String {
    let mut seats: Vec<&str> = draft.seats.iter().map(SeatCode::as_str).collect();
    seats.sort_unstable();
    format!(
        "BUY-{}-{}-{}-{}-{}-{}",
        draft.cinema_id,
        draft.movie_id,
        draft.hall,
        draft.date,
        draft.time,
        seats.join("_")
    )
}
