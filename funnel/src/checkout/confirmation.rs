//! Confirmation token resolution.
//!
//! A successful purchase must always yield something scannable, even when
//! the backend returns an empty body. The QR payload is picked by fixed
//! precedence: the server's QR data, then the ticket code, then the payment
//! id, then the idempotency key re-derived from the draft. Blank or
//! whitespace-only tokens count as absent.

use super::idempotency::idempotency_key;
use super::types::PurchaseReceipt;
use crate::draft::OrderDraft;
use crate::types::TicketConfirmation;

fn present(token: &Option<String>) -> Option<String> {
    token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

/// Resolve a receipt into the confirmation shown to the user
///
/// The optional `ticket_code` and `payment_id` fields carry through
/// whatever the server provided, independent of which token won the QR
/// payload.
#[must_use]
pub fn resolve_confirmation(draft: &OrderDraft, receipt: &PurchaseReceipt) -> TicketConfirmation {
    let ticket_code = present(&receipt.ticket_code);
    let payment_id = present(&receipt.payment_id);

    let qr_payload = present(&receipt.qr_data)
        .or_else(|| ticket_code.clone())
        .or_else(|| payment_id.clone())
        .unwrap_or_else(|| idempotency_key(draft));

    TicketConfirmation {
        qr_payload,
        ticket_code,
        payment_id,
    }
}
