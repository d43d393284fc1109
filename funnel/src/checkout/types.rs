//! State types for the checkout pipeline.

use crate::draft::OrderDraft;
use crate::error::FunnelError;
use crate::types::TicketConfirmation;
use serde::{Deserialize, Serialize};

/// What a successful purchase response carried
///
/// All fields are optional: the backend may return any subset of tokens,
/// or an empty body. Confirmation resolution handles the precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseReceipt {
    /// Server-provided QR payload
    pub qr_data: Option<String>,
    /// Server-provided ticket code
    pub ticket_code: Option<String>,
    /// Server-provided payment identifier
    pub payment_id: Option<String>,
}

/// Phase of the submission state machine
///
/// The busy flag of the funnel, modeled as explicit states so "a second
/// submit while Submitting is a no-op" is a testable transition rule.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutPhase {
    /// Nothing in flight; submit is allowed
    Idle,
    /// A submission is in flight; further submits are ignored
    Submitting,
    /// Purchase confirmed; the draft slot has been cleared
    Confirmed(TicketConfirmation),
    /// Submission failed; the draft is retained for an explicit retry
    Failed(FunnelError),
}

/// One checkout session: the loaded draft plus the submission phase
///
/// The draft is the snapshot loaded from the slot on page entry; it is
/// never mutated here. A new selection produces a new draft and a new
/// session.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    /// The immutable draft being purchased
    pub draft: OrderDraft,
    /// Current submission phase
    pub phase: CheckoutPhase,
}

impl CheckoutSession {
    /// Start a session for a loaded draft
    #[must_use]
    pub const fn new(draft: OrderDraft) -> Self {
        Self {
            draft,
            phase: CheckoutPhase::Idle,
        }
    }

    /// Whether a submission is currently in flight
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, CheckoutPhase::Submitting)
    }

    /// The confirmation, once the purchase succeeded
    #[must_use]
    pub const fn confirmation(&self) -> Option<&TicketConfirmation> {
        match &self.phase {
            CheckoutPhase::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }
}
