//! Actions for the checkout pipeline.

use super::types::PurchaseReceipt;
use crate::error::FunnelError;
use crate::types::{CardDetails, Purchaser};

/// Inputs to the checkout reducer
#[derive(Debug, Clone)]
pub enum CheckoutAction {
    /// The user pressed "buy"
    ///
    /// Ignored while a submission is already in flight or after the
    /// purchase is confirmed.
    Submit {
        /// Contact details for the purchase
        purchaser: Purchaser,
        /// Payment instrument, request-scoped only
        card: CardDetails,
    },

    /// The gateway call completed successfully
    SubmissionSucceeded(PurchaseReceipt),

    /// The gateway call failed; the draft stays retained
    SubmissionFailed(FunnelError),

    /// Return a failed session to `Idle` for an explicit retry
    Reset,
}
