//! Idempotent checkout pipeline.
//!
//! A persisted draft is loaded on the checkout page, submitted exactly once
//! to the purchase endpoint, and resolved into a scannable confirmation.
//! Safety comes from two mechanisms working together:
//!
//! - the idempotency key is a pure function of the draft's identifying
//!   fields, so resubmitting an unmodified draft sends a byte-identical
//!   key and the backend treats it as already processed;
//! - the submission state machine (`Idle → Submitting → {Confirmed |
//!   Failed}`) makes a second submit while one is in flight a no-op, so a
//!   double-click never fires two requests client-side either.
//!
//! On success the draft slot is cleared; on any failure it is retained so
//! an explicit retry can replay the identical request.

mod actions;
mod confirmation;
mod environment;
mod gateway;
mod idempotency;
mod reducer;
mod types;


pub use actions::CheckoutAction;
pub use confirmation::resolve_confirmation;
pub use environment::CheckoutEnvironment;
pub use gateway::{
    HttpPurchaseGateway, PurchaseFuture, PurchaseGateway, PurchaseRequestBody, PurchaseResult,
    SeatInformation,
};
pub use idempotency::{IDEMPOTENCY_HEADER, idempotency_key};
pub use reducer::CheckoutReducer;
pub use types::{CheckoutPhase, CheckoutSession, PurchaseReceipt};
