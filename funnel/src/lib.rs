//! # Cinebook Funnel
//!
//! Client-side booking funnel for a cinema ticket API: a cascading
//! selection chain, per-cinema availability, flat pricing, a single-slot
//! order draft carried across the page boundary, and an idempotent
//! checkout that always resolves to a scannable confirmation.
//!
//! ## Flow
//!
//! 1. [`selection`] walks country → city → cinema → date → movie → hall →
//!    time → seats, resetting everything downstream of an edit;
//! 2. [`draft`] snapshots the completed selection (with its [`pricing`])
//!    into the single draft slot;
//! 3. [`checkout`] submits the draft exactly once, keyed by a
//!    deterministic idempotency key, clears the slot on success and
//!    retains it on failure.
//!
//! [`store::Store`] is the runtime gluing a reducer to its effects; see
//! [`cinebook_core`] for the reducer and effect abstractions.

pub mod availability;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod draft;
pub mod error;
pub mod pricing;
pub mod selection;
pub mod store;
pub mod types;

pub use config::FunnelConfig;
pub use error::{FunnelError, ValidationError};
pub use store::{CheckoutStore, SelectionStore, Store};
