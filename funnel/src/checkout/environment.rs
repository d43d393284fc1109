//! Injected dependencies for the checkout reducer.

use super::gateway::PurchaseGateway;
use crate::draft::DraftStore;
use std::sync::Arc;

/// Environment for the checkout reducer
///
/// The purchase gateway performs the submission; the draft store is the
/// single slot to clear on success. Both are trait objects so tests
/// substitute stubs.
#[derive(Clone)]
pub struct CheckoutEnvironment {
    gateway: Arc<dyn PurchaseGateway>,
    drafts: Arc<dyn DraftStore>,
}

impl CheckoutEnvironment {
    /// Create a new environment
    #[must_use]
    pub fn new(gateway: Arc<dyn PurchaseGateway>, drafts: Arc<dyn DraftStore>) -> Self {
        Self { gateway, drafts }
    }

    /// Shared handle to the purchase gateway
    #[must_use]
    pub fn gateway(&self) -> Arc<dyn PurchaseGateway> {
        Arc::clone(&self.gateway)
    }

    /// Shared handle to the draft slot
    #[must_use]
    pub fn drafts(&self) -> Arc<dyn DraftStore> {
        Arc::clone(&self.drafts)
    }
}
