//! Injected dependencies for the selection reducer.

use crate::catalog::CatalogApi;
use cinebook_core::environment::Clock;
use std::sync::Arc;

/// Environment for the selection reducer
///
/// Carries the availability source and the clock. The clock supplies
/// "today" for date filtering; tests pin it with a fixed clock.
#[derive(Clone)]
pub struct SelectionEnvironment {
    catalog: Arc<dyn CatalogApi>,
    clock: Arc<dyn Clock>,
}

impl SelectionEnvironment {
    /// Create a new environment
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogApi>, clock: Arc<dyn Clock>) -> Self {
        Self { catalog, clock }
    }

    /// Shared handle to the catalog, for use inside effect futures
    #[must_use]
    pub fn catalog(&self) -> Arc<dyn CatalogApi> {
        Arc::clone(&self.catalog)
    }

    /// Clock for date filtering
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
