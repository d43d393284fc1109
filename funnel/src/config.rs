//! Configuration management for the booking funnel.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::Currency;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Funnel configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelConfig {
    /// Catalog and purchase API configuration
    pub api: ApiConfig,
    /// Ticket pricing configuration
    pub pricing: PricingConfig,
    /// Draft slot configuration
    pub draft: DraftConfig,
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the booking API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Page size for paginated list endpoints
    pub page_size: u32,
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Ticket pricing configuration
///
/// Pricing is flat per seat; the unit price and currency are deployment
/// settings, not catalog data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Price of one seat, in minor units (cents)
    pub unit_price_cents: u64,
    /// Currency the prices are denominated in
    pub currency: Currency,
}

/// Draft slot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Path of the file-backed draft slot
    pub slot_path: PathBuf,
}

impl FunnelConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig {
                base_url: env::var("CINEBOOK_API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
                timeout: env::var("CINEBOOK_API_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
                page_size: env::var("CINEBOOK_API_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(50),
            },
            pricing: PricingConfig {
                unit_price_cents: env::var("CINEBOOK_UNIT_PRICE_CENTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(999),
                currency: env::var("CINEBOOK_CURRENCY")
                    .ok()
                    .map_or(Currency::Usd, |s| Currency::from_code(&s)),
            },
            draft: DraftConfig {
                slot_path: env::var("CINEBOOK_DRAFT_SLOT")
                    .map_or_else(|_| PathBuf::from("order-draft.json"), PathBuf::from),
            },
        }
    }
}
