use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::analytics::PortfolioStats;
use crate::models::asset::{Asset, AssetCategory};
use crate::models::market::MarketData;
use crate::models::profile::{Session, SignUpProfile};

/// Market-data lookup for the income simulator.
///
/// Narrow contract: one call, one `MarketData`. Any failure is an error the
/// caller maps to the manual-entry path — a failed lookup must never be
/// reported as zero values.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Look up current price and yield figures for a ticker.
    async fn fetch_market_data(
        &self,
        ticker: &str,
        category: &AssetCategory,
    ) -> Result<MarketData, CoreError>;
}

/// Generative portfolio commentary.
///
/// Implementations degrade to a fixed, user-displayable message instead of
/// failing — insight text is decoration, never load-bearing.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait InsightsProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Produce a short commentary over the filtered ledger and its stats.
    async fn portfolio_insights(
        &self,
        assets: &[Asset],
        stats: &PortfolioStats,
    ) -> Result<String, CoreError>;
}

/// The hosted authentication service.
///
/// The core depends on nothing from the provider's schema beyond the
/// session's user identity and display name.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AuthProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Exchange email + password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError>;

    /// Register a new account and return its session.
    async fn sign_up(&self, profile: &SignUpProfile) -> Result<Session, CoreError>;

    /// Ask the service to email a password-reset link.
    async fn reset_password(&self, email: &str) -> Result<(), CoreError>;

    /// Invalidate the given session token.
    async fn sign_out(&self, access_token: &str) -> Result<(), CoreError>;
}
