use crate::errors::CoreError;
use crate::models::asset::AssetCategory;
use crate::models::market::MarketData;
use crate::storage::local_store::{api_key_key, LocalStore};

use super::gemini::GeminiProvider;
use super::traits::MarketDataProvider;

/// Registry of market-data providers.
///
/// Providers are tried in registration order; the first success wins. The
/// facade rebuilds the registry whenever an API key changes, so new keys
/// take effect immediately.
pub struct MarketDataRegistry {
    providers: Vec<Box<dyn MarketDataProvider>>,
}

impl MarketDataRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with every provider the stored keys allow.
    pub fn new_with_defaults(store: &LocalStore) -> Self {
        let mut registry = Self::new();

        // Gemini — the hosted generative lookup, requires an API key
        if let Some(key) = store.get(&api_key_key("gemini")) {
            registry.register(Box::new(GeminiProvider::new(key)));
        }

        registry
    }

    /// Register a provider at the end of the fallback order.
    pub fn register(&mut self, provider: Box<dyn MarketDataProvider>) {
        self.providers.push(provider);
    }

    /// Whether any provider is available.
    #[must_use]
    pub fn has_providers(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Names of the registered providers, in fallback order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Fetch market data, falling back through providers in order.
    ///
    /// Returns the last provider's error when all fail, or `NotConfigured`
    /// when none are registered. Callers route every error to the
    /// manual-entry path.
    pub async fn fetch(
        &self,
        ticker: &str,
        category: &AssetCategory,
    ) -> Result<MarketData, CoreError> {
        if self.providers.is_empty() {
            return Err(CoreError::NotConfigured("Market data provider".into()));
        }

        let mut last_error = None;
        for provider in &self.providers {
            match provider.fetch_market_data(ticker, category).await {
                Ok(data) => return Ok(data),
                Err(e) => {
                    last_error = Some(e);
                    // Try next provider
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::MarketDataUnavailable {
            ticker: ticker.to_string(),
        }))
    }
}

impl Default for MarketDataRegistry {
    fn default() -> Self {
        Self::new()
    }
}
