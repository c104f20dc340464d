// ═══════════════════════════════════════════════════════════════════
// Provider Tests — MarketDataRegistry fallback, Gemini degradation,
// HostedAuthProvider configuration, mock providers
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wealth_dashboard_core::errors::CoreError;
use wealth_dashboard_core::models::asset::AssetCategory;
use wealth_dashboard_core::models::market::MarketData;
use wealth_dashboard_core::models::profile::{Session, SignUpProfile};
use wealth_dashboard_core::providers::gemini::GeminiProvider;
use wealth_dashboard_core::providers::hosted_auth::HostedAuthProvider;
use wealth_dashboard_core::providers::registry::MarketDataRegistry;
use wealth_dashboard_core::providers::traits::{AuthProvider, InsightsProvider, MarketDataProvider};
use wealth_dashboard_core::storage::local_store::{api_key_key, LocalStore};

// ═══════════════════════════════════════════════════════════════════
// Mock providers
// ═══════════════════════════════════════════════════════════════════

fn sample_data(price: f64) -> MarketData {
    MarketData {
        price,
        dividend_yield: 12.0,
        frequency: "Monthly".into(),
        sources: Vec::new(),
        is_estimated: false,
        is_tax_exempt: false,
    }
}

struct MockMarketProvider {
    name: &'static str,
    outcome: Result<MarketData, ()>,
    calls: Arc<AtomicUsize>,
}

impl MockMarketProvider {
    fn succeeding(name: &'static str, price: f64) -> Self {
        Self {
            name,
            outcome: Ok(sample_data(price)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing(name: &'static str) -> Self {
        Self {
            name,
            outcome: Err(()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch_market_data(
        &self,
        _ticker: &str,
        _category: &AssetCategory,
    ) -> Result<MarketData, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(data) => Ok(data.clone()),
            Err(()) => Err(CoreError::Api {
                provider: self.name.to_string(),
                message: "service unavailable".into(),
            }),
        }
    }
}

struct MockAuthProvider;

#[async_trait]
impl AuthProvider for MockAuthProvider {
    fn name(&self) -> &str {
        "MockAuth"
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        // Simulated network latency
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        if password == "correct-horse" {
            Ok(Session {
                user_id: "user-1".into(),
                email: email.into(),
                display_name: "Joana Silva".into(),
                access_token: "token-abc".into(),
            })
        } else {
            Err(CoreError::Auth("Invalid login credentials".into()))
        }
    }

    async fn sign_up(&self, profile: &SignUpProfile) -> Result<Session, CoreError> {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        Ok(Session {
            user_id: "user-2".into(),
            email: profile.email.clone(),
            display_name: profile.full_name(),
            access_token: "token-def".into(),
        })
    }

    async fn reset_password(&self, _email: &str) -> Result<(), CoreError> {
        Ok(())
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), CoreError> {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MarketDataRegistry
// ═══════════════════════════════════════════════════════════════════

mod registry {
    use super::*;

    #[tokio::test]
    async fn empty_registry_reports_not_configured() {
        let registry = MarketDataRegistry::new();
        assert!(!registry.has_providers());

        let err = registry.fetch("PETR4", &AssetCategory::Stocks).await.unwrap_err();
        assert!(matches!(err, CoreError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn first_success_wins() {
        let mut registry = MarketDataRegistry::new();
        let first = MockMarketProvider::succeeding("first", 38.5);
        let second_calls = Arc::new(AtomicUsize::new(0));
        let second = MockMarketProvider {
            name: "second",
            outcome: Ok(sample_data(99.0)),
            calls: Arc::clone(&second_calls),
        };
        registry.register(Box::new(first));
        registry.register(Box::new(second));

        let data = registry.fetch("PETR4", &AssetCategory::Stocks).await.unwrap();
        assert_eq!(data.price, 38.5);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falls_back_when_the_primary_fails() {
        let mut registry = MarketDataRegistry::new();
        registry.register(Box::new(MockMarketProvider::failing("primary")));
        registry.register(Box::new(MockMarketProvider::succeeding("backup", 42.0)));

        let data = registry.fetch("PETR4", &AssetCategory::Stocks).await.unwrap();
        assert_eq!(data.price, 42.0);
    }

    #[tokio::test]
    async fn surfaces_the_last_error_when_all_fail() {
        let mut registry = MarketDataRegistry::new();
        registry.register(Box::new(MockMarketProvider::failing("only")));

        let err = registry.fetch("PETR4", &AssetCategory::Stocks).await.unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
    }

    #[test]
    fn defaults_without_keys_have_no_providers() {
        let store = LocalStore::new();
        let registry = MarketDataRegistry::new_with_defaults(&store);
        assert!(!registry.has_providers());
    }

    #[test]
    fn gemini_key_enables_the_gemini_provider() {
        let mut store = LocalStore::new();
        store.set(api_key_key("gemini"), "key-123");
        let registry = MarketDataRegistry::new_with_defaults(&store);
        assert!(registry.has_providers());
        assert_eq!(registry.provider_names(), vec!["Gemini".to_string()]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  GeminiProvider degradation (no network involved)
// ═══════════════════════════════════════════════════════════════════

mod gemini {
    use super::*;
    use wealth_dashboard_core::models::analytics::PortfolioStats;

    #[tokio::test]
    async fn market_data_without_a_key_is_an_error() {
        let provider = GeminiProvider::new("");
        let err = provider
            .fetch_market_data("PETR4", &AssetCategory::Stocks)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn insights_without_a_key_degrade_to_a_message() {
        let provider = GeminiProvider::new("   ");
        let stats = PortfolioStats {
            gross_balance: 0.0,
            invested_balance: 0.0,
            total_return: 0.0,
            monthly_variation: 0.0,
        };
        let text = provider.portfolio_insights(&[], &stats).await.unwrap();
        assert!(text.contains("not configured"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  HostedAuthProvider configuration checks
// ═══════════════════════════════════════════════════════════════════

mod hosted_auth {
    use super::*;

    #[test]
    fn https_url_with_key_is_configured() {
        let provider = HostedAuthProvider::new("https://example.supabase.co", "anon-key");
        assert!(provider.is_configured());
    }

    #[test]
    fn http_url_is_not_configured() {
        let provider = HostedAuthProvider::new("http://example.supabase.co", "anon-key");
        assert!(!provider.is_configured());
    }

    #[test]
    fn placeholder_url_is_not_configured() {
        let provider = HostedAuthProvider::new("https://placeholder.supabase.co", "anon-key");
        assert!(!provider.is_configured());
    }

    #[test]
    fn empty_key_is_not_configured() {
        let provider = HostedAuthProvider::new("https://example.supabase.co", "  ");
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn unconfigured_sign_in_fails_fast() {
        let provider = HostedAuthProvider::new("", "");
        let err = provider.sign_in("a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, CoreError::NotConfigured(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Mock auth provider behavior
// ═══════════════════════════════════════════════════════════════════

mod mock_auth {
    use super::*;

    #[tokio::test]
    async fn sign_in_returns_a_session() {
        let provider = MockAuthProvider;
        let session = provider.sign_in("joana@example.com", "correct-horse").await.unwrap();
        assert_eq!(session.email, "joana@example.com");
        assert_eq!(session.display_name, "Joana Silva");
        assert!(!session.access_token.is_empty());
    }

    #[tokio::test]
    async fn bad_password_is_an_auth_error() {
        let provider = MockAuthProvider;
        let err = provider.sign_in("joana@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, CoreError::Auth(_)));
    }

    #[tokio::test]
    async fn sign_up_uses_the_full_name() {
        let provider = MockAuthProvider;
        let session = provider
            .sign_up(&SignUpProfile {
                first_name: "Joana".into(),
                last_name: "Silva".into(),
                email: "joana@example.com".into(),
                phone: "+55 11 99999-9999".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert_eq!(session.display_name, "Joana Silva");
    }
}
