use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::analytics::PortfolioStats;
use crate::models::asset::{Asset, AssetCategory};
use crate::models::market::MarketData;

use super::traits::{InsightsProvider, MarketDataProvider};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-3-flash-preview";

/// Gemini provider: market-data lookups and portfolio commentary via the
/// hosted generative-language API.
///
/// Both features are thin calls with hardcoded fallbacks. A market-data
/// reply the model formats badly degrades to a flagged estimate; an insights
/// failure degrades to a fixed message. Neither ever takes the UI down.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key: api_key.into(),
        }
    }

    async fn generate(&self, prompt: String, temperature: Option<f64>) -> Result<String, CoreError> {
        if self.api_key.trim().is_empty() {
            return Err(CoreError::NotConfigured("Gemini API key".into()));
        }

        let url = format!("{BASE_URL}/models/{MODEL}:generateContent?key={}", self.api_key);

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: temperature.map(|t| GenerationConfig { temperature: t }),
        };

        let resp: GenerateResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| CoreError::Api {
                provider: "Gemini".into(),
                message: e.status().map(|s| s.to_string()).unwrap_or_else(|| "request failed".into()),
            })?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Gemini".into(),
                message: format!("Failed to parse response: {e}"),
            })?;

        resp.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| CoreError::Api {
                provider: "Gemini".into(),
                message: "Empty completion".into(),
            })
    }

    /// Fallback estimate used when the model reply cannot be parsed into
    /// figures. Keeps the simulator usable; flagged as estimated.
    fn estimated_market_data(ticker: &str) -> MarketData {
        MarketData {
            price: if ticker.contains("PETR") { 38.50 } else { 100.0 },
            dividend_yield: 11.2,
            frequency: "Monthly".to_string(),
            sources: Vec::new(),
            is_estimated: true,
            is_tax_exempt: false,
        }
    }
}

// ── Gemini API request/response types ───────────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn fetch_market_data(
        &self,
        ticker: &str,
        category: &AssetCategory,
    ) -> Result<MarketData, CoreError> {
        let ticker = ticker.to_uppercase();
        let prompt = format!(
            "Return current market data for the {category} asset {ticker}.\n\
             Answer with exactly two lines, nothing else:\n\
             price: <number>\n\
             dividend_yield: <annual percent number>"
        );

        let reply = self.generate(prompt, Some(0.2)).await?;

        Ok(parse_market_reply(&reply).unwrap_or_else(|| Self::estimated_market_data(&ticker)))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl InsightsProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn portfolio_insights(
        &self,
        assets: &[Asset],
        stats: &PortfolioStats,
    ) -> Result<String, CoreError> {
        if self.api_key.trim().is_empty() {
            return Ok("Generative insights are not configured — set an API key in settings.".into());
        }

        let listing = assets
            .iter()
            .map(|a| format!("{} ({}): {:.2}", a.name, a.ticker, a.value))
            .collect::<Vec<_>>()
            .join(", ");

        let prompt = format!(
            "Analyze this investment portfolio:\n\
             Gross balance: {:.2}\n\
             Invested: {:.2}\n\
             Monthly variation: {}%\n\
             Assets: {listing}\n\n\
             Give a concise, strategic summary.",
            stats.gross_balance, stats.invested_balance, stats.monthly_variation,
        );

        match self.generate(prompt, None).await {
            Ok(text) if !text.trim().is_empty() => Ok(text),
            _ => Ok("Could not generate insights right now. Check your API key and try again.".into()),
        }
    }
}

/// Extract `price:` and `dividend_yield:` figures from a model reply.
/// Returns `None` unless both are present and numeric.
fn parse_market_reply(reply: &str) -> Option<MarketData> {
    let mut price = None;
    let mut dividend_yield = None;

    for line in reply.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let number = parse_figure(value);
        if key.contains("price") {
            price = price.or(number);
        } else if key.contains("yield") {
            dividend_yield = dividend_yield.or(number);
        }
    }

    Some(MarketData {
        price: price?,
        dividend_yield: dividend_yield?,
        frequency: "Monthly".to_string(),
        sources: Vec::new(),
        is_estimated: false,
        is_tax_exempt: false,
    })
}

/// Parse the first numeric token out of a reply fragment, tolerating
/// currency symbols and a trailing percent sign.
fn parse_figure(fragment: &str) -> Option<f64> {
    let cleaned: String = fragment
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
