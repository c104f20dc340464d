use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::asset::AssetCategory;
use crate::models::market::MarketData;

/// Flat tax rate applied to non-exempt investment income.
/// A deliberate simplification of the tiered real-world table.
pub const FLAT_TAX_RATE: f64 = 0.15;

/// The five inputs of one income projection. Both input modes (automatic
/// lookup and manual entry) converge on this shape before any arithmetic
/// runs — the calculator never knows where the numbers came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationInput {
    /// Desired net monthly income, in display-currency units
    pub monthly_target_income: f64,
    /// Price per unit of the asset
    pub price: f64,
    /// Gross annual dividend/interest yield, in percent
    pub dividend_yield_pct: f64,
    /// Whether income from this asset is tax-exempt
    pub is_tax_exempt: bool,
    /// Current value held in this asset
    pub current_holding_value: f64,
}

/// Result of one income projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeProjection {
    /// Capital needed to produce the target income at the net yield
    pub required_capital: f64,

    /// Whole units of the asset covering `required_capital`. 0 when the
    /// unit price is at or below one currency unit (not meaningfully
    /// quotable in discrete units).
    pub required_units: u64,

    /// How much capital is still missing: max(0, required − held)
    pub gap: f64,

    /// Annual yield after tax, in percent
    pub net_annual_yield_pct: f64,

    /// Monthly yield after tax, in percent
    pub monthly_yield_pct: f64,

    /// Percentage points of yield lost to tax
    pub tax_deduction_pct: f64,
}

/// Computes how much capital, in a given asset, is needed to generate a
/// target net monthly income.
///
/// Pure function of its input — no side effects, no I/O.
pub struct IncomeSimulator;

impl IncomeSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Run the projection.
    ///
    /// Returns `None` when the net annual yield is zero or negative: the
    /// calculation is undefined there, and no NaN or infinity may escape
    /// into the UI.
    #[must_use]
    pub fn project(&self, input: &SimulationInput) -> Option<IncomeProjection> {
        let tax_rate = if input.is_tax_exempt { 0.0 } else { FLAT_TAX_RATE };
        let net_annual_yield = input.dividend_yield_pct / 100.0 * (1.0 - tax_rate);

        if net_annual_yield <= 0.0 {
            return None;
        }

        let annual_target = input.monthly_target_income * 12.0;
        let required_capital = annual_target / net_annual_yield;

        let required_units = if input.price > 1.0 {
            (required_capital / input.price).ceil() as u64
        } else {
            0
        };

        Some(IncomeProjection {
            required_capital,
            required_units,
            gap: (required_capital - input.current_holding_value).max(0.0),
            net_annual_yield_pct: net_annual_yield * 100.0,
            monthly_yield_pct: net_annual_yield / 12.0 * 100.0,
            tax_deduction_pct: input.dividend_yield_pct * tax_rate,
        })
    }
}

impl Default for IncomeSimulator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Simulation modal flow ───────────────────────────────────────────

/// Where the simulation modal currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Waiting for a target income to be submitted
    AwaitingTarget,
    /// Market-data fetch in flight
    Loading,
    /// Market data present, projection available
    Result,
    /// User is entering price/yield by hand
    ManualEntry,
    /// The fetch failed; user may retry or switch to manual entry
    Error,
}

/// The state machine behind one simulation modal instance.
///
/// Transitions:
/// AwaitingTarget → Loading (target submitted),
/// Loading → Result | Error (fetch outcome),
/// Error → Loading (retry) | ManualEntry (manual configuration),
/// ManualEntry → Result (price + yield submitted),
/// Result → ManualEntry (adjust rates; discards fetched data).
///
/// The `Loading` state refuses re-submission — one in-flight request per
/// modal, with no cancellation. Nothing here persists past the modal except
/// the cached target income, which the facade keeps per ticker.
#[derive(Debug, Clone)]
pub struct SimulationFlow {
    ticker: String,
    category: AssetCategory,
    current_holding_value: f64,
    state: SimulationState,
    target_income: Option<f64>,
    market_data: Option<MarketData>,
    error: Option<String>,
}

impl SimulationFlow {
    /// Open a flow for one asset.
    #[must_use]
    pub fn new(ticker: impl Into<String>, category: AssetCategory, current_holding_value: f64) -> Self {
        Self {
            ticker: ticker.into().to_uppercase(),
            category,
            current_holding_value,
            state: SimulationState::AwaitingTarget,
            target_income: None,
            market_data: None,
            error: None,
        }
    }

    /// Prefill the target-income field (from the per-ticker cache) without
    /// submitting it.
    pub fn prefill_target(&mut self, income: f64) {
        if self.state == SimulationState::AwaitingTarget && income.is_finite() && income > 0.0 {
            self.target_income = Some(income);
        }
    }

    #[must_use]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    #[must_use]
    pub fn category(&self) -> AssetCategory {
        self.category
    }

    #[must_use]
    pub fn target_income(&self) -> Option<f64> {
        self.target_income
    }

    #[must_use]
    pub fn market_data(&self) -> Option<&MarketData> {
        self.market_data.as_ref()
    }

    /// The user-visible failure message, present only in the `Error` state.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit a target income and move to `Loading`.
    ///
    /// Valid from `AwaitingTarget` and from `Error` (retry). A fetch already
    /// in flight refuses the submission.
    pub fn submit_target(&mut self, income: f64) -> Result<(), CoreError> {
        if self.state == SimulationState::Loading {
            return Err(CoreError::RequestInFlight);
        }
        if !matches!(self.state, SimulationState::AwaitingTarget | SimulationState::Error) {
            return Err(CoreError::ValidationError(
                "A target income can only be submitted before market data is set".into(),
            ));
        }
        if !income.is_finite() || income <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Target income must be a positive amount, got {income}"
            )));
        }

        self.target_income = Some(income);
        self.error = None;
        self.state = SimulationState::Loading;
        Ok(())
    }

    /// Report the outcome of the market-data fetch started by
    /// `submit_target`. Success lands in `Result`; any failure lands in
    /// `Error` with a message offering the manual path.
    pub fn complete_fetch(&mut self, outcome: Result<MarketData, CoreError>) -> Result<(), CoreError> {
        if self.state != SimulationState::Loading {
            return Err(CoreError::ValidationError(
                "No market-data fetch is in flight".into(),
            ));
        }

        match outcome {
            Ok(data) => {
                self.market_data = Some(data);
                self.error = None;
                self.state = SimulationState::Result;
            }
            Err(e) => {
                self.market_data = None;
                self.error = Some(format!(
                    "Could not load live market data ({e}). Retry, or enter the figures manually."
                ));
                self.state = SimulationState::Error;
            }
        }
        Ok(())
    }

    /// Switch to manual entry. Valid from `Error` (after a failed fetch) and
    /// from `Result` ("adjust rates"), where it discards the fetched data.
    pub fn enter_manual(&mut self) -> Result<(), CoreError> {
        match self.state {
            SimulationState::Error | SimulationState::Result => {
                self.market_data = None;
                self.error = None;
                self.state = SimulationState::ManualEntry;
                Ok(())
            }
            _ => Err(CoreError::ValidationError(
                "Manual entry is only reachable after a fetch outcome".into(),
            )),
        }
    }

    /// Submit manually entered price and gross annual yield.
    ///
    /// Accepts comma or dot decimal separators. Tax exemption is derived
    /// from the ticker (LCI/LCA paper is exempt).
    pub fn submit_manual(&mut self, price_input: &str, yield_input: &str) -> Result<(), CoreError> {
        if self.state != SimulationState::ManualEntry {
            return Err(CoreError::ValidationError(
                "Not in manual entry".into(),
            ));
        }

        let price = parse_decimal_input(price_input).ok_or_else(|| {
            CoreError::ValidationError(format!("Invalid price: '{price_input}'"))
        })?;
        let dividend_yield = parse_decimal_input(yield_input).ok_or_else(|| {
            CoreError::ValidationError(format!("Invalid yield: '{yield_input}'"))
        })?;

        let lowered = self.ticker.to_lowercase();
        self.market_data = Some(MarketData {
            price,
            dividend_yield,
            frequency: "Manual".to_string(),
            sources: Vec::new(),
            is_estimated: false,
            is_tax_exempt: lowered.contains("lci") || lowered.contains("lca"),
        });
        self.error = None;
        self.state = SimulationState::Result;
        Ok(())
    }

    /// The projection for the current state, when one is defined.
    ///
    /// Present only in `Result`, and `None` even there when the net yield
    /// is not positive.
    #[must_use]
    pub fn projection(&self) -> Option<IncomeProjection> {
        if self.state != SimulationState::Result {
            return None;
        }
        let data = self.market_data.as_ref()?;
        let target = self.target_income?;

        IncomeSimulator::new().project(&SimulationInput {
            monthly_target_income: target,
            price: data.price,
            dividend_yield_pct: data.dividend_yield,
            is_tax_exempt: data.is_tax_exempt,
            current_holding_value: self.current_holding_value,
        })
    }
}

/// Parse a user-entered decimal, accepting `,` as the decimal separator.
/// Returns `None` for empty or non-numeric input.
#[must_use]
pub fn parse_decimal_input(input: &str) -> Option<f64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
