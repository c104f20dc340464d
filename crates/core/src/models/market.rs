use serde::{Deserialize, Serialize};

/// Market data for one simulation run.
///
/// Produced either by the hosted market-data lookup or by direct user
/// entry; consumed once by the income simulation and then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Price per unit, in display-currency units
    pub price: f64,

    /// Annual dividend/interest yield, in percent (gross of tax)
    pub dividend_yield: f64,

    /// Payout cadence label (e.g., "Monthly", "Manual")
    pub frequency: String,

    /// Citations backing the figures, when the lookup supplied any
    pub sources: Vec<SourceCitation>,

    /// Set when the figures are fallback estimates rather than live data
    #[serde(default)]
    pub is_estimated: bool,

    /// Whether income from this asset is exempt from the flat tax
    #[serde(default)]
    pub is_tax_exempt: bool,
}

/// A source reference attached to fetched market data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    pub uri: String,
}
