use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetCategory};

/// Summary statistics over the context-filtered ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    /// Total current value (sum of asset values)
    pub gross_balance: f64,

    /// Total amount invested (sum of invested amounts)
    pub invested_balance: f64,

    /// Overall return in percent: (gross - invested) / invested × 100,
    /// or 0 when nothing is invested
    pub total_return: f64,

    /// Month-over-month variation in percent. A fixed figure in this
    /// implementation — not derived from any historical series.
    pub monthly_variation: f64,
}

/// One asset-class row of the allocation breakdown.
///
/// Classes with no member assets are never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    /// The asset class
    pub category: AssetCategory,

    /// Total value held in this class
    pub value: f64,

    /// Share of the grand total, in percent (0 when the total is 0)
    pub percentage: f64,

    /// Per-subcategory rows, sorted descending by value
    pub subcategories: Vec<SubcategoryAllocation>,
}

/// One subcategory row within an asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryAllocation {
    /// The free-text subcategory label
    pub name: String,

    /// Total value held in this subcategory
    pub value: f64,

    /// Share of the grand total (not of the class subtotal), in percent
    pub percentage: f64,

    /// The member assets
    pub assets: Vec<Asset>,
}
