use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// The asset class of a holding.
///
/// This is a closed set: allocation grouping iterates over exactly these
/// five classes, in this order, and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    /// Listed equities, national or foreign
    Stocks,
    /// Bonds, CDs, treasury paper
    FixedIncome,
    /// Real-estate investment funds
    Reits,
    /// Uninvested account balance
    Cash,
    /// Crypto assets
    Crypto,
}

impl AssetCategory {
    /// Every category, in the fixed display order.
    pub const ALL: [AssetCategory; 5] = [
        AssetCategory::Stocks,
        AssetCategory::FixedIncome,
        AssetCategory::Reits,
        AssetCategory::Cash,
        AssetCategory::Crypto,
    ];
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetCategory::Stocks => write!(f, "Stocks"),
            AssetCategory::FixedIncome => write!(f, "Fixed Income"),
            AssetCategory::Reits => write!(f, "REITs"),
            AssetCategory::Cash => write!(f, "Cash"),
            AssetCategory::Crypto => write!(f, "Crypto"),
        }
    }
}

/// One holding in the ledger.
///
/// `return_percentage` is the figure reported by the owning institution and
/// is authoritative for display; `computed_return_pct()` recomputes it from
/// value/invested when a derived figure is wanted instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique identifier
    pub id: Uuid,

    /// Human-readable name (e.g., "Apple Inc.")
    pub name: String,

    /// Ticker symbol, uppercased (e.g., "AAPL", "PETR4")
    pub ticker: String,

    /// Asset class (closed set)
    pub category: AssetCategory,

    /// Free-text sub-classification (e.g., "US Equities", "Government Bonds")
    pub subcategory: String,

    /// Current market value, in display-currency units
    pub value: f64,

    /// Amount originally invested
    pub invested: f64,

    /// Return figure reported by the institution, in percent (signed)
    pub return_percentage: f64,

    /// The institution holding this asset
    pub institution_id: Uuid,

    /// Whether the holding is domiciled outside the home jurisdiction
    pub is_global: bool,
}

impl Asset {
    /// Create a new asset. Value and invested amount must be non-negative.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        ticker: impl Into<String>,
        category: AssetCategory,
        subcategory: impl Into<String>,
        value: f64,
        invested: f64,
        return_percentage: f64,
        institution_id: Uuid,
        is_global: bool,
    ) -> Result<Self, CoreError> {
        if value < 0.0 || !value.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Asset value must be non-negative and finite, got {value}"
            )));
        }
        if invested < 0.0 || !invested.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Invested amount must be non-negative and finite, got {invested}"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            ticker: ticker.into().to_uppercase(),
            category,
            subcategory: subcategory.into(),
            value,
            invested,
            return_percentage,
            institution_id,
            is_global,
        })
    }

    /// Recompute the return from value and invested amount.
    /// Returns 0 when nothing was invested (no division by zero).
    #[must_use]
    pub fn computed_return_pct(&self) -> f64 {
        if self.invested > 0.0 {
            (self.value - self.invested) / self.invested * 100.0
        } else {
            0.0
        }
    }
}
