use crate::models::analytics::PortfolioStats;
use crate::models::asset::Asset;

/// Month-over-month variation reported on the dashboard, in percent.
/// A fixed figure: no historical series exists to derive it from. The
/// evolution chart synthesizes its final data point from this value.
pub const MONTHLY_VARIATION_PCT: f64 = 2.45;

/// Reduces a (context-filtered) ledger to summary statistics.
///
/// Pure business logic — no I/O. Always returns a complete result; every
/// field defaults to 0 on an empty list.
pub struct StatsService;

impl StatsService {
    pub fn new() -> Self {
        Self
    }

    /// Compute summary statistics over `assets`.
    ///
    /// `total_return` is guarded: when nothing is invested it reports 0
    /// instead of dividing by zero. An empty list yields an all-zero result.
    #[must_use]
    pub fn compute(&self, assets: &[&Asset]) -> PortfolioStats {
        if assets.is_empty() {
            return PortfolioStats {
                gross_balance: 0.0,
                invested_balance: 0.0,
                total_return: 0.0,
                monthly_variation: 0.0,
            };
        }

        let gross_balance: f64 = assets.iter().map(|a| a.value).sum();
        let invested_balance: f64 = assets.iter().map(|a| a.invested).sum();

        let total_return = if invested_balance > 0.0 {
            (gross_balance - invested_balance) / invested_balance * 100.0
        } else {
            0.0
        };

        PortfolioStats {
            gross_balance,
            invested_balance,
            total_return,
            monthly_variation: MONTHLY_VARIATION_PCT,
        }
    }
}

impl Default for StatsService {
    fn default() -> Self {
        Self::new()
    }
}
