use crate::models::analytics::{CategoryAllocation, PortfolioStats};
use crate::models::chart::{AllocationSlice, EvolutionPoint};

/// Month labels and (value multiplier, gain fraction) pairs for the first
/// five points of the evolution chart. The sixth point is the current gross
/// balance, with its gain taken from the monthly-variation figure.
const EVOLUTION_BASE: [(&str, f64, f64); 5] = [
    ("Jan", 0.82, 0.015),
    ("Feb", 0.85, 0.032),
    ("Mar", 0.88, 0.028),
    ("Apr", 0.87, -0.011),
    ("May", 0.94, 0.065),
];

/// Generates chart-ready series from aggregated data.
///
/// The core computes all the numbers — the frontend only renders. The
/// evolution series is a fictitious back-projection scaled from today's
/// gross balance; there is no historical record behind it.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Donut slices for the allocation breakdown, one per non-empty asset
    /// class, largest first (the grouping is already sorted).
    #[must_use]
    pub fn allocation_donut(&self, groups: &[CategoryAllocation]) -> Vec<AllocationSlice> {
        groups
            .iter()
            .map(|g| AllocationSlice {
                label: g.category.to_string(),
                value: g.value,
            })
            .collect()
    }

    /// Six monthly points ending at the current gross balance.
    /// Empty when the balance is 0 — there is nothing to project.
    #[must_use]
    pub fn evolution_series(&self, stats: &PortfolioStats) -> Vec<EvolutionPoint> {
        let base = stats.gross_balance;
        if base <= 0.0 {
            return Vec::new();
        }

        let mut points: Vec<EvolutionPoint> = EVOLUTION_BASE
            .iter()
            .map(|(month, factor, gain)| EvolutionPoint {
                month: (*month).to_string(),
                value: base * factor,
                gain: base * gain,
            })
            .collect();

        points.push(EvolutionPoint {
            month: "Jun".to_string(),
            value: base,
            gain: base * (stats.monthly_variation / 100.0),
        });

        points
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
