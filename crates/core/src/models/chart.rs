use serde::{Deserialize, Serialize};

/// One slice of the allocation donut.
///
/// The core computes these — the frontend just renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    /// Asset-class label
    pub label: String,

    /// Total value held in this class
    pub value: f64,
}

/// One point of the patrimony evolution area chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    /// Month label (e.g., "Jan")
    pub month: String,

    /// Portfolio value at this point
    pub value: f64,

    /// Gain/loss attributed to this month (signed)
    pub gain: f64,
}
