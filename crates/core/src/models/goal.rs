use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings target.
///
/// `current_amount` is only ever set by the user — nothing in this system
/// advances it toward the target automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    /// Unique identifier
    pub id: Uuid,

    /// What the user is saving for (e.g., "Emergency fund")
    pub title: String,

    /// Amount to reach (positive)
    pub target_amount: f64,

    /// Amount saved so far. Defaults to 0 at creation.
    pub current_amount: f64,

    /// Target date
    pub deadline: NaiveDate,
}

impl FinancialGoal {
    /// Progress toward the target, in percent.
    ///
    /// Unclamped — a goal past its target reports more than 100. Returns 0
    /// when the target is not positive (no division by zero).
    #[must_use]
    pub fn progress_pct(&self) -> f64 {
        if self.target_amount > 0.0 {
            self.current_amount / self.target_amount * 100.0
        } else {
            0.0
        }
    }
}

/// A partial update to an existing goal. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub deadline: Option<NaiveDate>,
}
