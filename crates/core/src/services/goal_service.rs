use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::dashboard::DashboardState;
use crate::models::goal::{FinancialGoal, GoalUpdate};

/// Manages financial goals: create, patch, delete.
///
/// Pure business logic over the in-memory state — no I/O. Goals have no
/// cascading relationships, and nothing here ever advances `current_amount`
/// toward the target on its own.
pub struct GoalService;

impl GoalService {
    pub fn new() -> Self {
        Self
    }

    /// Create a goal. `current_amount` starts at 0; the new goal is
    /// prepended so the most recent goal lists first.
    pub fn add_goal(
        &self,
        state: &mut DashboardState,
        title: impl Into<String>,
        target_amount: f64,
        deadline: NaiveDate,
    ) -> Result<Uuid, CoreError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CoreError::ValidationError("Goal title must not be empty".into()));
        }
        if !target_amount.is_finite() || target_amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Goal target must be positive, got {target_amount}"
            )));
        }

        let goal = FinancialGoal {
            id: Uuid::new_v4(),
            title,
            target_amount,
            current_amount: 0.0,
            deadline,
        };
        let id = goal.id;
        state.goals.insert(0, goal);
        Ok(id)
    }

    /// Apply a partial update to an existing goal. Fields left `None` are
    /// untouched; supplied fields are validated before anything is written.
    pub fn update_goal(
        &self,
        state: &mut DashboardState,
        goal_id: Uuid,
        update: GoalUpdate,
    ) -> Result<(), CoreError> {
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(CoreError::ValidationError("Goal title must not be empty".into()));
            }
        }
        if let Some(target) = update.target_amount {
            if !target.is_finite() || target <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Goal target must be positive, got {target}"
                )));
            }
        }
        if let Some(current) = update.current_amount {
            if !current.is_finite() || current < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Saved amount must be non-negative, got {current}"
                )));
            }
        }

        let goal = state
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| CoreError::GoalNotFound(goal_id.to_string()))?;

        if let Some(title) = update.title {
            goal.title = title;
        }
        if let Some(target) = update.target_amount {
            goal.target_amount = target;
        }
        if let Some(current) = update.current_amount {
            goal.current_amount = current;
        }
        if let Some(deadline) = update.deadline {
            goal.deadline = deadline;
        }
        Ok(())
    }

    /// Delete a goal by id.
    pub fn delete_goal(&self, state: &mut DashboardState, goal_id: Uuid) -> Result<(), CoreError> {
        let idx = state
            .goals
            .iter()
            .position(|g| g.id == goal_id)
            .ok_or_else(|| CoreError::GoalNotFound(goal_id.to_string()))?;
        state.goals.remove(idx);
        Ok(())
    }
}

impl Default for GoalService {
    fn default() -> Self {
        Self::new()
    }
}
