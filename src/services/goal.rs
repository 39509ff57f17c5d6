//! Goal service

use chrono::NaiveDate;
use tracing::info;

use crate::api::{FinanceApi, RequestContext};
use crate::error::{PfError, PfResult};
use crate::models::{Goal, GoalId, GoalUpdate, Money, NewGoal};

/// Service for savings goals
pub struct GoalService<'a> {
    api: &'a dyn FinanceApi,
    ctx: &'a RequestContext,
}

impl<'a> GoalService<'a> {
    pub fn new(api: &'a dyn FinanceApi, ctx: &'a RequestContext) -> Self {
        Self { api, ctx }
    }

    /// All goals; `active_only` hides paused ones
    pub fn list(&self, active_only: bool) -> PfResult<Vec<Goal>> {
        let mut goals = self.api.list_goals(self.ctx)?;
        if active_only {
            goals.retain(|g| g.is_active);
        }
        Ok(goals)
    }

    pub fn get(&self, id: GoalId) -> PfResult<Goal> {
        self.api
            .list_goals(self.ctx)?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| PfError::goal_not_found(id.to_string()))
    }

    /// Create a new goal
    pub fn create(
        &self,
        title: &str,
        target: Money,
        current: Money,
        target_date: Option<NaiveDate>,
    ) -> PfResult<Goal> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PfError::Validation("Goal title cannot be empty".into()));
        }
        if !target.is_positive() {
            return Err(PfError::Validation(
                "Goal target must be greater than zero".into(),
            ));
        }
        if current.is_negative() {
            return Err(PfError::Validation(
                "Goal progress cannot be negative".into(),
            ));
        }

        let payload = NewGoal {
            title: title.to_string(),
            target_amount: target,
            current_amount: current,
            target_date,
            is_active: true,
        };
        let goal = self.api.create_goal(self.ctx, &payload)?;
        info!(id = %goal.id, title = %goal.title, "Created goal");
        Ok(goal)
    }

    /// Add `amount` to the goal's saved total
    pub fn contribute(&self, id: GoalId, amount: Money) -> PfResult<Goal> {
        if !amount.is_positive() {
            return Err(PfError::Validation(
                "Contribution must be greater than zero".into(),
            ));
        }

        let goal = self.get(id)?;
        let update = GoalUpdate {
            current_amount: Some(goal.current_amount + amount),
            ..GoalUpdate::default()
        };
        let updated = self.api.update_goal(self.ctx, id, &update)?;
        info!(
            id = %updated.id,
            amount = %amount,
            progress = updated.progress_percent(),
            "Recorded contribution"
        );
        Ok(updated)
    }

    /// Pause an active goal or resume a paused one
    pub fn toggle_active(&self, id: GoalId) -> PfResult<Goal> {
        let goal = self.get(id)?;
        let update = GoalUpdate {
            is_active: Some(!goal.is_active),
            ..GoalUpdate::default()
        };
        let updated = self.api.update_goal(self.ctx, id, &update)?;
        info!(id = %updated.id, active = updated.is_active, "Toggled goal");
        Ok(updated)
    }
}
