//! Goal progress report

use chrono::NaiveDate;
use serde::Serialize;

use super::health::goal_progress;
use crate::display::report::format_bar;
use crate::models::{Goal, GoalId, Money, ProgressTier};

/// Progress details for one goal
#[derive(Debug, Clone, Serialize)]
pub struct GoalProgressRow {
    pub id: GoalId,
    pub title: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub remaining: Money,
    pub progress_percent: f64,
    pub tier: ProgressTier,
    pub target_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl From<&Goal> for GoalProgressRow {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id,
            title: goal.title.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            remaining: goal.remaining(),
            progress_percent: goal.progress_percent(),
            tier: goal.tier(),
            target_date: goal.target_date,
            is_active: goal.is_active,
        }
    }
}

/// All goals with their progress, plus the overall mean
#[derive(Debug, Clone, Serialize)]
pub struct GoalsReport {
    pub goals: Vec<GoalProgressRow>,
    pub average_progress: f64,
    pub completed: usize,
}

impl GoalsReport {
    pub fn generate(goals: &[Goal]) -> Self {
        Self {
            goals: goals.iter().map(GoalProgressRow::from).collect(),
            average_progress: goal_progress(goals),
            completed: goals.iter().filter(|g| g.is_complete()).count(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Goals: {} of {} complete, average progress {:.1}%\n",
            self.completed,
            self.goals.len(),
            self.average_progress
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.goals.is_empty() {
            output.push_str("No goals yet.\n");
        }

        for row in &self.goals {
            let status = if row.is_active { "" } else { " (paused)" };
            output.push_str(&format!("{} {}{}\n", row.id, row.title, status));
            output.push_str(&format!(
                "  {} {:>5.1}%  {}\n",
                format_bar(row.progress_percent, 100.0, 30),
                row.progress_percent,
                row.tier
            ));
            output.push_str(&format!(
                "  {} of {}, {} to go",
                row.current_amount.format_with_symbol(currency),
                row.target_amount.format_with_symbol(currency),
                row.remaining.format_with_symbol(currency)
            ));
            if let Some(date) = row.target_date {
                output.push_str(&format!(", by {}", date));
            }
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: i64, target: i64, current: i64) -> Goal {
        Goal::new(
            GoalId::new(id),
            format!("Goal {}", id),
            Money::from_units(target, 0),
            Money::from_units(current, 0),
        )
    }

    #[test]
    fn test_generate() {
        let goals = vec![goal(1, 1000, 500), goal(2, 200, 250), goal(3, 0, 10)];
        let report = GoalsReport::generate(&goals);

        assert_eq!(report.goals.len(), 3);
        assert_eq!(report.completed, 1);
        assert_eq!(report.average_progress, 50.0);
        assert_eq!(report.goals[0].tier, ProgressTier::Halfway);
        assert_eq!(report.goals[0].remaining, Money::from_units(500, 0));
        assert_eq!(report.goals[1].remaining, Money::zero());
        assert_eq!(report.goals[2].progress_percent, 0.0);
    }

    #[test]
    fn test_format_terminal() {
        let mut paused = goal(1, 1000, 800);
        paused.is_active = false;
        let report = GoalsReport::generate(&[paused]);
        let text = report.format_terminal("$");

        assert!(text.contains("Goal 1 (paused)"));
        assert!(text.contains("Almost there"));
        assert!(text.contains("$200.00 to go"));
    }
}
