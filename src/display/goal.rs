//! Goal display formatting

use tabled::Tabled;

use super::report::{format_bar, render_table};
use crate::models::Goal;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Due")]
    due: String,
}

pub fn format_goal_table(goals: &[Goal], currency: &str) -> String {
    if goals.is_empty() {
        return "No goals found.\n".to_string();
    }

    let rows: Vec<GoalRow> = goals
        .iter()
        .map(|g| GoalRow {
            id: g.id.to_string(),
            title: g.title.clone(),
            status: if g.is_active {
                g.tier().to_string()
            } else {
                "Paused".to_string()
            },
            progress: format!(
                "{} {:>5.1}%",
                format_bar(g.progress_percent(), 100.0, 10),
                g.progress_percent()
            ),
            saved: g.current_amount.format_with_symbol(currency),
            target: g.target_amount.format_with_symbol(currency),
            due: g
                .target_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    format!("{}\n", render_table(rows, 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalId, Money};

    #[test]
    fn test_goal_table() {
        let mut trip = Goal::new(
            GoalId::new(3),
            "Trip",
            Money::from_units(1000, 0),
            Money::from_units(750, 0),
        );
        let table = format_goal_table(std::slice::from_ref(&trip), "$");
        assert!(table.contains("goal-3"));
        assert!(table.contains("Almost there"));
        assert!(table.contains(" 75.0%"));

        trip.is_active = false;
        assert!(format_goal_table(&[trip], "$").contains("Paused"));
    }
}
