//! Savings goal model
//!
//! Tracks a target amount and how much has been put aside so far.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings goal as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    pub title: String,

    pub target_amount: Money,

    #[serde(default)]
    pub current_amount: Money,

    #[serde(default)]
    pub target_date: Option<NaiveDate>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Goal {
    pub fn new(id: GoalId, title: impl Into<String>, target: Money, current: Money) -> Self {
        Self {
            id,
            title: title.into(),
            target_amount: target,
            current_amount: current,
            target_date: None,
            is_active: true,
        }
    }

    /// Progress toward the target as a percentage in [0, 100]
    ///
    /// A non-positive target has no meaningful ratio and counts as 0%.
    pub fn progress_percent(&self) -> f64 {
        if !self.target_amount.is_positive() {
            return 0.0;
        }

        let ratio = self.current_amount.cents() as f64 / self.target_amount.cents() as f64;
        (ratio * 100.0).clamp(0.0, 100.0)
    }

    /// Amount still missing to reach the target (never negative)
    pub fn remaining(&self) -> Money {
        (self.target_amount - self.current_amount).max(Money::zero())
    }

    pub fn is_complete(&self) -> bool {
        self.target_amount.is_positive() && self.current_amount >= self.target_amount
    }

    pub fn tier(&self) -> ProgressTier {
        ProgressTier::from_percent(self.progress_percent())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}%)", self.title, self.progress_percent())
    }
}

/// Coarse progress bands used when rendering goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTier {
    Started,
    Halfway,
    Almost,
    Complete,
}

impl ProgressTier {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 100.0 {
            Self::Complete
        } else if percent >= 75.0 {
            Self::Almost
        } else if percent >= 50.0 {
            Self::Halfway
        } else {
            Self::Started
        }
    }
}

impl fmt::Display for ProgressTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "Started"),
            Self::Halfway => write!(f, "Halfway"),
            Self::Almost => write!(f, "Almost there"),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

/// Payload for creating a goal
#[derive(Debug, Clone, Serialize)]
pub struct NewGoal {
    pub title: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub target_date: Option<NaiveDate>,
    pub is_active: bool,
}

/// Partial update for an existing goal
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: i64, current: i64) -> Goal {
        Goal::new(
            GoalId::new(1),
            "Trip",
            Money::from_units(target, 0),
            Money::from_units(current, 0),
        )
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(goal(1000, 500).progress_percent(), 50.0);
        assert_eq!(goal(1000, 2500).progress_percent(), 100.0);
        assert_eq!(goal(1000, 0).progress_percent(), 0.0);
    }

    #[test]
    fn test_non_positive_target_fails_closed() {
        assert_eq!(goal(0, 500).progress_percent(), 0.0);
        assert_eq!(goal(-10, 500).progress_percent(), 0.0);
        assert!(!goal(0, 500).is_complete());
    }

    #[test]
    fn test_remaining_never_negative() {
        assert_eq!(goal(1000, 400).remaining(), Money::from_units(600, 0));
        assert_eq!(goal(1000, 1400).remaining(), Money::zero());
    }

    #[test]
    fn test_tiers() {
        assert_eq!(goal(100, 10).tier(), ProgressTier::Started);
        assert_eq!(goal(100, 50).tier(), ProgressTier::Halfway);
        assert_eq!(goal(100, 80).tier(), ProgressTier::Almost);
        assert_eq!(goal(100, 100).tier(), ProgressTier::Complete);
    }

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": 2, "user": 1, "title": "Laptop", "target_amount": "1500.00",
            "current_amount": "300.00", "target_date": null,
            "is_active": false, "progress_percent": 20.0
        }"#;
        let g: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(g.target_amount.cents(), 150_000);
        assert!(!g.is_active);
        assert_eq!(g.progress_percent(), 20.0);
    }
}
