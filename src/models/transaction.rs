//! Transaction model
//!
//! Represents a single income or expense record. Whether it counts as income
//! or expense is decided by its category, not by the sign of the amount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// How a transaction was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    #[default]
    Cash,
    Card,
    Upi,
    #[serde(other)]
    Other,
}

impl PaymentMode {
    /// Parse a payment mode from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "card" => Some(Self::Card),
            "upi" => Some(Self::Upi),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Card => write!(f, "Card"),
            Self::Upi => write!(f, "UPI"),
            Self::Other => write!(f, "N/A"),
        }
    }
}

/// A transaction as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    pub date: NaiveDate,

    pub amount: Money,

    /// Category reference; null when the category was deleted
    #[serde(default)]
    pub category: Option<CategoryId>,

    #[serde(default)]
    pub payment_mode: PaymentMode,

    #[serde(default)]
    pub description: Option<String>,

    /// Read-only name the API denormalizes for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        date: NaiveDate,
        amount: Money,
        category: Option<CategoryId>,
    ) -> Self {
        Self {
            id,
            date,
            amount,
            category,
            payment_mode: PaymentMode::default(),
            description: None,
            category_name: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.amount, self.description_or_empty())
    }
}

/// Payload for creating a transaction
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    pub category: CategoryId,
    pub amount: Money,
    pub payment_mode: PaymentMode,
    pub description: String,
    pub date: NaiveDate,
}

/// Partial update for an existing transaction
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.date.is_none() && self.description.is_none()
    }
}
