//! Category model
//!
//! Categories are typed tags (income or expense) that partition transactions.
//! The API allows a null type; such categories belong to neither side.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Icon the API assigns when none is given
pub const DEFAULT_CATEGORY_ICON: &str = "💼";

/// Which side of the ledger a category sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    /// Any type string the client does not know; excluded from both sides
    #[serde(other)]
    Other,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A category as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    /// Income or expense; `None` when the API stores a null type
    #[serde(rename = "type", default)]
    pub kind: Option<CategoryKind>,

    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    DEFAULT_CATEGORY_ICON.to_string()
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind: Some(kind),
            icon: default_icon(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == Some(CategoryKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == Some(CategoryKind::Expense)
    }

    /// Find a category by id in a slice
    pub fn find_by_id(categories: &[Category], id: CategoryId) -> Option<&Category> {
        categories.iter().find(|c| c.id == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

/// Payload for creating a category
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub icon: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, kind: CategoryKind, icon: Option<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            kind,
            icon: icon
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(default_icon),
        }
    }

    /// Validate the payload
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 100 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        if self.kind == CategoryKind::Other {
            return Err(CategoryValidationError::UnsupportedKind);
        }

        Ok(())
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    UnsupportedKind,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 100)", len)
            }
            Self::UnsupportedKind => write!(f, "Category type must be income or expense"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{"id": 3, "user": 1, "name": "Food", "type": "expense", "icon": "🍔"}"#;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert_eq!(cat.id, CategoryId::new(3));
        assert!(cat.is_expense());
        assert_eq!(cat.icon, "🍔");
    }

    #[test]
    fn test_null_and_unknown_types() {
        let null_type: Category =
            serde_json::from_str(r#"{"id": 1, "name": "Misc", "type": null}"#).unwrap();
        assert_eq!(null_type.kind, None);
        assert_eq!(null_type.icon, DEFAULT_CATEGORY_ICON);

        let odd: Category =
            serde_json::from_str(r#"{"id": 2, "name": "Move", "type": "transfer"}"#).unwrap();
        assert_eq!(odd.kind, Some(CategoryKind::Other));
        assert!(!odd.is_income() && !odd.is_expense());
    }

    #[test]
    fn test_new_category_validation() {
        assert!(NewCategory::new("Salary", CategoryKind::Income, None)
            .validate()
            .is_ok());
        assert_eq!(
            NewCategory::new("   ", CategoryKind::Expense, None).validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert_eq!(
            NewCategory::new("X", CategoryKind::Other, None).validate(),
            Err(CategoryValidationError::UnsupportedKind)
        );
    }

    #[test]
    fn test_new_category_payload_shape() {
        let payload = NewCategory::new(" Food ", CategoryKind::Expense, Some("🍔".into()));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["name"], "Food");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["icon"], "🍔");
    }
}
