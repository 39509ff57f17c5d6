//! Category display formatting

use tabled::Tabled;

use super::report::render_table;
use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
}

/// Format categories as a table, income first
pub fn format_category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by_key(|c| (!c.is_income(), !c.is_expense(), c.name.to_lowercase()));

    let rows: Vec<CategoryRow> = sorted
        .into_iter()
        .map(|c| CategoryRow {
            id: c.id.to_string(),
            icon: c.icon.clone(),
            name: c.name.clone(),
            kind: c
                .kind
                .map(|k| k.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    format!("{}\n", render_table(rows, 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryKind};

    #[test]
    fn test_income_listed_first() {
        let categories = vec![
            Category::new(CategoryId::new(1), "Rent", CategoryKind::Expense),
            Category::new(CategoryId::new(2), "Salary", CategoryKind::Income),
        ];
        let table = format_category_table(&categories);

        let salary = table.find("Salary").unwrap();
        let rent = table.find("Rent").unwrap();
        assert!(salary < rent);
        assert!(table.contains("Income"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_category_table(&[]), "No categories found.\n");
    }
}
