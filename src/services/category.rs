//! Category service
//!
//! Listing and creating categories, plus the "use an existing category or
//! create it" step that recording a transaction goes through.

use tracing::{debug, info};

use crate::api::{FinanceApi, RequestContext};
use crate::error::{PfError, PfResult};
use crate::models::{Category, CategoryId, CategoryKind, NewCategory};

/// Service for category management
pub struct CategoryService<'a> {
    api: &'a dyn FinanceApi,
    ctx: &'a RequestContext,
}

impl<'a> CategoryService<'a> {
    pub fn new(api: &'a dyn FinanceApi, ctx: &'a RequestContext) -> Self {
        Self { api, ctx }
    }

    /// All categories, optionally of one kind
    pub fn list(&self, kind: Option<CategoryKind>) -> PfResult<Vec<Category>> {
        let mut categories = self.api.list_categories(self.ctx)?;
        if let Some(kind) = kind {
            categories.retain(|c| c.kind == Some(kind));
        }
        Ok(categories)
    }

    /// Create a new category
    pub fn create(
        &self,
        name: &str,
        kind: CategoryKind,
        icon: Option<String>,
    ) -> PfResult<Category> {
        let payload = NewCategory::new(name, kind, icon);
        payload
            .validate()
            .map_err(|e| PfError::Validation(e.to_string()))?;

        let category = self.api.create_category(self.ctx, &payload)?;
        info!(id = %category.id, name = %category.name, kind = %kind, "Created category");
        Ok(category)
    }

    /// Reuse the category with this name and kind, or create it
    ///
    /// Names match case-insensitively after trimming.
    pub fn find_or_create(
        &self,
        name: &str,
        kind: CategoryKind,
        icon: Option<String>,
    ) -> PfResult<Category> {
        let wanted = name.trim();
        if wanted.is_empty() {
            return Err(PfError::Validation("Category name cannot be empty".into()));
        }

        let existing = self
            .list(Some(kind))?
            .into_iter()
            .find(|c| c.name.trim().eq_ignore_ascii_case(wanted));

        match existing {
            Some(category) => {
                debug!(id = %category.id, name = %category.name, "Reusing category");
                Ok(category)
            }
            None => self.create(wanted, kind, icon),
        }
    }

    /// Find a category by id ("cat-3" or "3") or by name
    pub fn find(&self, identifier: &str) -> PfResult<Option<Category>> {
        let categories = self.list(None)?;

        if let Ok(id) = CategoryId::parse(identifier) {
            if let Some(found) = categories.iter().find(|c| c.id == id) {
                return Ok(Some(found.clone()));
            }
        }

        let name = identifier.trim();
        Ok(categories
            .into_iter()
            .find(|c| c.name.trim().eq_ignore_ascii_case(name)))
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn get(&self, identifier: &str) -> PfResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| PfError::category_not_found(identifier))
    }
}
