use std::sync::Arc;

use super::{audit, validate_max_len, validate_required};
use crate::auth::{authorize, AuthUser, Role};
use crate::error::{ApiError, ApiResult};
use crate::models::{IngredientUnit, RecipeCategory};
use crate::store::Store;

/// Recipe categories and ingredient units: reference data managed by admins.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<Store>,
}

impl CatalogService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn list_categories(&self) -> ApiResult<Vec<RecipeCategory>> {
        Ok(self.store.list_categories().await?)
    }

    pub async fn add_category(&self, actor: &AuthUser, name: &str) -> ApiResult<i32> {
        authorize(actor, None, Role::Admin)?;
        validate_required("Name", name)?;
        validate_max_len("Name", name, 50)?;
        let id = self.store.insert_category(name).await?;
        audit(&self.store, "Categories.Add", actor).await;
        Ok(id)
    }

    pub async fn delete_category(&self, actor: &AuthUser, category_id: i32) -> ApiResult<()> {
        authorize(actor, None, Role::Admin)?;
        let deleted = self.store.delete_category(category_id).await?;
        if deleted == 0 {
            return Err(ApiError::NotFound(format!(
                "Category {} does not exist",
                category_id
            )));
        }
        audit(&self.store, "Categories.Delete", actor).await;
        Ok(())
    }

    pub async fn list_units(&self) -> ApiResult<Vec<IngredientUnit>> {
        Ok(self.store.list_units().await?)
    }

    pub async fn add_unit(&self, actor: &AuthUser, name: &str) -> ApiResult<i32> {
        authorize(actor, None, Role::Admin)?;
        validate_required("Name", name)?;
        validate_max_len("Name", name, 20)?;
        let id = self.store.insert_unit(name).await?;
        audit(&self.store, "Units.Add", actor).await;
        Ok(id)
    }

    pub async fn delete_unit(&self, actor: &AuthUser, unit_id: i32) -> ApiResult<()> {
        authorize(actor, None, Role::Admin)?;
        let deleted = self.store.delete_unit(unit_id).await?;
        if deleted == 0 {
            return Err(ApiError::NotFound(format!(
                "Ingredient unit {} does not exist",
                unit_id
            )));
        }
        audit(&self.store, "Units.Delete", actor).await;
        Ok(())
    }
}
