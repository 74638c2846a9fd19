use std::sync::Arc;

use super::{audit, validate_max_len, validate_required};
use crate::auth::{authorize, AuthUser, Role};
use crate::error::{ApiError, ApiResult};
use crate::models::{IngredientLine, RecipeDetails, RecipeSummary};
use crate::store::{NewIngredientLine, Store};

pub struct NewRecipe {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<Vec<u8>>,
    pub category_id: i32,
    pub ingredients: Vec<NewIngredientLine>,
}

/// A recipe with its ingredient lines resolved.
pub struct RecipeView {
    pub details: RecipeDetails,
    pub ingredients: Vec<IngredientLine>,
}

#[derive(Clone)]
pub struct RecipeService {
    store: Arc<Store>,
}

impl RecipeService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn add(&self, actor: &AuthUser, recipe: NewRecipe) -> ApiResult<i32> {
        authorize(actor, None, Role::User)?;
        validate_required("Name", &recipe.name)?;
        validate_max_len("Name", &recipe.name, 50)?;
        if !self.store.category_exists(recipe.category_id).await? {
            return Err(ApiError::NotFound(format!(
                "Category {} does not exist",
                recipe.category_id
            )));
        }
        for line in &recipe.ingredients {
            validate_required("Ingredient name", &line.name)?;
            validate_max_len("Ingredient name", &line.name, 50)?;
            if !self.store.unit_exists(line.unit_id).await? {
                return Err(ApiError::NotFound(format!(
                    "Ingredient unit {} does not exist",
                    line.unit_id
                )));
            }
        }

        let recipe_id = self
            .store
            .insert_recipe(
                &recipe.name,
                recipe.description.as_deref(),
                recipe.image.as_deref(),
                actor.profile_id,
                recipe.category_id,
                &recipe.ingredients,
            )
            .await?;
        audit(&self.store, "Recipes.Add", actor).await;
        Ok(recipe_id)
    }

    pub async fn get(&self, recipe_id: i32) -> ApiResult<RecipeView> {
        let details = self
            .store
            .get_recipe_details(recipe_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Recipe {} does not exist", recipe_id)))?;
        let ingredients = self.store.list_recipe_ingredients(recipe_id).await?;
        Ok(RecipeView {
            details,
            ingredients,
        })
    }

    pub async fn list(
        &self,
        category_id: Option<i32>,
        name_filter: Option<&str>,
        publisher_id: Option<i32>,
    ) -> ApiResult<Vec<RecipeSummary>> {
        Ok(self
            .store
            .list_recipes(category_id, name_filter, publisher_id)
            .await?)
    }

    /// Admin edits any recipe; a plain user only their own. `owned_only`
    /// distinguishes the by-token route.
    pub async fn edit(
        &self,
        actor: &AuthUser,
        recipe_id: i32,
        name: &str,
        description: Option<&str>,
        category_id: i32,
        owned_only: bool,
    ) -> ApiResult<()> {
        self.check_recipe_access(actor, recipe_id, owned_only).await?;
        validate_required("Name", name)?;
        validate_max_len("Name", name, 50)?;
        if !self.store.category_exists(category_id).await? {
            return Err(ApiError::NotFound(format!(
                "Category {} does not exist",
                category_id
            )));
        }

        self.store
            .update_recipe(recipe_id, name, description, category_id)
            .await?;
        audit(&self.store, "Recipes.Edit", actor).await;
        Ok(())
    }

    pub async fn delete(
        &self,
        actor: &AuthUser,
        recipe_id: i32,
        owned_only: bool,
    ) -> ApiResult<()> {
        self.check_recipe_access(actor, recipe_id, owned_only).await?;
        self.store.delete_recipe(recipe_id).await?;
        audit(&self.store, "Recipes.Delete", actor).await;
        Ok(())
    }

    async fn check_recipe_access(
        &self,
        actor: &AuthUser,
        recipe_id: i32,
        owned_only: bool,
    ) -> ApiResult<()> {
        let owner = self
            .store
            .recipe_owner(recipe_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Recipe {} does not exist", recipe_id)))?;
        if owned_only {
            authorize(actor, Some(owner), Role::User)
        } else {
            authorize(actor, None, Role::Admin)
        }
    }
}
