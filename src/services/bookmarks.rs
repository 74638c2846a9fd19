use std::sync::Arc;

use super::audit;
use crate::auth::{authorize, AuthUser, Role};
use crate::error::{ApiError, ApiResult};
use crate::models::BookmarkedRecipe;
use crate::store::Store;

#[derive(Clone)]
pub struct BookmarkService {
    store: Arc<Store>,
}

impl BookmarkService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn add(&self, actor: &AuthUser, recipe_id: i32) -> ApiResult<()> {
        authorize(actor, None, Role::User)?;
        if !self.store.recipe_exists(recipe_id).await? {
            return Err(ApiError::NotFound(format!(
                "Recipe {} does not exist",
                recipe_id
            )));
        }
        self.store
            .insert_bookmark(actor.profile_id, recipe_id)
            .await?;
        audit(&self.store, "Bookmarks.Add", actor).await;
        Ok(())
    }

    /// Removes the caller's bookmarks of a recipe; not-found when there were
    /// none, leaving the table untouched.
    pub async fn delete_own(&self, actor: &AuthUser, recipe_id: i32) -> ApiResult<()> {
        let deleted = self
            .store
            .delete_bookmarks(actor.profile_id, recipe_id)
            .await?;
        if deleted == 0 {
            return Err(ApiError::NotFound(format!(
                "No bookmark of recipe {} for the caller",
                recipe_id
            )));
        }
        audit(&self.store, "Bookmarks.DeleteByToken", actor).await;
        Ok(())
    }

    pub async fn list_for_profile(&self, actor: &AuthUser) -> ApiResult<Vec<BookmarkedRecipe>> {
        Ok(self.store.list_bookmarks(actor.profile_id).await?)
    }
}
