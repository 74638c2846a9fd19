use std::sync::Arc;

use super::{audit, validate_max_len, validate_rating};
use crate::auth::{authorize, AuthUser, Role};
use crate::error::{ApiError, ApiResult};
use crate::models::Comment;
use crate::store::Store;

/// Lookup key for a single comment: either an explicit id, or the
/// (recipe, profile) pair the by-token routes resolve.
#[derive(Debug, Clone, Copy)]
pub enum CommentQuery {
    ById(i32),
    ByRecipeAndProfile { recipe_id: i32, profile_id: i32 },
}

#[derive(Clone)]
pub struct CommentService {
    store: Arc<Store>,
}

impl CommentService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn add(
        &self,
        actor: &AuthUser,
        recipe_id: i32,
        text: Option<&str>,
        rating: f64,
    ) -> ApiResult<()> {
        authorize(actor, None, Role::User)?;
        validate_rating(rating)?;
        if let Some(text) = text {
            validate_max_len("Text", text, 200)?;
        }
        if !self.store.profile_exists(actor.profile_id).await? {
            return Err(ApiError::NotFound(format!(
                "Profile {} does not exist",
                actor.profile_id
            )));
        }
        if !self.store.recipe_exists(recipe_id).await? {
            return Err(ApiError::NotFound(format!(
                "Recipe {} does not exist",
                recipe_id
            )));
        }

        self.store
            .insert_comment(actor.profile_id, recipe_id, text, rating)
            .await?;
        audit(&self.store, "Comments.Add", actor).await;
        Ok(())
    }

    /// Admin edit by explicit comment id.
    pub async fn edit(
        &self,
        actor: &AuthUser,
        comment_id: i32,
        text: Option<&str>,
        rating: f64,
    ) -> ApiResult<()> {
        authorize(actor, None, Role::Admin)?;
        validate_rating(rating)?;
        if let Some(text) = text {
            validate_max_len("Text", text, 200)?;
        }
        let updated = self.store.update_comment(comment_id, text, rating).await?;
        if updated == 0 {
            return Err(ApiError::NotFound(format!(
                "Comment {} does not exist",
                comment_id
            )));
        }
        audit(&self.store, "Comments.Edit", actor).await;
        Ok(())
    }

    /// By-token edit: the target is the caller's own comment on the recipe.
    pub async fn edit_own(
        &self,
        actor: &AuthUser,
        recipe_id: i32,
        text: Option<&str>,
        rating: f64,
    ) -> ApiResult<()> {
        validate_rating(rating)?;
        if let Some(text) = text {
            validate_max_len("Text", text, 200)?;
        }
        let comment = self
            .store
            .get_comment_by_recipe_and_profile(recipe_id, actor.profile_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("No comment by the caller on recipe {}", recipe_id))
            })?;

        self.store.update_comment(comment.id, text, rating).await?;
        audit(&self.store, "Comments.EditByToken", actor).await;
        Ok(())
    }

    /// Admin delete by explicit comment id, unconditionally.
    pub async fn delete(&self, actor: &AuthUser, comment_id: i32) -> ApiResult<()> {
        authorize(actor, None, Role::Admin)?;
        let deleted = self.store.delete_comment(comment_id).await?;
        if deleted == 0 {
            return Err(ApiError::NotFound(format!(
                "Comment {} does not exist",
                comment_id
            )));
        }
        audit(&self.store, "Comments.Delete", actor).await;
        Ok(())
    }

    /// By-token delete: resolves the caller's comment on the recipe and fails
    /// not-found when the caller never commented there.
    pub async fn delete_own(&self, actor: &AuthUser, recipe_id: i32) -> ApiResult<()> {
        let comment = self
            .store
            .get_comment_by_recipe_and_profile(recipe_id, actor.profile_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("No comment by the caller on recipe {}", recipe_id))
            })?;

        self.store.delete_comment(comment.id).await?;
        audit(&self.store, "Comments.DeleteByToken", actor).await;
        Ok(())
    }

    pub async fn get(&self, query: CommentQuery) -> ApiResult<Comment> {
        let comment = match query {
            CommentQuery::ById(comment_id) => self.store.get_comment(comment_id).await?,
            CommentQuery::ByRecipeAndProfile {
                recipe_id,
                profile_id,
            } => {
                self.store
                    .get_comment_by_recipe_and_profile(recipe_id, profile_id)
                    .await?
            }
        };
        comment.ok_or_else(|| ApiError::NotFound("Comment not found".into()))
    }

    pub async fn list_for_profile(
        &self,
        actor: &AuthUser,
        text_filter: Option<&str>,
        reverse_order: bool,
    ) -> ApiResult<Vec<Comment>> {
        let comments = self
            .store
            .list_profile_comments(actor.profile_id, text_filter, reverse_order)
            .await?;
        Ok(comments)
    }
}
