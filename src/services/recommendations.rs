use std::sync::Arc;

use super::{audit, validate_max_len, validate_required};
use crate::auth::{authorize, AuthUser, Role};
use crate::error::{ApiError, ApiResult};
use crate::models::ReceivedRecommendation;
use crate::store::Store;

#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<Store>,
}

impl RecommendationService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn add(
        &self,
        actor: &AuthUser,
        to_user_id: i32,
        recipe_id: i32,
        text: &str,
    ) -> ApiResult<()> {
        authorize(actor, None, Role::User)?;
        validate_required("Text", text)?;
        validate_max_len("Text", text, 200)?;
        if !self.store.profile_exists(to_user_id).await? {
            return Err(ApiError::NotFound(format!(
                "Profile {} does not exist",
                to_user_id
            )));
        }
        if !self.store.recipe_exists(recipe_id).await? {
            return Err(ApiError::NotFound(format!(
                "Recipe {} does not exist",
                recipe_id
            )));
        }

        self.store
            .insert_recommendation(actor.profile_id, to_user_id, recipe_id, text)
            .await?;
        audit(&self.store, "Recommendations.Add", actor).await;
        Ok(())
    }

    pub async fn list_received(&self, actor: &AuthUser) -> ApiResult<Vec<ReceivedRecommendation>> {
        Ok(self
            .store
            .list_received_recommendations(actor.profile_id)
            .await?)
    }

    pub async fn delete(&self, actor: &AuthUser, recommendation_id: i32) -> ApiResult<()> {
        authorize(actor, None, Role::Admin)?;
        let deleted = self.store.delete_recommendation(recommendation_id).await?;
        if deleted == 0 {
            return Err(ApiError::NotFound(format!(
                "Recommendation {} does not exist",
                recommendation_id
            )));
        }
        audit(&self.store, "Recommendations.Delete", actor).await;
        Ok(())
    }
}
