use std::sync::Arc;

use super::audit;
use crate::auth::{authorize, AuthUser, Role};
use crate::error::{ApiError, ApiResult};
use crate::models::Friend;
use crate::store::Store;

#[derive(Clone)]
pub struct FriendService {
    store: Arc<Store>,
}

impl FriendService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn add(&self, actor: &AuthUser, addressee_id: i32) -> ApiResult<()> {
        authorize(actor, None, Role::User)?;
        if addressee_id == actor.profile_id {
            return Err(ApiError::Validation(
                "A profile cannot befriend itself".into(),
            ));
        }
        if !self.store.profile_exists(addressee_id).await? {
            return Err(ApiError::NotFound(format!(
                "Profile {} does not exist",
                addressee_id
            )));
        }
        if self
            .store
            .friend_link_exists(actor.profile_id, addressee_id)
            .await?
        {
            return Err(ApiError::Conflict(format!(
                "Profile {} is already in the friend list",
                addressee_id
            )));
        }

        self.store
            .insert_friend(actor.profile_id, addressee_id)
            .await?;
        audit(&self.store, "Friends.Add", actor).await;
        Ok(())
    }

    pub async fn delete_own(&self, actor: &AuthUser, addressee_id: i32) -> ApiResult<()> {
        let deleted = self
            .store
            .delete_friend(actor.profile_id, addressee_id)
            .await?;
        if deleted == 0 {
            return Err(ApiError::NotFound(format!(
                "Profile {} is not in the friend list",
                addressee_id
            )));
        }
        audit(&self.store, "Friends.DeleteByToken", actor).await;
        Ok(())
    }

    pub async fn list_for_profile(&self, actor: &AuthUser) -> ApiResult<Vec<Friend>> {
        Ok(self.store.list_friends(actor.profile_id).await?)
    }
}
