use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::FriendService;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_friend))
        .route("/deletebytoken", delete(delete_friend_by_token))
        .route("/getlist/byprofile", get(get_profile_friends))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddFriendRequest {
    addressee_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteFriendRequest {
    addressee_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendResponse {
    pub profile_id: i32,
    pub name: String,
    pub surname: String,
    pub reference_link: String,
    pub date_time: DateTime<Utc>,
}

async fn add_friend(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<AddFriendRequest>,
) -> ApiResult<&'static str> {
    FriendService::new(state.store.clone())
        .add(&actor, req.addressee_id)
        .await?;
    Ok("Friend added successfully")
}

async fn delete_friend_by_token(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<DeleteFriendRequest>,
) -> ApiResult<&'static str> {
    FriendService::new(state.store.clone())
        .delete_own(&actor, req.addressee_id)
        .await?;
    Ok("Friend deleted successfully")
}

async fn get_profile_friends(
    State(state): State<AppState>,
    actor: AuthUser,
) -> ApiResult<Json<Vec<FriendResponse>>> {
    let friends = FriendService::new(state.store.clone())
        .list_for_profile(&actor)
        .await?;
    Ok(Json(
        friends
            .into_iter()
            .map(|friend| FriendResponse {
                profile_id: friend.profile_id,
                name: friend.name,
                surname: friend.surname,
                reference_link: friend.reference_link,
                date_time: friend.date_time,
            })
            .collect(),
    ))
}
