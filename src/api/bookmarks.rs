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
use crate::services::BookmarkService;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_bookmark))
        .route("/deletebytoken", delete(delete_bookmark_by_token))
        .route("/getlist/byprofile", get(get_profile_bookmarks))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBookmarkRequest {
    recipe_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBookmarkRequest {
    recipe_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: i32,
    pub recipe_id: i32,
    pub recipe_name: String,
    pub add_time: DateTime<Utc>,
}

async fn add_bookmark(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<AddBookmarkRequest>,
) -> ApiResult<&'static str> {
    BookmarkService::new(state.store.clone())
        .add(&actor, req.recipe_id)
        .await?;
    Ok("Bookmark added successfully")
}

async fn delete_bookmark_by_token(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<DeleteBookmarkRequest>,
) -> ApiResult<&'static str> {
    BookmarkService::new(state.store.clone())
        .delete_own(&actor, req.recipe_id)
        .await?;
    Ok("Bookmark deleted successfully")
}

async fn get_profile_bookmarks(
    State(state): State<AppState>,
    actor: AuthUser,
) -> ApiResult<Json<Vec<BookmarkResponse>>> {
    let bookmarks = BookmarkService::new(state.store.clone())
        .list_for_profile(&actor)
        .await?;
    Ok(Json(
        bookmarks
            .into_iter()
            .map(|bookmark| BookmarkResponse {
                id: bookmark.id,
                recipe_id: bookmark.recipe_id,
                recipe_name: bookmark.recipe_name,
                add_time: bookmark.add_time,
            })
            .collect(),
    ))
}
