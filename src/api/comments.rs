use axum::{
    extract::{Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::models::Comment;
use crate::services::{CommentQuery, CommentService};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_comment))
        .route("/delete", delete(delete_comment))
        .route("/deletebytoken", delete(delete_comment_by_token))
        .route("/edit", put(edit_comment))
        .route("/editbytoken", put(edit_comment_by_token))
        .route("/get", get(get_comment))
        .route("/getbytoken", get(get_comment_by_token))
        .route("/getlist/byprofile", get(get_profile_comments))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddCommentRequest {
    recipe_id: i32,
    text: Option<String>,
    rating: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteCommentRequest {
    comment_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteCommentByTokenRequest {
    recipe_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditCommentRequest {
    comment_id: i32,
    text: Option<String>,
    rating: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditCommentByTokenRequest {
    recipe_id: i32,
    text: Option<String>,
    rating: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetCommentParams {
    comment_id: Option<i32>,
    recipe_id: Option<i32>,
    profile_id: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetCommentByTokenParams {
    recipe_id: i32,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ListCommentsParams {
    text_filter: Option<String>,
    reverse_order: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i32,
    pub recipe_id: i32,
    pub profile_id: i32,
    pub text: Option<String>,
    pub rating: f64,
    pub publication_time: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            recipe_id: comment.recipe_id,
            profile_id: comment.profile_id,
            text: comment.text,
            rating: comment.rating,
            publication_time: comment.publication_time,
        }
    }
}

async fn add_comment(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<AddCommentRequest>,
) -> ApiResult<&'static str> {
    CommentService::new(state.store.clone())
        .add(&actor, req.recipe_id, req.text.as_deref(), req.rating)
        .await?;
    Ok("Comment added successfully")
}

async fn delete_comment(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<DeleteCommentRequest>,
) -> ApiResult<&'static str> {
    CommentService::new(state.store.clone())
        .delete(&actor, req.comment_id)
        .await?;
    Ok("Comment deleted successfully")
}

async fn delete_comment_by_token(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<DeleteCommentByTokenRequest>,
) -> ApiResult<&'static str> {
    CommentService::new(state.store.clone())
        .delete_own(&actor, req.recipe_id)
        .await?;
    Ok("Comment deleted successfully")
}

async fn edit_comment(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<EditCommentRequest>,
) -> ApiResult<&'static str> {
    CommentService::new(state.store.clone())
        .edit(&actor, req.comment_id, req.text.as_deref(), req.rating)
        .await?;
    Ok("Comment edited successfully")
}

async fn edit_comment_by_token(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<EditCommentByTokenRequest>,
) -> ApiResult<&'static str> {
    CommentService::new(state.store.clone())
        .edit_own(&actor, req.recipe_id, req.text.as_deref(), req.rating)
        .await?;
    Ok("Comment edited successfully")
}

async fn get_comment(
    State(state): State<AppState>,
    _actor: AuthUser,
    Query(params): Query<GetCommentParams>,
) -> ApiResult<Json<CommentResponse>> {
    let query = match (params.comment_id, params.recipe_id, params.profile_id) {
        (Some(comment_id), _, _) => CommentQuery::ById(comment_id),
        (None, Some(recipe_id), Some(profile_id)) => CommentQuery::ByRecipeAndProfile {
            recipe_id,
            profile_id,
        },
        _ => {
            return Err(ApiError::Validation(
                "Specify commentId, or recipeId together with profileId".into(),
            ))
        }
    };
    let comment = CommentService::new(state.store.clone()).get(query).await?;
    Ok(Json(comment.into()))
}

async fn get_comment_by_token(
    State(state): State<AppState>,
    actor: AuthUser,
    Query(params): Query<GetCommentByTokenParams>,
) -> ApiResult<Json<CommentResponse>> {
    let comment = CommentService::new(state.store.clone())
        .get(CommentQuery::ByRecipeAndProfile {
            recipe_id: params.recipe_id,
            profile_id: actor.profile_id,
        })
        .await?;
    Ok(Json(comment.into()))
}

async fn get_profile_comments(
    State(state): State<AppState>,
    actor: AuthUser,
    Query(params): Query<ListCommentsParams>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = CommentService::new(state.store.clone())
        .list_for_profile(
            &actor,
            params.text_filter.as_deref(),
            params.reverse_order.unwrap_or(false),
        )
        .await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}
