use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::RecommendationService;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_recommendation))
        .route("/getlist/received", get(get_received_recommendations))
        .route("/delete", delete(delete_recommendation))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddRecommendationRequest {
    to_user_id: i32,
    recipe_id: i32,
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRecommendationRequest {
    recommendation_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub id: i32,
    pub recipe_id: i32,
    pub recipe_name: String,
    pub from_user_id: i32,
    pub from_user_name: String,
    pub text: String,
}

async fn add_recommendation(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<AddRecommendationRequest>,
) -> ApiResult<&'static str> {
    RecommendationService::new(state.store.clone())
        .add(&actor, req.to_user_id, req.recipe_id, &req.text)
        .await?;
    Ok("Recommendation sent successfully")
}

async fn get_received_recommendations(
    State(state): State<AppState>,
    actor: AuthUser,
) -> ApiResult<Json<Vec<RecommendationResponse>>> {
    let recommendations = RecommendationService::new(state.store.clone())
        .list_received(&actor)
        .await?;
    Ok(Json(
        recommendations
            .into_iter()
            .map(|rec| RecommendationResponse {
                id: rec.id,
                recipe_id: rec.recipe_id,
                recipe_name: rec.recipe_name,
                from_user_id: rec.from_user_id,
                from_user_name: rec.from_user_name,
                text: rec.text,
            })
            .collect(),
    ))
}

async fn delete_recommendation(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<DeleteRecommendationRequest>,
) -> ApiResult<&'static str> {
    RecommendationService::new(state.store.clone())
        .delete(&actor, req.recommendation_id)
        .await?;
    Ok("Recommendation deleted successfully")
}
