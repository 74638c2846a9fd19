use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::CatalogService;

pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/getlist", get(get_categories))
        .route("/add", post(add_category))
        .route("/delete", delete(delete_category))
}

pub fn units_router() -> Router<AppState> {
    Router::new()
        .route("/getlist", get(get_units))
        .route("/add", post(add_unit))
        .route("/delete", delete(delete_unit))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddNamedRequest {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteCategoryRequest {
    category_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteUnitRequest {
    unit_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedResponse {
    pub id: i32,
    pub name: String,
}

async fn get_categories(
    State(state): State<AppState>,
    _actor: AuthUser,
) -> ApiResult<Json<Vec<NamedResponse>>> {
    let categories = CatalogService::new(state.store.clone())
        .list_categories()
        .await?;
    Ok(Json(
        categories
            .into_iter()
            .map(|category| NamedResponse {
                id: category.id,
                name: category.name,
            })
            .collect(),
    ))
}

async fn add_category(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<AddNamedRequest>,
) -> ApiResult<&'static str> {
    CatalogService::new(state.store.clone())
        .add_category(&actor, &req.name)
        .await?;
    Ok("Category added successfully")
}

async fn delete_category(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<DeleteCategoryRequest>,
) -> ApiResult<&'static str> {
    CatalogService::new(state.store.clone())
        .delete_category(&actor, req.category_id)
        .await?;
    Ok("Category deleted successfully")
}

async fn get_units(
    State(state): State<AppState>,
    _actor: AuthUser,
) -> ApiResult<Json<Vec<NamedResponse>>> {
    let units = CatalogService::new(state.store.clone()).list_units().await?;
    Ok(Json(
        units
            .into_iter()
            .map(|unit| NamedResponse {
                id: unit.id,
                name: unit.name,
            })
            .collect(),
    ))
}

async fn add_unit(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<AddNamedRequest>,
) -> ApiResult<&'static str> {
    CatalogService::new(state.store.clone())
        .add_unit(&actor, &req.name)
        .await?;
    Ok("Ingredient unit added successfully")
}

async fn delete_unit(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<DeleteUnitRequest>,
) -> ApiResult<&'static str> {
    CatalogService::new(state.store.clone())
        .delete_unit(&actor, req.unit_id)
        .await?;
    Ok("Ingredient unit deleted successfully")
}
