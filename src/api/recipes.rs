use axum::{
    extract::{Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{decode_image, encode_image};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::{NewRecipe, RecipeService, RecipeView};
use crate::store::NewIngredientLine;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_recipe))
        .route("/get", get(get_recipe))
        .route("/getlist", get(get_recipe_list))
        .route("/edit", put(edit_recipe))
        .route("/editbytoken", put(edit_recipe_by_token))
        .route("/delete", delete(delete_recipe))
        .route("/deletebytoken", delete(delete_recipe_by_token))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IngredientLineRequest {
    name: String,
    value: f64,
    unit_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddRecipeRequest {
    name: String,
    description: Option<String>,
    image: Option<String>,
    category_id: i32,
    #[serde(default)]
    ingredients: Vec<IngredientLineRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetRecipeParams {
    recipe_id: i32,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ListRecipesParams {
    category_id: Option<i32>,
    name_filter: Option<String>,
    publisher_id: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditRecipeRequest {
    recipe_id: i32,
    name: String,
    description: Option<String>,
    category_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRecipeRequest {
    recipe_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddRecipeResponse {
    recipe_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLineResponse {
    pub id: i32,
    pub name: String,
    pub value: f64,
    pub unit_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub publication_time: DateTime<Utc>,
    pub publisher_id: i32,
    pub publisher_name: String,
    pub category_id: i32,
    pub category_name: String,
    pub ingredients: Vec<IngredientLineResponse>,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        Self {
            id: view.details.id,
            name: view.details.name,
            description: view.details.description,
            image: encode_image(view.details.image.as_deref()),
            publication_time: view.details.publication_time,
            publisher_id: view.details.publisher_id,
            publisher_name: view.details.publisher_name,
            category_id: view.details.category_id,
            category_name: view.details.category_name,
            ingredients: view
                .ingredients
                .into_iter()
                .map(|line| IngredientLineResponse {
                    id: line.id,
                    name: line.name,
                    value: line.value,
                    unit_name: line.unit_name,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummaryResponse {
    pub id: i32,
    pub name: String,
    pub publication_time: DateTime<Utc>,
    pub publisher_id: i32,
    pub publisher_name: String,
    pub category_name: String,
}

async fn add_recipe(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<AddRecipeRequest>,
) -> ApiResult<Json<AddRecipeResponse>> {
    let image = decode_image(req.image.as_deref())?;
    let recipe_id = RecipeService::new(state.store.clone())
        .add(
            &actor,
            NewRecipe {
                name: req.name,
                description: req.description,
                image,
                category_id: req.category_id,
                ingredients: req
                    .ingredients
                    .into_iter()
                    .map(|line| NewIngredientLine {
                        name: line.name,
                        value: line.value,
                        unit_id: line.unit_id,
                    })
                    .collect(),
            },
        )
        .await?;
    Ok(Json(AddRecipeResponse { recipe_id }))
}

async fn get_recipe(
    State(state): State<AppState>,
    _actor: AuthUser,
    Query(params): Query<GetRecipeParams>,
) -> ApiResult<Json<RecipeResponse>> {
    let view = RecipeService::new(state.store.clone())
        .get(params.recipe_id)
        .await?;
    Ok(Json(view.into()))
}

async fn get_recipe_list(
    State(state): State<AppState>,
    _actor: AuthUser,
    Query(params): Query<ListRecipesParams>,
) -> ApiResult<Json<Vec<RecipeSummaryResponse>>> {
    let summaries = RecipeService::new(state.store.clone())
        .list(
            params.category_id,
            params.name_filter.as_deref(),
            params.publisher_id,
        )
        .await?;
    Ok(Json(
        summaries
            .into_iter()
            .map(|summary| RecipeSummaryResponse {
                id: summary.id,
                name: summary.name,
                publication_time: summary.publication_time,
                publisher_id: summary.publisher_id,
                publisher_name: summary.publisher_name,
                category_name: summary.category_name,
            })
            .collect(),
    ))
}

async fn edit_recipe(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<EditRecipeRequest>,
) -> ApiResult<&'static str> {
    RecipeService::new(state.store.clone())
        .edit(
            &actor,
            req.recipe_id,
            &req.name,
            req.description.as_deref(),
            req.category_id,
            false,
        )
        .await?;
    Ok("Recipe edited successfully")
}

async fn edit_recipe_by_token(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<EditRecipeRequest>,
) -> ApiResult<&'static str> {
    RecipeService::new(state.store.clone())
        .edit(
            &actor,
            req.recipe_id,
            &req.name,
            req.description.as_deref(),
            req.category_id,
            true,
        )
        .await?;
    Ok("Recipe edited successfully")
}

async fn delete_recipe(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<DeleteRecipeRequest>,
) -> ApiResult<&'static str> {
    RecipeService::new(state.store.clone())
        .delete(&actor, req.recipe_id, false)
        .await?;
    Ok("Recipe deleted successfully")
}

async fn delete_recipe_by_token(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<DeleteRecipeRequest>,
) -> ApiResult<&'static str> {
    RecipeService::new(state.store.clone())
        .delete(&actor, req.recipe_id, true)
        .await?;
    Ok("Recipe deleted successfully")
}
