use axum::{
    extract::{Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{decode_image, encode_image};
use crate::app_state::AppState;
use crate::auth::{authorize, AuthUser, Claims, Role};
use crate::error::ApiResult;
use crate::models::UserProfile;
use crate::services::{ProfileService, RegisterProfile};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/get", get(get_profile))
        .route("/getbytoken", get(get_profile_by_token))
        .route("/editbytoken", put(edit_profile_by_token))
        .route("/delete", delete(delete_profile))
        .route("/deletebytoken", delete(delete_profile_by_token))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    name: String,
    surname: String,
    email: String,
    reference_link: String,
    login: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    login: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    token: String,
    profile_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    profile_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetProfileParams {
    profile_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditProfileRequest {
    name: String,
    surname: String,
    email: String,
    image: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteProfileRequest {
    profile_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub is_admin: bool,
    pub reference_link: String,
    pub image: Option<String>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            surname: profile.surname,
            email: profile.email,
            is_admin: profile.is_admin,
            reference_link: profile.reference_link,
            image: encode_image(profile.image.as_deref()),
        }
    }
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    let profile_id = ProfileService::new(state.store.clone())
        .register(RegisterProfile {
            name: req.name,
            surname: req.surname,
            email: req.email,
            reference_link: req.reference_link,
            login: req.login,
            password: req.password,
        })
        .await?;
    Ok(Json(RegisterResponse { profile_id }))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let identity = ProfileService::new(state.store.clone())
        .login(&req.login, &req.password)
        .await?;
    let claims = Claims::new(
        identity.profile_id,
        identity.is_admin,
        Duration::hours(state.config.auth.token_ttl_hours),
    );
    let token = state.jwt.issue(&claims)?;
    Ok(Json(TokenResponse {
        token,
        profile_id: identity.profile_id,
    }))
}

async fn get_profile(
    State(state): State<AppState>,
    actor: AuthUser,
    Query(params): Query<GetProfileParams>,
) -> ApiResult<Json<ProfileResponse>> {
    authorize(&actor, None, Role::Admin)?;
    let profile = ProfileService::new(state.store.clone())
        .get(params.profile_id)
        .await?;
    Ok(Json(profile.into()))
}

async fn get_profile_by_token(
    State(state): State<AppState>,
    actor: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::new(state.store.clone())
        .get(actor.profile_id)
        .await?;
    Ok(Json(profile.into()))
}

async fn edit_profile_by_token(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<EditProfileRequest>,
) -> ApiResult<&'static str> {
    let image = decode_image(req.image.as_deref())?;
    ProfileService::new(state.store.clone())
        .edit_own(&actor, &req.name, &req.surname, &req.email, image.as_deref())
        .await?;
    Ok("Profile edited successfully")
}

async fn delete_profile(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(req): Json<DeleteProfileRequest>,
) -> ApiResult<&'static str> {
    ProfileService::new(state.store.clone())
        .delete(&actor, req.profile_id)
        .await?;
    Ok("Profile deleted successfully")
}

async fn delete_profile_by_token(
    State(state): State<AppState>,
    actor: AuthUser,
) -> ApiResult<&'static str> {
    ProfileService::new(state.store.clone())
        .delete(&actor, actor.profile_id)
        .await?;
    Ok("Profile deleted successfully")
}
