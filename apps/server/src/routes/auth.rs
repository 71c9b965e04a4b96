//! # Auth Routes
//!
//! Login is a yes/no check against the single stored credential; no
//! session or token is issued. Change-password always applies to the
//! configured admin account.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::Done;
use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/change-password", post(change_password))
}

/// Missing fields read as empty strings and simply fail the match.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    state
        .credentials
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful",
    }))
}

async fn change_password(
    State(state): State<AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> ApiResult<Json<Done>> {
    state
        .credentials
        .change_password(&request.old_password, &request.new_password)
        .await?;

    Ok(Done::new("Password changed"))
}
