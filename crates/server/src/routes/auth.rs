//! Session endpoints: login, logout, current session.

use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::Json as ResponseJson,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use services::services::auth::Session;
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, bearer_token, error::ApiError};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<LoginRequest>,
) -> Result<ResponseJson<ApiResponse<Session>>, ApiError> {
    let session = state.auth().sign_in(&payload.email, &payload.password).await?;
    Ok(ResponseJson(ApiResponse::success(session)))
}

/// Always succeeds, even for an unknown or absent token.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ResponseJson<ApiResponse<()>> {
    if let Some(token) = bearer_token(&headers) {
        state.auth().sign_out(token);
    }
    ResponseJson(ApiResponse::success(()))
}

/// Current session for the UI shell; `null` when signed out or expired.
pub async fn session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ResponseJson<ApiResponse<Option<Session>>> {
    let session = bearer_token(&headers).and_then(|token| state.auth().session(token));
    ResponseJson(ApiResponse::success(session))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/auth",
        Router::new()
            .route("/login", post(login))
            .route("/logout", post(logout))
            .route("/session", get(session)),
    )
}
