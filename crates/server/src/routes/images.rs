//! Media upload endpoints backed by the ImageKit-style CDN.

use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::{get, post},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use services::services::media::UploadAuthParams;
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UploadImageRequest {
    pub file_name: String,
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Base64-encoded file contents.
    pub data: String,
}

fn default_folder() -> String {
    "/properties".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UploadedImage {
    pub url: String,
}

/// Signed, time-limited upload authorization for client-side uploads.
pub async fn upload_auth(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<UploadAuthParams>>, ApiError> {
    let params = state.media().upload_auth().await?;
    Ok(ResponseJson(ApiResponse::success(params)))
}

pub async fn upload(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<UploadImageRequest>,
) -> Result<ResponseJson<ApiResponse<UploadedImage>>, ApiError> {
    let bytes = BASE64
        .decode(payload.data.as_bytes())
        .map_err(|e| ApiError::Validation(format!("invalid base64 payload: {e}")))?;

    let url = state
        .media()
        .upload(bytes, &payload.file_name, &payload.folder)
        .await?;
    Ok(ResponseJson(ApiResponse::success(UploadedImage { url })))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/images",
        Router::new()
            .route("/auth", get(upload_auth))
            .route("/upload", post(upload)),
    )
}
