use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::profile::{CreateProfile, Profile, UpdateProfile};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Profile>>>, ApiError> {
    let profiles = Profile::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(profiles)))
}

pub async fn create_profile(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateProfile>,
) -> Result<ResponseJson<ApiResponse<Profile>>, ApiError> {
    let profile = Profile::create(&state.db().pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(profile)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateProfile>,
) -> Result<ResponseJson<ApiResponse<Profile>>, ApiError> {
    let profile = Profile::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(profile)))
}

pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = Profile::delete(&state.db().pool, id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("profile"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/profiles",
        Router::new()
            .route("/", get(list_profiles).post(create_profile))
            .route("/{id}", put(update_profile).delete(delete_profile)),
    )
}
