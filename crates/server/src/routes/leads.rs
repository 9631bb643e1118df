use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::lead::{CreateLead, Lead, UpdateLead};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_leads(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Lead>>>, ApiError> {
    let leads = Lead::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(leads)))
}

pub async fn create_lead(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateLead>,
) -> Result<ResponseJson<ApiResponse<Lead>>, ApiError> {
    let lead = Lead::create(&state.db().pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(lead)))
}

pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateLead>,
) -> Result<ResponseJson<ApiResponse<Lead>>, ApiError> {
    let lead = Lead::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(lead)))
}

pub async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = Lead::delete(&state.db().pool, id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("lead"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/leads",
        Router::new()
            .route("/", get(list_leads).post(create_lead))
            .route("/{id}", put(update_lead).delete(delete_lead)),
    )
}
